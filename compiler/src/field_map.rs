use crate::error::RestructError;
use lazy_static::lazy_static;
use regex::Regex;
use restruct_schema::FieldValueMap;
use tracing::debug;

lazy_static! {
    static ref INDEXED_PATH_RX: Regex = Regex::new(r"^(.+?)_(\d+)$").unwrap();
}

/// Splits `grid_1_2` into (`grid_1`, `2`). Paths without a numeric suffix
/// return `None`.
pub fn split_index_suffix(path: &str) -> Option<(&str, usize)> {
    let caps = INDEXED_PATH_RX.captures(path)?;
    let base = caps.get(1)?.as_str();
    let index = caps.get(2)?.as_str().parse().ok()?;
    Some((base, index))
}

/// Pairs flat schema paths with flat literal values, one to one and in order.
///
/// Fails with `SchemaMismatch` when there are fewer values than paths. Extra
/// values are ignored.
pub fn build_field_map<S: AsRef<str>>(paths: &[String], values: &[S]) -> Result<FieldValueMap, RestructError> {
    if values.len() < paths.len() {
        return Err(RestructError::SchemaMismatch {
            expected: paths.len(),
            found:    values.len(),
        });
    }
    if values.len() > paths.len() {
        debug!(expected = paths.len(), found = values.len(), "ignoring excess initializer values");
    }

    let mut map = FieldValueMap::new();
    for (path, value) in paths.iter().zip(values) {
        let value = value.as_ref();
        map.insert(path, value);
        if let Some((base, _)) = split_index_suffix(path) {
            map.push_indexed(base, value);
        }
    }
    Ok(map)
}
