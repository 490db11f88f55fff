use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref INDEX_RX: Regex = Regex::new(r"\[\d+\]").unwrap();
}

/// Output-name overrides keyed by normalized source path (`stats.hp`) or by
/// bare field name (`hp`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: IndexMap<String, String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `key: value` lines. Blank lines, `#` comments and lines without a
    /// `:` are ignored. The value is everything after the first `:`.
    pub fn parse(text: &str) -> Self {
        let mut table = MappingTable::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                table.insert(key.trim(), value.trim());
            }
        }
        table
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    /// Looks up an override: exact normalized path first, then bare name.
    pub fn lookup(&self, normalized_path: &str, field_name: &str) -> Option<&str> {
        self.entries
            .get(normalized_path)
            .or_else(|| self.entries.get(field_name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strips every `[index]` from a source path: `units[1].stats[0].hp` becomes
/// `units.stats.hp`.
pub fn normalize_path(path: &str) -> String {
    INDEX_RX.replace_all(path, "").into_owned()
}
