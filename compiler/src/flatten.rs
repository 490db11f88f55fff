//! Expansion of a struct schema into its ordered flat leaf names.
//!
//! Leaf names are built from output prefixes joined with `_`. A mapping
//! override replaces the whole accumulated prefix, so a nested field can be
//! re-anchored at any depth.

use crate::{
    mapping::{normalize_path, MappingTable},
    utils::join_prefix,
};
use restruct_schema::{Field, SchemaRegistry};

/// Every index combination of `dims` in row-major order (last dimension
/// varies fastest).
pub fn index_tuples(dims: &[usize]) -> Vec<Vec<usize>> {
    dims.iter().fold(vec![Vec::new()], |acc, &dim| {
        acc.iter()
            .flat_map(|prefix| {
                (0..dim).map(move |i| {
                    let mut next = prefix.clone();
                    next.push(i);
                    next
                })
            })
            .collect()
    })
}

/// `[1, 2]` becomes `1_2`.
pub fn index_suffix(indices: &[usize]) -> String {
    indices.iter().map(usize::to_string).collect::<Vec<_>>().join("_")
}

/// `[1, 2]` becomes `[1][2]`.
pub fn source_index(indices: &[usize]) -> String {
    indices.iter().map(|i| format!("[{}]", i)).collect()
}

/// Dotted source path of a field below `parent` (empty at the root).
pub fn source_path(parent: &str, field_name: &str) -> String {
    if parent.is_empty() {
        field_name.to_owned()
    } else {
        format!("{}.{}", parent, field_name)
    }
}

/// Output prefix of a field: the mapping override verbatim when one matches
/// the normalized source path or the bare name, otherwise the parent prefix
/// extended by the field name.
pub fn output_prefix(
    parent_prefix: &str,
    source_path: &str,
    field_name: &str,
    mapping: &MappingTable,
) -> String {
    match mapping.lookup(&normalize_path(source_path), field_name) {
        Some(name) => name.to_owned(),
        None => join_prefix(parent_prefix, field_name),
    }
}

/// Flat leaf names of `struct_name`, depth first in declaration order.
/// Returns an empty list when the struct is not in `registry`.
///
/// The registry must be free of recursive nesting (see
/// [`verify_registry`](crate::verifier::verify_registry)).
pub fn flatten_struct(registry: &SchemaRegistry, struct_name: &str, mapping: &MappingTable) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(fields) = registry.fields(struct_name) {
        flatten_fields(registry, fields, "", "", mapping, &mut out);
    }
    out
}

fn flatten_fields(
    registry: &SchemaRegistry,
    fields: &[Field],
    parent_source: &str,
    parent_prefix: &str,
    mapping: &MappingTable,
    out: &mut Vec<String>,
) {
    for field in fields {
        let source = source_path(parent_source, &field.name);
        let prefix = output_prefix(parent_prefix, &source, &field.name, mapping);

        match (registry.fields(&field.type_), &field.dims) {
            (Some(nested), None) => {
                flatten_fields(registry, nested, &source, &prefix, mapping, out);
            }
            (Some(nested), Some(dims)) => {
                for indices in index_tuples(dims) {
                    let nested_source = format!("{}{}", source, source_index(&indices));
                    let nested_prefix = format!("{}_{}", prefix, index_suffix(&indices));
                    flatten_fields(registry, nested, &nested_source, &nested_prefix, mapping, out);
                }
            }
            (None, None) => out.push(prefix),
            (None, Some(dims)) => {
                out.extend(
                    index_tuples(dims)
                        .iter()
                        .map(|indices| format!("{}_{}", prefix, index_suffix(indices))),
                );
            }
        }
    }
}
