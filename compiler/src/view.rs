use crate::error::RestructError;
use lazy_static::lazy_static;
use regex::Regex;
use restruct_schema::{Definition, Field, SchemaRegistry, ViewNode};
use tracing::warn;

lazy_static! {
    static ref VIEW_STRUCT_RX: Regex =
        Regex::new(r"(?s)typedef\s+struct\s*\{([^}]*)\}\s*(\w+)\s*;").unwrap();
    static ref VIEW_FIELD_RX: Regex =
        Regex::new(r"^(\w+)\s+(\w+)(\s*\[\s*(\d+)\s*\])?\s*;").unwrap();
}

/// Line-oriented recognizer for view headers: one `type name[n]?;` per line,
/// blank lines and `//` comments skipped. Lines that do not fit are ignored.
pub fn parse_view_schema(text: &str) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    for caps in VIEW_STRUCT_RX.captures_iter(text) {
        let (Some(body), Some(name)) = (caps.get(1), caps.get(2)) else { continue };
        let line = text[..name.start()].matches('\n').count() + 1;

        let mut fields = Vec::new();
        for raw in body.as_str().lines() {
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with("//") {
                continue;
            }
            let Some(field) = VIEW_FIELD_RX.captures(raw) else { continue };
            let dims = field
                .get(4)
                .and_then(|size| size.as_str().parse::<usize>().ok())
                .map(|size| vec![size]);
            fields.push(Field {
                name:  field[2].to_owned(),
                type_: field[1].to_owned(),
                dims,
            });
        }

        registry.insert(Definition {
            name: name.as_str().to_owned(),
            line,
            column: 0,
            fields,
        });
    }

    registry
}

/// Resolves `type_name` through `registry` into an output-shape tree.
///
/// The registry must be free of recursive nesting (see
/// [`verify_registry`](crate::verifier::verify_registry)).
pub fn build_view_tree(registry: &SchemaRegistry, type_name: &str) -> ViewNode {
    let Some(fields) = registry.fields(type_name) else {
        return ViewNode::leaf(type_name);
    };

    let children = fields
        .iter()
        .map(|field| {
            let mut node = build_view_tree(registry, &field.type_);
            if let Some(dims) = &field.dims {
                for &size in dims.iter().rev() {
                    node = ViewNode::array_of(size, node);
                }
            }
            (field.name.clone(), node)
        })
        .collect();

    ViewNode::Object(children)
}

/// Builds the tree for the root view type, which must be a declared struct.
pub fn resolve_view(registry: &SchemaRegistry, root: &str) -> Result<ViewNode, RestructError> {
    if !registry.contains(root) {
        warn!(view = %root, "view type not found");
        return Err(RestructError::UnknownType(root.to_owned()));
    }
    Ok(build_view_tree(registry, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: &str = "
        // compact unit layout
        typedef struct {
            int hp;
            int mp;
        } statsView;

        typedef struct {
            // identifier
            int id;
            statsView stats;
            float pos[3];
            not a field
            statsView history [2] ;
        } unitView;
    ";

    #[test]
    fn test_parse_view_schema() {
        let registry = parse_view_schema(VIEW);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.fields("unitView").unwrap(),
            [
                Field::scalar("id", "int"),
                Field::scalar("stats", "statsView"),
                Field::array("pos", "float", vec![3]),
                Field::array("history", "statsView", vec![2]),
            ]
        );
        assert_eq!(registry.get("statsView").unwrap().line, 6);
    }

    #[test]
    fn test_build_view_tree() {
        let registry = parse_view_schema(VIEW);
        let stats = ViewNode::Object(vec![
            ("hp".into(), ViewNode::leaf("int")),
            ("mp".into(), ViewNode::leaf("int")),
        ]);
        let expected = ViewNode::Object(vec![
            ("id".into(), ViewNode::leaf("int")),
            ("stats".into(), stats.clone()),
            ("pos".into(), ViewNode::array_of(3, ViewNode::leaf("float"))),
            ("history".into(), ViewNode::array_of(2, stats)),
        ]);
        assert_eq!(build_view_tree(&registry, "unitView"), expected);
    }

    #[test]
    fn test_multi_dimensional_fields_nest_outer_first() {
        let registry: SchemaRegistry = [Definition {
            name: "grid".into(),
            line: 1,
            column: 1,
            fields: vec![Field::array("cells", "int", vec![2, 3])],
        }]
        .into_iter()
        .collect();

        let expected = ViewNode::Object(vec![(
            "cells".into(),
            ViewNode::array_of(2, ViewNode::array_of(3, ViewNode::leaf("int"))),
        )]);
        assert_eq!(build_view_tree(&registry, "grid"), expected);
    }

    #[test]
    fn test_unknown_root_is_an_error() {
        let registry = parse_view_schema(VIEW);
        assert!(matches!(
            resolve_view(&registry, "missing"),
            Err(RestructError::UnknownType(name)) if name == "missing"
        ));
    }
}
