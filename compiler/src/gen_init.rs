//! Rendering of a view tree back into nested initializer text.

use crate::utils::join_prefix;
use restruct_schema::{FieldValueMap, ViewNode};

/// Placeholder for view leaves that have no value in the field map.
pub const MISSING_VALUE: &str = "0";

/// Renders `view` as a braced initializer, pulling values from `map` by output
/// path. Never fails: leaves without data render as [`MISSING_VALUE`].
pub fn generate_initializer(view: &ViewNode, map: &FieldValueMap) -> String {
    render(view, map, "")
}

fn render(node: &ViewNode, map: &FieldValueMap, prefix: &str) -> String {
    match node {
        ViewNode::Leaf(_) => map.get(prefix).unwrap_or(MISSING_VALUE).to_owned(),
        ViewNode::Object(fields) => {
            let parts = fields.iter().map(|(name, child)| {
                let key = join_prefix(prefix, name);
                match (child, map.get(&key)) {
                    (ViewNode::ArrayOf { .. }, _) | (_, None) => render(child, map, &key),
                    (_, Some(value)) => value.to_owned(),
                }
            });
            braced(parts)
        }
        ViewNode::ArrayOf { size, child } => {
            let parts = (0..*size).map(|i| {
                let key = format!("{}_{}", prefix, i);
                if let Some(value) = map.get(&key) {
                    return value.to_owned();
                }
                if child.is_leaf() {
                    if let Some(value) = map.sequence(prefix).and_then(|seq| seq.get(i)) {
                        return value.clone();
                    }
                }
                render(child, map, &key)
            });
            braced(parts)
        }
    }
}

fn braced<I: Iterator<Item = String>>(parts: I) -> String {
    format!("{{{}}}", parts.collect::<Vec<_>>().join(", "))
}

/// Wraps per-element initializers of a struct array, one element per line.
pub fn join_elements(elements: &[String]) -> String {
    format!("{{\n{}\n}}", elements.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map::build_field_map;

    fn map(pairs: &[(&str, &str)]) -> FieldValueMap {
        let paths: Vec<String> = pairs.iter().map(|(p, _)| p.to_string()).collect();
        let values: Vec<&str> = pairs.iter().map(|(_, v)| *v).collect();
        build_field_map(&paths, &values).unwrap()
    }

    fn obj(fields: Vec<(&str, ViewNode)>) -> ViewNode {
        ViewNode::Object(fields.into_iter().map(|(n, v)| (n.to_string(), v)).collect())
    }

    #[test]
    fn test_flat_object() {
        let view = obj(vec![("x", ViewNode::leaf("int")), ("y", ViewNode::leaf("int"))]);
        let got = generate_initializer(&view, &map(&[("x", "1"), ("y", "2")]));
        assert_eq!(got, "{1, 2}");
    }

    #[test]
    fn test_view_reorders_and_regroups() {
        let view = obj(vec![
            ("pos", obj(vec![("y", ViewNode::leaf("int")), ("x", ViewNode::leaf("int"))])),
            ("id", ViewNode::leaf("int")),
        ]);
        let got = generate_initializer(&view, &map(&[("id", "7"), ("pos_x", "1"), ("pos_y", "2")]));
        assert_eq!(got, "{{2, 1}, 7}");
    }

    #[test]
    fn test_missing_leaves_render_as_zero() {
        let view = obj(vec![
            ("x", ViewNode::leaf("int")),
            ("extra", ViewNode::array_of(2, ViewNode::leaf("int"))),
        ]);
        let got = generate_initializer(&view, &map(&[("x", "1")]));
        assert_eq!(got, "{1, {0, 0}}");
    }

    #[test]
    fn test_array_of_leaves_uses_direct_keys() {
        let view = obj(vec![("v", ViewNode::array_of(3, ViewNode::leaf("int")))]);
        let got = generate_initializer(&view, &map(&[("v_0", "1"), ("v_1", "2"), ("v_2", "3")]));
        assert_eq!(got, "{{1, 2, 3}}");
    }

    #[test]
    fn test_array_of_structs_recurses_with_index_prefix() {
        let view = obj(vec![(
            "pts",
            ViewNode::array_of(2, obj(vec![("x", ViewNode::leaf("int")), ("y", ViewNode::leaf("int"))])),
        )]);
        let got = generate_initializer(
            &view,
            &map(&[("pts_0_x", "1"), ("pts_0_y", "2"), ("pts_1_x", "3"), ("pts_1_y", "4")]),
        );
        assert_eq!(got, "{{{1, 2}, {3, 4}}}");
    }

    #[test]
    fn test_multi_dimensional_array() {
        let view = obj(vec![(
            "m",
            ViewNode::array_of(2, ViewNode::array_of(2, ViewNode::leaf("int"))),
        )]);
        let got = generate_initializer(
            &view,
            &map(&[("m_0_0", "a"), ("m_0_1", "b"), ("m_1_0", "c"), ("m_1_1", "d")]),
        );
        assert_eq!(got, "{{{a, b}, {c, d}}}");
    }

    #[test]
    fn test_grouped_sequence_fallback() {
        let mut values = FieldValueMap::new();
        values.push_indexed("v", "8");
        values.push_indexed("v", "9");
        let view = obj(vec![("v", ViewNode::array_of(3, ViewNode::leaf("int")))]);
        assert_eq!(generate_initializer(&view, &values), "{{8, 9, 0}}");
    }

    #[test]
    fn test_scalar_value_wins_over_view_struct() {
        let view = obj(vec![("pos", obj(vec![("x", ViewNode::leaf("int"))]))]);
        let got = generate_initializer(&view, &map(&[("pos", "ORIGIN")]));
        assert_eq!(got, "{ORIGIN}");
    }

    #[test]
    fn test_join_elements() {
        assert_eq!(join_elements(&["{1}".into(), "{2}".into()]), "{\n{1},\n{2}\n}");
        assert_eq!(join_elements(&[]), "{\n\n}");
    }
}
