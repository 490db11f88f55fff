use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A parsed initializer, mirroring its brace nesting.
///
/// Scalars keep their lexical text (`1.5f`, `"name"`, `MAX_HP`) and are never
/// evaluated.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LiteralNode {
    Scalar(String),
    List(Vec<LiteralNode>),
}

impl LiteralNode {
    pub fn scalar(text: &str) -> Self {
        LiteralNode::Scalar(text.to_owned())
    }

    pub fn as_list(&self) -> Option<&[LiteralNode]> {
        match self {
            LiteralNode::List(items) => Some(items),
            LiteralNode::Scalar(_) => None,
        }
    }

    /// True when this is a list whose first element is itself a list, which is
    /// how an initializer for an array of structs looks.
    pub fn is_list_of_lists(&self) -> bool {
        matches!(self.as_list(), Some([LiteralNode::List(_), ..]))
    }

    /// Depth-first, left-to-right scalar texts. Brace structure is discarded.
    pub fn flatten(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            LiteralNode::Scalar(text) => out.push(text),
            LiteralNode::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl fmt::Display for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LiteralNode::Scalar(text) => f.write_str(text),
            LiteralNode::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Debug for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Literal values keyed by flattened output path.
///
/// Every flat path is stored as a direct scalar. Paths ending in an index
/// suffix (`hp_0`, `grid_1_2`) are additionally grouped, in order, under their
/// base with the last suffix removed (`hp`, `grid_1`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldValueMap {
    values:    IndexMap<String, String>,
    sequences: IndexMap<String, Vec<String>>,
}

impl FieldValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a direct value. A repeated path keeps its position and takes the
    /// newer value.
    pub fn insert(&mut self, path: &str, value: &str) {
        self.values.insert(path.to_owned(), value.to_owned());
    }

    /// Appends a value to the sequence grouped under `base`.
    pub fn push_indexed(&mut self, base: &str, value: &str) {
        self.sequences
            .entry(base.to_owned())
            .or_default()
            .push(value.to_owned());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    pub fn sequence(&self, base: &str) -> Option<&[String]> {
        self.sequences.get(base).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
