use serde::Serialize;

/// Output shape of a view struct, resolved recursively through the view
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewNode {
    /// A primitive type that is not expanded further.
    Leaf(String),
    /// Struct fields in declaration order.
    Object(Vec<(String, ViewNode)>),
    /// A fixed-size array of `child`.
    ArrayOf { size: usize, child: Box<ViewNode> },
}

impl ViewNode {
    pub fn leaf(type_: &str) -> Self {
        ViewNode::Leaf(type_.to_owned())
    }

    pub fn array_of(size: usize, child: ViewNode) -> Self {
        ViewNode::ArrayOf { size, child: Box::new(child) }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ViewNode::Leaf(_))
    }

    /// Number of scalar positions the rendered initializer will contain.
    pub fn leaf_count(&self) -> usize {
        match self {
            ViewNode::Leaf(_) => 1,
            ViewNode::Object(fields) => fields.iter().map(|(_, child)| child.leaf_count()).sum(),
            ViewNode::ArrayOf { size, child } => size * child.leaf_count(),
        }
    }
}
