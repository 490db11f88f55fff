//! Data model shared by the restruct compiler and SDK.
//!
//! A run of the remapper works on three build-once values: the
//! [SchemaRegistry](struct.SchemaRegistry.html) of the full struct layout, a
//! [ViewNode](enum.ViewNode.html) tree describing the output layout, and the
//! [FieldValueMap](struct.FieldValueMap.html) bridging the two.
//!
//! ```
//! use restruct_schema::*;
//!
//! let literal = LiteralNode::List(vec![
//!     LiteralNode::scalar("1"),
//!     LiteralNode::List(vec![LiteralNode::scalar("2"), LiteralNode::scalar("3")]),
//! ]);
//! assert_eq!(literal.flatten(), ["1", "2", "3"]);
//! assert_eq!(literal.to_string(), "{1, {2, 3}}");
//! ```

pub mod schema;
pub mod value;
pub mod view;

pub use schema::*;
pub use value::*;
pub use view::*;
