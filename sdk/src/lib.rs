//! restruct
//!
//! Runtime entry points for reshaping C struct initializers.
//!
//! - `convert_single` / `convert_batch` over the declarations found in a text
//! - `merge_declarations` to patch rendered declarations into an existing header
//! - `dump_to_json` for a readable view of every intermediate stage

pub mod batch;
pub mod inspect;
pub mod merge;

pub use batch::{convert_batch, convert_single};
pub use inspect::{dump_to_json, Inspection};
pub use merge::merge_declarations;

pub use restruct_compiler::{
    compile_schema, compile_view_schema, extract_declarations, ArraySize, Declaration,
    MappingTable, Pipeline, RenderOptions, RestructError,
};
pub use restruct_schema::{Definition, Field, FieldValueMap, LiteralNode, SchemaRegistry, ViewNode};

pub mod error {
    pub use restruct_compiler::error::RestructError;
}

pub mod schema {
    pub use restruct_schema::{Definition, Field, FieldValueMap, LiteralNode, SchemaRegistry, ViewNode};
}
