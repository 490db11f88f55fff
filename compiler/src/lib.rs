//! restruct-compiler
//!
//! This crate implements:
//!  1) A tolerant tokenizer shared by header and initializer parsing,
//!  2) A `typedef struct` parser and a line-oriented view-header recognizer,
//!  3) A schema verifier (recursive nesting),
//!  4) Schema flattening with mapping-table overrides,
//!  5) Initializer literal parsing, field-map building and view rendering,
//!  6) Declaration extraction / rendering and the `Pipeline` tying it together,
//!  7) The error type (`RestructError`).

pub mod error;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod view;
pub mod verifier;
pub mod mapping;
pub mod flatten;
pub mod literal;
pub mod field_map;
pub mod gen_init;
pub mod declaration;
pub mod compiler;

pub use compiler::{compile_schema, compile_view_schema, Pipeline};
pub use declaration::{extract_declarations, ArraySize, Declaration, RenderOptions};
pub use error::RestructError;
pub use mapping::MappingTable;
