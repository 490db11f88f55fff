use restruct_compiler::{extract_declarations, literal::parse_literal, MappingTable, Pipeline, RestructError};
use restruct_schema::{FieldValueMap, LiteralNode, SchemaRegistry, ViewNode};
use serde::Serialize;

/// Snapshot of every intermediate stage of a pipeline.
#[derive(Debug, Serialize)]
pub struct Inspection<'a> {
    pub struct_name: &'a str,
    pub view_name:   &'a str,
    pub schema:      &'a SchemaRegistry,
    pub view:        &'a ViewNode,
    pub mapping:     &'a MappingTable,
    pub flat_names:  &'a [String],
    /// Field map of the first instance found in the initializer text, if any.
    pub field_map:   Option<FieldValueMap>,
}

impl<'a> Inspection<'a> {
    pub fn new(pipeline: &'a Pipeline, init_text: Option<&str>) -> Result<Self, RestructError> {
        let field_map = match init_text {
            Some(text) => {
                let declarations = extract_declarations(text, pipeline.struct_name());
                let declaration = declarations
                    .first()
                    .ok_or_else(|| RestructError::MissingInstance(pipeline.struct_name().to_owned()))?;
                let literal = parse_literal(&declaration.init_block);
                let instance = first_instance(&literal);
                Some(pipeline.field_map(instance)?)
            }
            None => None,
        };

        Ok(Inspection {
            struct_name: pipeline.struct_name(),
            view_name: pipeline.view_name(),
            schema: pipeline.schema(),
            view: pipeline.view(),
            mapping: pipeline.mapping(),
            flat_names: pipeline.flat_names(),
            field_map,
        })
    }
}

/// The first element of an array-of-structs literal, or the literal itself.
fn first_instance(literal: &LiteralNode) -> &LiteralNode {
    match literal.as_list() {
        Some([first, ..]) if literal.is_list_of_lists() => first,
        _ => literal,
    }
}

/// Pretty-printed JSON of [`Inspection`].
pub fn dump_to_json(pipeline: &Pipeline, init_text: Option<&str>) -> Result<String, RestructError> {
    let inspection = Inspection::new(pipeline, init_text)?;
    Ok(serde_json::to_string_pretty(&inspection)?)
}
