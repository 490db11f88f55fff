use indexmap::IndexMap;
use restruct_compiler::{extract_declarations, Pipeline, RenderOptions, RestructError};
use tracing::{info, warn};

/// Converts the first declaration of the pipeline's struct found in `text`.
///
/// Returns `MissingInstance` when there is none. A `SchemaMismatch` for the
/// instance is returned as is, so nothing partial is produced.
pub fn convert_single(pipeline: &Pipeline, text: &str, options: &RenderOptions) -> Result<String, RestructError> {
    let declarations = extract_declarations(text, pipeline.struct_name());
    let Some(declaration) = declarations.first() else {
        warn!(struct_name = pipeline.struct_name(), "no initializer found");
        return Err(RestructError::MissingInstance(pipeline.struct_name().to_owned()));
    };
    pipeline.convert(declaration, options)
}

/// Converts every declaration of the pipeline's struct found in `text`.
///
/// Declarations are independent: one that does not fit the schema is logged
/// and skipped. The result maps variable names to declaration text, in source
/// order. When `options.var_name` is set it is ignored here, since every
/// declaration keeps its own name.
pub fn convert_batch(
    pipeline: &Pipeline,
    text: &str,
    options: &RenderOptions,
) -> Result<IndexMap<String, String>, RestructError> {
    let declarations = extract_declarations(text, pipeline.struct_name());
    if declarations.is_empty() {
        return Err(RestructError::MissingInstance(pipeline.struct_name().to_owned()));
    }

    let options = RenderOptions { var_name: None, ..options.clone() };
    let mut converted = IndexMap::new();
    for declaration in &declarations {
        match pipeline.convert(declaration, &options) {
            Ok(text) => {
                converted.insert(declaration.var_name.clone(), text);
            }
            Err(err) if err.is_recoverable() => {
                warn!(var = %declaration.var_name, error = %err, "declaration does not match the schema, skipping");
            }
            Err(err) => return Err(err),
        }
    }

    info!(found = declarations.len(), converted = converted.len(), "batch conversion finished");
    Ok(converted)
}
