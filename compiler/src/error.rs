use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestructError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed schema at line {line}, column {column}: {msg}")]
    MalformedSchema {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Initializer has {found} values but the schema expects {expected}")]
    SchemaMismatch {
        expected: usize,
        found:    usize,
    },

    #[error("No initializer found for type \"{0}\"")]
    MissingInstance(String),

    #[error("The type \"{0}\" is not defined")]
    UnknownType(String),

    #[error("Recursive nesting of \"{0}\" is not allowed")]
    RecursiveType(String),
}

impl RestructError {
    /// Per-instance failures that batch processing skips instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RestructError::SchemaMismatch { .. })
    }
}
