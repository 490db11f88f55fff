use crate::{error::RestructError, tokenizer::Token};

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn malformed(msg: &str, token: &Token) -> RestructError {
    RestructError::MalformedSchema {
        msg:    msg.to_owned(),
        line:   token.line,
        column: token.column,
    }
}

/// Joins an output prefix and a name with `_`, or returns the name at the root.
pub fn join_prefix(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{}_{}", prefix, name)
    }
}
