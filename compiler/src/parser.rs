use crate::{
    error::RestructError,
    tokenizer::{Token, TokenKind},
    utils::{malformed, quote},
};
use restruct_schema::{Definition, Field, SchemaRegistry};
use tracing::{debug, warn};

/// Collects every `typedef struct [Tag] { <fields> } Name;` in the token
/// stream. Tokens outside such blocks are skipped.
pub fn parse_schema(tokens: &[Token]) -> Result<SchemaRegistry, RestructError> {
    let mut registry = SchemaRegistry::new();
    let mut index = 0;

    fn current_token(tokens: &[Token], index: usize) -> Option<&Token> {
        tokens.get(index).filter(|tok| !tok.is(TokenKind::Eof))
    }

    fn eat_keyword(tokens: &[Token], index: &mut usize, keyword: &str) -> bool {
        match current_token(tokens, *index) {
            Some(tok) if tok.is_keyword(keyword) => {
                *index += 1;
                true
            }
            _ => false,
        }
    }

    fn eat(tokens: &[Token], index: &mut usize, kind: TokenKind) -> bool {
        match current_token(tokens, *index) {
            Some(tok) if tok.is(kind) => {
                *index += 1;
                true
            }
            _ => false,
        }
    }

    while current_token(tokens, index).is_some() {
        if !eat_keyword(tokens, &mut index, "typedef") {
            index += 1;
            continue;
        }
        if !eat_keyword(tokens, &mut index, "struct") {
            continue;
        }
        // Optional struct tag.
        if current_token(tokens, index).is_some_and(|tok| tok.is(TokenKind::Identifier)) {
            index += 1;
        }
        if !eat(tokens, &mut index, TokenKind::LeftBrace) {
            continue;
        }

        let mut fields = Vec::new();
        while let Some(tok) = current_token(tokens, index) {
            if tok.is(TokenKind::RightBrace) {
                break;
            }
            let start = index;
            while current_token(tokens, index)
                .is_some_and(|tok| !tok.is(TokenKind::Semicolon) && !tok.is(TokenKind::RightBrace))
            {
                index += 1;
            }
            let statement = &tokens[start..index];
            eat(tokens, &mut index, TokenKind::Semicolon);

            if let Some(field) = parse_field(statement) {
                fields.push(field);
            }
        }

        let Some(closing) = current_token(tokens, index) else {
            let last = &tokens[tokens.len() - 1];
            return Err(malformed("Expected \"}\" but reached end of input", last));
        };
        index += 1;

        let name_tok = match tokens.get(index) {
            Some(tok) if tok.is(TokenKind::Identifier) => tok,
            Some(tok) => {
                return Err(malformed(
                    &format!("Expected type name after \"}}\" but found {}", quote(&tok.text)),
                    tok,
                ))
            }
            None => return Err(malformed("Expected type name after \"}\"", closing)),
        };
        index += 1;
        eat(tokens, &mut index, TokenKind::Semicolon);

        debug!(name = %name_tok.text, fields = fields.len(), "parsed struct");
        let replaced = registry.insert(Definition {
            name:   name_tok.text.clone(),
            line:   name_tok.line,
            column: name_tok.column,
            fields,
        });
        if replaced.is_some() {
            warn!(name = %name_tok.text, "struct redefined, keeping the last definition");
        }
    }

    Ok(registry)
}

/// Splits one field statement (without its `;`) into name, type and
/// dimensions. Trailing `[n]` groups are peeled off right to left.
fn parse_field(statement: &[Token]) -> Option<Field> {
    let mut rest = statement;
    let mut dims = Vec::new();

    while let [head @ .., open, size, close] = rest {
        if !(open.is(TokenKind::LeftBracket)
            && size.is(TokenKind::Number)
            && close.is(TokenKind::RightBracket))
        {
            break;
        }
        let Ok(dim) = size.text.parse::<usize>() else { break };
        dims.insert(0, dim);
        rest = head;
    }

    let (name_tok, type_toks) = rest.split_last()?;
    if type_toks.is_empty() {
        debug!(name = %name_tok.text, "skipping field statement without a type");
        return None;
    }
    let type_ = type_toks
        .iter()
        .map(|tok| tok.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Some(Field {
        name: name_tok.text.clone(),
        type_,
        dims: if dims.is_empty() { None } else { Some(dims) },
    })
}
