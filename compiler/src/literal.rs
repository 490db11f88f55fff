use crate::tokenizer::{tokenize, Token, TokenKind};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use restruct_schema::LiteralNode;

lazy_static! {
    static ref COMMENT_RX: Regex =
        Regex::new(r#"(?s)"(?:\\.|[^"\\])*"|//[^\n]*|/\*.*?\*/"#).unwrap();
}

/// Removes `//` and `/* */` comments that are not inside string literals.
/// Each comment becomes a space, or its newlines when it spans lines.
pub fn strip_comments(text: &str) -> String {
    COMMENT_RX
        .replace_all(text, |caps: &Captures| {
            let part = &caps[0];
            if part.starts_with('"') {
                part.to_owned()
            } else if part.contains('\n') {
                "\n".repeat(part.matches('\n').count())
            } else {
                " ".to_owned()
            }
        })
        .into_owned()
}

/// Parses a brace-delimited initializer into a literal tree.
///
/// Only brace nesting and scalar leaves are kept; commas, designators and other
/// punctuation have no effect. Arity is not checked here.
pub fn parse_literal(text: &str) -> LiteralNode {
    let tokens = tokenize(&strip_comments(text));
    let mut parser = LiteralParser { tokens: &tokens, pos: 0 };
    parser.parse_value()
}

struct LiteralParser<'a> {
    tokens: &'a [Token],
    pos:    usize,
}

impl<'a> LiteralParser<'a> {
    fn peek(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::Eof, |tok| tok.kind)
    }

    fn text(&self) -> &'a str {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(self.pos).map_or("", |tok| tok.text.as_str())
    }

    fn parse_value(&mut self) -> LiteralNode {
        match self.peek(0) {
            TokenKind::LeftBrace => self.parse_list(),
            TokenKind::Eof => LiteralNode::List(Vec::new()),
            _ => self.parse_scalar(),
        }
    }

    fn parse_list(&mut self) -> LiteralNode {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            match self.peek(0) {
                TokenKind::Eof => break,
                TokenKind::RightBrace => {
                    self.pos += 1;
                    break;
                }
                TokenKind::LeftBrace => items.push(self.parse_list()),
                TokenKind::Number | TokenKind::Str | TokenKind::Identifier => {
                    items.push(self.parse_scalar())
                }
                // `.field =`
                TokenKind::Dot
                    if self.peek(1) == TokenKind::Identifier && self.peek(2) == TokenKind::Equals =>
                {
                    self.pos += 3
                }
                // `[index] =`
                TokenKind::LeftBracket
                    if self.peek(1) == TokenKind::Number
                        && self.peek(2) == TokenKind::RightBracket
                        && self.peek(3) == TokenKind::Equals =>
                {
                    self.pos += 4
                }
                _ => self.pos += 1,
            }
        }
        LiteralNode::List(items)
    }

    /// One scalar: a number, a dotted identifier chain, or adjacent string
    /// literals (which C concatenates into one value).
    fn parse_scalar(&mut self) -> LiteralNode {
        let kind = self.peek(0);
        let mut text = self.text().to_owned();
        self.pos += 1;

        match kind {
            TokenKind::Identifier => {
                while self.peek(0) == TokenKind::Dot && self.peek(1) == TokenKind::Identifier {
                    self.pos += 1;
                    text.push('.');
                    text.push_str(self.text());
                    self.pos += 1;
                }
            }
            TokenKind::Str => {
                while self.peek(0) == TokenKind::Str {
                    text.push(' ');
                    text.push_str(self.text());
                    self.pos += 1;
                }
            }
            _ => {}
        }

        LiteralNode::Scalar(text)
    }
}
