use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_REGEX: Regex = Regex::new(concat!(
        r#"(?P<string>"(?:\\.|[^"\\])*")"#,
        r"|(?P<number>'(?:\\.|[^'\\\n])+'|-?(?:0[xX][0-9A-Fa-f]+|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)[uUlLfF]*)",
        r"|(?P<ident>[A-Za-z_]\w*)",
        r"|(?P<punct>[{}\[\];,()=.])",
        r"|(?P<space>\s+)",
        r"|(?P<other>(?s:.))",
    ))
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Number,
    Str,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    LeftParen,
    RightParen,
    Equals,
    Dot,
    Eof,
}

impl TokenKind {
    fn from_punct(c: char) -> TokenKind {
        match c {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '=' => TokenKind::Equals,
            _ => TokenKind::Dot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind:   TokenKind,
    pub text:   String,
    pub line:   usize,
    pub column: usize,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == keyword
    }
}

/// Splits `text` into tokens, always ending with a single `Eof` token.
///
/// Lexing never fails: characters outside the token grammar are dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;

    for caps in TOKEN_REGEX.captures_iter(text) {
        let Some(part) = caps.get(0) else { continue };
        let part = part.as_str();

        let kind = if caps.name("string").is_some() {
            Some(TokenKind::Str)
        } else if caps.name("number").is_some() {
            Some(TokenKind::Number)
        } else if caps.name("ident").is_some() {
            Some(TokenKind::Identifier)
        } else if caps.name("punct").is_some() {
            part.chars().next().map(TokenKind::from_punct)
        } else {
            None
        };

        if let Some(kind) = kind {
            tokens.push(Token {
                kind,
                text: part.to_owned(),
                line,
                column,
            });
        }

        let newline_count = part.matches('\n').count();
        if newline_count > 0 {
            line += newline_count;
            if let Some(last_line_part) = part.split('\n').last() {
                column = last_line_part.chars().count() + 1;
            }
        } else {
            column += part.chars().count();
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        line,
        column,
    });
    tokens
}
