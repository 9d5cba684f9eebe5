//! # JSON Token
//!
//! Defines the tokens produced by lexing a JSON document byte sequence,
//! along with their source positions.
use std::fmt::Display;

/// A 1-based line/column position within the input.
///
/// Columns count bytes; a newline advances the line counter and resets the
/// column to 1.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub column: usize,
}

impl Position {
    /// The position of the first byte of any input.
    #[must_use]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind of a lexed token.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum TokenKind {
    /// One of `{`, `}`, `[`, `]`, `:`, `,`. The token text tells which;
    /// the parser dispatches on the text, not just the kind.
    Delim,

    /// The literal `false`
    False,

    /// The literal `null`
    Null,

    /// The literal `true`
    True,

    /// A number, kept as its raw text (never converted to a float, so the
    /// original representation survives for downstream consumers)
    Number,

    /// A string; the token text is the *decoded* content with escape
    /// sequences resolved
    String,

    /// End of input. Distinguished token rather than an error.
    Eof,
}

/// A single token with its matched (or decoded) text and source position.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Position,
}

impl Token {
    /// The end-of-input token at the given position.
    #[must_use]
    pub const fn eof(pos: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            pos,
        }
    }

    /// Whether this token marks the end of input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<EOF>"),
            _ => write!(f, "{}", self.text),
        }
    }
}
