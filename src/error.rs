//! Error types for JSON parsing.
//!
//! The union engine is total and has no error type of its own; type
//! incompatibility between samples is reported in-band as a conflict
//! `Null` value, not as an error.
use thiserror::Error;

/// Errors that can occur while turning bytes into a [`crate::ast::Value`].
///
/// All positions are 1-based and refer to the original input. Messages
/// render as `filename:line:column: description`.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The byte stream itself is malformed (unterminated string, invalid
    /// escape, truncated literal, malformed number, invalid character).
    #[error("{filename}:{line}:{column}: {message}")]
    Lex {
        filename: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A well-formed token appeared where the grammar does not allow it,
    /// or the input ended inside an open `{` or `[`.
    #[error("{filename}:{line}:{column}: unexpected token \"{token}\"{}", render_expected(.expected.as_deref()))]
    Syntax {
        filename: String,
        line: usize,
        column: usize,
        token: String,
        expected: Option<String>,
    },

    /// Reading the input stream failed before parsing could finish.
    #[error("{filename}: {source}")]
    Io {
        filename: String,
        source: std::io::Error,
    },
}

fn render_expected(expected: Option<&str>) -> String {
    expected.map_or_else(String::new, |e| format!(" (expected \"{e}\")"))
}
