//! # Tokenizer / Lexer
//!
//! Turns an input sequence of bytes from a JSON document into a
//! position-annotated token stream.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::tokenize;
pub use token::{Position, Token, TokenKind};
