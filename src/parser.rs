/*!
# JSON Parser

Recursive-descent parser turning a token stream into a [`Value`] AST.

Grammar (object/array dispatch needs the delimiter *text*, not just the
delimiter kind, to tell `{` from `[`):

```text
Value   := False | Null | True | Object | Array | Number | String
Object  := '{' (Member (',' Member)*)? '}'
Member  := String ':' Value
Array   := '[' (Value (',' Value)*)? ']'
```

Parsing is total: any RFC 8259 document produces an AST mirroring its
structure; any other byte sequence produces a position-annotated error and
never a partial tree. The strings `"true"`, `"false"` and `"null"` parse as
[`Value::String`] — disambiguation is by token kind, never token text.

## Examples

```rust
use jsonshape::parser::parse;

let value = parse("sample.json", br#"{"id": 1, "tags": ["a"]}"#).expect("valid JSON");
assert!(value.is_object());
```

## Errors

Failed parses return a [`ParseError`] identifying the file, position, the
offending token, and (where a specific token was required) the expected one:

```rust
use jsonshape::parser::parse;

let err = parse("sample.json", b"{").unwrap_err();
assert_eq!(
    err.to_string(),
    r#"sample.json:1:2: unexpected token "<EOF>" (expected "}")"#
);
```
*/
use std::io::Read;

use crate::ast::{Literal, Member, Value};
use crate::error::ParseError;
use crate::tokenizer::{Token, TokenKind, tokenize};

/// Parse a complete JSON document from bytes.
///
/// `filename` is used in error messages only; no file is opened.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] for malformed bytes and [`ParseError::Syntax`]
/// for grammar violations, both carrying a 1-based position. Input after the
/// top-level value is a syntax error (expected `<EOF>`).
pub fn parse(filename: &str, bytes: &[u8]) -> Result<Value, ParseError> {
    let tokens = tokenize(filename, bytes)?;
    let mut parser = Parser {
        filename,
        tokens,
        position: 0,
    };
    let value = parser.parse_value()?;
    parser.expect_eof()?;
    Ok(value)
}

/// Parse a complete JSON document from a reader.
///
/// The reader is drained before parsing starts; incremental parsing of very
/// large documents is out of scope.
///
/// # Errors
///
/// As [`parse`], plus [`ParseError::Io`] if reading fails.
pub fn parse_reader<R: Read>(filename: &str, mut reader: R) -> Result<Value, ParseError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| ParseError::Io {
            filename: filename.to_string(),
            source,
        })?;
    parse(filename, &bytes)
}

/// Pull parser over a fully lexed token sequence. The sequence always ends
/// with an EOF token, `position` never advances past it.
struct Parser<'a> {
    filename: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl Parser<'_> {
    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn bump(&mut self) {
        if !self.current().is_eof() {
            self.position += 1;
        }
    }

    fn at_delim(&self, text: &str) -> bool {
        let token = self.current();
        token.kind == TokenKind::Delim && token.text == text
    }

    fn unexpected(&self, expected: Option<&str>) -> ParseError {
        let token = self.current();
        ParseError::Syntax {
            filename: self.filename.to_string(),
            line: token.pos.line,
            column: token.pos.column,
            token: token.to_string(),
            expected: expected.map(str::to_string),
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if self.current().is_eof() {
            Ok(())
        } else {
            Err(self.unexpected(Some("<EOF>")))
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::False => {
                self.bump();
                Ok(Value::False(Literal {
                    text: token.text,
                    nullable: false,
                }))
            }
            TokenKind::Null => {
                self.bump();
                Ok(Value::null())
            }
            TokenKind::True => {
                self.bump();
                Ok(Value::True(Literal {
                    text: token.text,
                    nullable: false,
                }))
            }
            TokenKind::Number => {
                self.bump();
                Ok(Value::Number(Literal {
                    text: token.text,
                    nullable: false,
                }))
            }
            TokenKind::String => {
                self.bump();
                Ok(Value::String(Literal {
                    text: token.text,
                    nullable: false,
                }))
            }
            TokenKind::Delim => match token.text.as_str() {
                "{" => self.parse_object(),
                "[" => self.parse_array(),
                _ => Err(self.unexpected(None)),
            },
            TokenKind::Eof => Err(self.unexpected(None)),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.bump(); // past '{'
        let mut members: Vec<Member> = vec![];

        if self.at_delim("}") {
            self.bump();
            return Ok(Value::object(members));
        }
        if self.current().kind != TokenKind::String {
            return Err(self.unexpected(Some("}")));
        }

        loop {
            members.push(self.parse_member()?);

            if self.at_delim(",") {
                self.bump();
            } else if self.at_delim("}") {
                self.bump();
                return Ok(Value::object(members));
            } else {
                return Err(self.unexpected(Some("}")));
            }
        }
    }

    fn parse_member(&mut self) -> Result<Member, ParseError> {
        let key = self.current().clone();
        if key.kind != TokenKind::String {
            return Err(self.unexpected(Some("string")));
        }
        self.bump();

        if !self.at_delim(":") {
            return Err(self.unexpected(Some(":")));
        }
        self.bump();

        let value = self.parse_value()?;
        Ok(Member {
            key: key.text,
            value,
        })
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.bump(); // past '['
        let mut elements: Vec<Value> = vec![];

        if self.at_delim("]") {
            self.bump();
            return Ok(Value::array(elements));
        }
        if self.current().is_eof() {
            return Err(self.unexpected(Some("]")));
        }

        loop {
            elements.push(self.parse_value()?);

            if self.at_delim(",") {
                self.bump();
            } else if self.at_delim("]") {
                self.bump();
                return Ok(Value::array(elements));
            } else {
                return Err(self.unexpected(Some("]")));
            }
        }
    }
}
