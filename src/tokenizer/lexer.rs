//! # JSON Lexer
//!
//! Turns an input byte sequence from a JSON document into a sequence of
//! position-annotated tokens. Lexical validation (literals, RFC 8259
//! number grammar, string escapes) happens here; grammar validation is the
//! parser's job.
use crate::error::ParseError;
use crate::tokenizer::{Position, Token, TokenKind};

/// A lexer that can be used to parse an input slice of bytes from a JSON
/// document into tokens.
pub(crate) struct Lexer<'a> {
    /// Name of the input, used in error messages only
    filename: &'a str,
    /// The input sequence of bytes to tokenize
    input: &'a [u8],
    /// Current position (current byte)
    position: usize,
    /// Current reading position (after current byte)
    read_position: usize,
    /// Current byte under examination
    byte: u8,
    /// 1-based line of the current byte
    line: usize,
    /// 1-based column of the current byte
    column: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(filename: &'a str, input: &'a [u8]) -> Self {
        let mut lexer = Self {
            filename,
            input,
            position: 0,
            read_position: 0,
            byte: 0,
            line: 1,
            column: 1,
        };
        // put the lexer in an initial working state
        lexer.read_byte();
        lexer
    }

    /// Reads and consumes the next byte in the input sequence, advancing the
    /// line/column cursor past the byte being left behind.
    fn read_byte(&mut self) {
        if self.read_position > 0 {
            if self.byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        if self.read_position >= self.input.len() {
            self.byte = 0 // EOF
        } else {
            self.byte = self.input[self.read_position];
        }
        // Advance the positions
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// Consume whitespace byte(s) starting from the current position.
    fn skip_whitespace(&mut self) {
        while matches!(self.byte, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_byte();
        }
    }

    fn pos(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn error(&self, pos: Position, message: impl Into<String>) -> ParseError {
        ParseError::Lex {
            filename: self.filename.to_string(),
            line: pos.line,
            column: pos.column,
            message: message.into(),
        }
    }

    /// Returns the next token in the input sequence from the current
    /// position, or a lexical error annotated with the token's position.
    pub(crate) fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let pos = self.pos();

        match self.byte {
            0 if self.position >= self.input.len() => Ok(Token::eof(pos)),
            b'{' | b'}' | b'[' | b']' | b':' | b',' => {
                let text = char::from(self.byte).to_string();
                self.read_byte();
                Ok(Token {
                    kind: TokenKind::Delim,
                    text,
                    pos,
                })
            }
            b'"' => self.read_string(pos),
            b'-' | b'0'..=b'9' => self.read_number(pos),
            c if c.is_ascii_alphabetic() => self.read_literal(pos),
            other => Err(self.error(pos, format!("invalid character {:?}", char::from(other)))),
        }
    }

    /// Reads an alphabetic literal (`true`/`false`/`null`) and returns the
    /// corresponding token. Any other run of letters (e.g. a truncated
    /// `tru`) is a lexical error.
    fn read_literal(&mut self, pos: Position) -> Result<Token, ParseError> {
        let start_pos = self.position;
        while self.byte.is_ascii_alphabetic() {
            self.read_byte();
        }
        let slice = &self.input[start_pos..self.position];
        let kind = match slice {
            b"true" => TokenKind::True,
            b"false" => TokenKind::False,
            b"null" => TokenKind::Null,
            _ => {
                let text = String::from_utf8_lossy(slice);
                return Err(self.error(pos, format!("invalid literal \"{text}\"")));
            }
        };
        Ok(Token {
            kind,
            text: String::from_utf8_lossy(slice).into_owned(),
            pos,
        })
    }

    /// Reads a string value, resolving escape sequences, and returns the
    /// corresponding token.
    ///
    /// The closing quote is located with a simple backslash-skipping scan;
    /// decoding (and escape validation) of the quoted slice is delegated to
    /// `serde_json` rather than hand-rolled.
    fn read_string(&mut self, pos: Position) -> Result<Token, ParseError> {
        let start_pos = self.position;
        self.read_byte();
        while !matches!(self.byte, b'"') && self.position < self.input.len() {
            // escape sequence with backslash literal
            if self.byte == b'\\' {
                // skip the escaped character to avoid premature termination
                // with `\"`
                self.read_byte();
            }
            self.read_byte();
        }

        if self.byte != b'"' {
            // string not terminated, invalid
            return Err(self.error(pos, "unterminated string literal"));
        }

        let raw = &self.input[start_pos..=self.position];
        self.read_byte();

        let raw = std::str::from_utf8(raw)
            .map_err(|_| self.error(pos, "string literal is not valid UTF-8"))?;
        let text: String = serde_json::from_str(raw)
            .map_err(|err| self.error(pos, format!("invalid string literal: {err}")))?;

        Ok(Token {
            kind: TokenKind::String,
            text,
            pos,
        })
    }

    /// Reads a JSON number (int, frac, exp) per the RFC 8259 grammar and
    /// returns a Number token carrying the raw text.
    fn read_number(&mut self, pos: Position) -> Result<Token, ParseError> {
        let start_pos = self.position;

        // optional leading '-'
        if self.byte == b'-' {
            self.read_byte();
        }

        // integer part: a lone zero, or a nonzero digit run
        match self.byte {
            b'0' => {
                self.read_byte();
                if self.byte.is_ascii_digit() {
                    return Err(self.error(pos, "invalid number: leading zero"));
                }
            }
            b'1'..=b'9' => {
                while self.byte.is_ascii_digit() {
                    self.read_byte();
                }
            }
            _ => return Err(self.error(pos, "invalid number: expected digit")),
        }

        // fractional part
        if self.byte == b'.' {
            self.read_byte();
            if !self.byte.is_ascii_digit() {
                return Err(self.error(pos, "invalid number: expected digit after decimal point"));
            }
            while self.byte.is_ascii_digit() {
                self.read_byte();
            }
        }

        // exponent part
        if matches!(self.byte, b'e' | b'E') {
            self.read_byte();
            if matches!(self.byte, b'+' | b'-') {
                self.read_byte();
            }
            if !self.byte.is_ascii_digit() {
                return Err(self.error(pos, "invalid number: expected digit in exponent"));
            }
            while self.byte.is_ascii_digit() {
                self.read_byte();
            }
        }

        let slice = &self.input[start_pos..self.position];
        Ok(Token {
            kind: TokenKind::Number,
            text: String::from_utf8_lossy(slice).into_owned(),
            pos,
        })
    }
}

/// Tokenize a JSON document from bytes into tokens. The returned sequence
/// always ends with an EOF token.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] on the first malformed byte sequence,
/// annotated with the position where the offending token starts.
pub fn tokenize(filename: &str, text: &[u8]) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(filename, text);
    let mut tokens: Vec<Token> = vec![];

    loop {
        let token = lexer.next_token()?;
        let is_eof = token.is_eof();

        tokens.push(token);

        if is_eof {
            break;
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize("<test>", input.as_bytes())
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty() {
        let tokens = tokenize("<test>", b"").unwrap();
        assert_eq!(tokens, vec![Token::eof(Position::start())]);
    }

    #[test]
    fn test_literals() {
        let input = "null true false";
        assert_eq!(
            kinds(input),
            vec![
                TokenKind::Null,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_literal_text_retained() {
        let tokens = tokenize("<test>", b"true").unwrap();
        assert_eq!(tokens[0].text, "true");
        assert_eq!(tokens[0].pos, Position::start());
    }

    #[test]
    fn test_number_variants() {
        let cases = ["0", "-0", "123", "-123", "3.14", "0.001e-10", "2E+8"];
        for case in &cases {
            let tokens = tokenize("<test>", case.as_bytes()).unwrap();
            assert_eq!(tokens.len(), 2, "{case}");
            assert_eq!(tokens[0].kind, TokenKind::Number, "{case}");
            // raw text preserved exactly, no float conversion
            assert_eq!(tokens[0].text, *case, "{case}");
        }
    }

    #[test]
    fn test_invalid_numbers() {
        let cases = ["01", "-", "1.", "1e", "1e+", "-.5"];
        for case in &cases {
            let err = tokenize("<test>", case.as_bytes()).unwrap_err();
            assert!(
                err.to_string().contains("invalid number"),
                "{case}: {err}"
            );
        }
    }

    #[test]
    fn test_string_with_escape() {
        let tokens = tokenize("<test>", br#""hello\nworld\"!""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "hello\nworld\"!");
    }

    #[test]
    fn test_escape_sequences() {
        // All standard JSON escape sequences, see `char > escape`:
        // https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/JSON#full_json_grammar
        let cases = [
            (r#""Test \"quoted\" text""#, "Test \"quoted\" text"),
            (r#""Backslash: \\""#, "Backslash: \\"),
            (r#""Forward slash: \/""#, "Forward slash: /"),
            (r#""Backspace: \b""#, "Backspace: \u{8}"),
            (r#""Form feed: \f""#, "Form feed: \u{c}"),
            (r#""Newline: \n""#, "Newline: \n"),
            (r#""Carriage return: \r""#, "Carriage return: \r"),
            (r#""Tab: \t""#, "Tab: \t"),
            (r#""Unicode: ABC""#, "Unicode: ABC"),
            (r#""Mixed: \"\\\n\t ""#, "Mixed: \"\\\n\t "),
        ];

        for (input, expected) in &cases {
            let tokens = tokenize("<test>", input.as_bytes()).unwrap();
            assert_eq!(tokens.len(), 2);
            assert_eq!(tokens[0].text, *expected);
        }
    }

    #[test]
    fn test_invalid_escape() {
        let err = tokenize("<test>", br#""bad \x escape""#).unwrap_err();
        assert!(err.to_string().starts_with("<test>:1:1: invalid string"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("<test>", br#"{"key": "oops"#).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("<test>:1:9: unterminated string literal"),
            "{err}"
        );
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("<test>", b"@").unwrap_err();
        assert_eq!(err.to_string(), "<test>:1:1: invalid character '@'");
    }

    #[test]
    fn test_positions_across_lines() {
        let input = b"{\n  \"a\": 1\n}";
        let tokens = tokenize("<test>", input).unwrap();
        let positions: Vec<(usize, usize)> =
            tokens.iter().map(|t| (t.pos.line, t.pos.column)).collect();
        // `{`, "a", `:`, 1, `}`, EOF
        assert_eq!(
            positions,
            vec![(1, 1), (2, 3), (2, 6), (2, 8), (3, 1), (3, 2)]
        );
    }

    #[test]
    fn test_delimiter_text() {
        let tokens = tokenize("<test>", b"[{}]:,").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["[", "{", "}", "]", ":", ",", ""]);
        assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Delim));
    }
}
