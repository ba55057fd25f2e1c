//! Lexer for Aurora
//!
//! Converts source code into a fully materialized token stream, tracking
//! 1-indexed line and column positions for diagnostics.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result};

/// The lexer state
pub struct Lexer {
    /// Source code as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Current line, 1-indexed
    line: usize,
    /// Current column, 1-indexed, reset after each newline
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance to the next character, updating line/column
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Skip whitespace; newlines advance the line counter. Only the four
    /// recognized whitespace characters are skipped, anything else (NBSP,
    /// vertical tab) falls through to the symbol rules and errors there.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Read an identifier or keyword
    fn read_word(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::classify_word(&text);
        Token::new(kind, text, line, column)
    }

    /// Read a number literal (unsigned decimal integers only)
    fn read_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, text, line, column)
    }

    /// Read a string literal
    ///
    /// The closing quote is consumed and excluded from the token text. No
    /// escape translation happens, but a backslash keeps the following
    /// character raw so `\"` does not terminate the literal.
    fn read_string(&mut self) -> Result<Token> {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote

        let mut text = String::new();
        loop {
            match self.peek() {
                None => return Err(Error::UnterminatedString { line, column }),
                Some('"') => {
                    self.advance(); // closing quote
                    break;
                }
                Some('\\') => {
                    text.push('\\');
                    self.advance();
                    if let Some(c) = self.peek() {
                        text.push(c);
                        self.advance();
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token::new(TokenKind::String, text, line, column))
    }

    /// Read a symbol token; `->` is the only multi-character symbol
    fn read_symbol(&mut self) -> Result<Token> {
        let (line, column) = (self.line, self.column);
        let c = self.peek().expect("read_symbol called at end of input");

        if c == '-' && self.peek_next() == Some('>') {
            self.advance();
            self.advance();
            return Ok(Token::new(TokenKind::Symbol, "->", line, column));
        }

        if is_symbol_char(c) {
            self.advance();
            return Ok(Token::new(TokenKind::Symbol, c, line, column));
        }

        Err(Error::UnrecognizedCharacter { ch: c, line, column })
    }

    /// Tokenize the entire source
    ///
    /// Always ends with exactly one `EndOfInput` token on success.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                tokens.push(Token::eof(self.line, self.column));
                return Ok(tokens);
            }

            let c = self.peek().expect("not at end of input");
            let token = if c.is_alphabetic() || c == '_' {
                self.read_word()
            } else if c.is_ascii_digit() {
                self.read_number()
            } else if c == '"' {
                self.read_string()?
            } else {
                self.read_symbol()?
            };
            tokens.push(token);
        }
    }
}

/// Characters valid as single-character symbol tokens
fn is_symbol_char(c: char) -> bool {
    matches!(
        c,
        '{' | '}'
            | '('
            | ')'
            | '['
            | ']'
            | '.'
            | ','
            | ':'
            | ';'
            | '='
            | '+'
            | '-'
            | '*'
            | '/'
            | '<'
            | '>'
            | '%'
            | '!'
            | '&'
            | '|'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().expect("lexing should succeed")
    }

    #[test]
    fn test_actor_header_tokens() {
        let tokens = lex("actor Counter { }");

        assert_eq!(tokens.len(), 5);
        assert!(tokens[0].is_keyword("actor"));
        assert!(tokens[1].is(TokenKind::Identifier, "Counter"));
        assert!(tokens[2].is_symbol("{"));
        assert!(tokens[3].is_symbol("}"));
        assert_eq!(tokens[4].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_arrow_is_single_token() {
        let tokens = lex("-> - >");

        assert!(tokens[0].is_symbol("->"));
        assert!(tokens[1].is_symbol("-"));
        assert!(tokens[2].is_symbol(">"));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = lex("actor A {\n  func f\n}");

        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 7));
        assert_eq!((tokens[2].line, tokens[2].column), (1, 9));
        // column resets to 1 after the newline
        assert_eq!((tokens[3].line, tokens[3].column), (2, 3));
        assert_eq!((tokens[4].line, tokens[4].column), (2, 8));
        assert_eq!((tokens[5].line, tokens[5].column), (3, 1));
    }

    #[test]
    fn test_string_literal() {
        let tokens = lex(r#"log("Unhandled message: " + msg);"#);

        assert!(tokens[0].is_keyword("log"));
        assert!(tokens[1].is_symbol("("));
        assert!(tokens[2].is(TokenKind::String, "Unhandled message: "));
        assert!(tokens[3].is_symbol("+"));
        assert!(tokens[4].is(TokenKind::Identifier, "msg"));
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let tokens = lex(r#""a\"b""#);

        assert!(tokens[0].is(TokenKind::String, r#"a\"b"#));
        assert_eq!(tokens[1].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_unterminated_string_position() {
        let err = Lexer::new("let s = \"abc").tokenize().unwrap_err();

        assert_eq!(
            err,
            Error::UnterminatedString { line: 1, column: 9 }
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let err = Lexer::new("actor A\n  #").tokenize().unwrap_err();

        assert_eq!(
            err,
            Error::UnrecognizedCharacter {
                ch: '#',
                line: 2,
                column: 3
            }
        );
    }

    #[test]
    fn test_unicode_whitespace_is_not_skipped() {
        // only space, tab, CR and newline separate tokens
        let err = Lexer::new("actor\u{a0}A").tokenize().unwrap_err();

        assert_eq!(
            err,
            Error::UnrecognizedCharacter {
                ch: '\u{a0}',
                line: 1,
                column: 6
            }
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("let count: Int = 0;");

        assert!(tokens[0].is_keyword("let"));
        assert!(tokens[1].is(TokenKind::Identifier, "count"));
        assert!(tokens[2].is_symbol(":"));
        assert!(tokens[3].is(TokenKind::Identifier, "Int"));
        assert!(tokens[4].is_symbol("="));
        assert!(tokens[5].is(TokenKind::Number, "0"));
        assert!(tokens[6].is_symbol(";"));
    }

    #[test]
    fn test_underscore_starts_identifier() {
        let tokens = lex("_tmp1");

        assert!(tokens[0].is(TokenKind::Identifier, "_tmp1"));
    }

    #[test]
    fn test_empty_source() {
        let tokens = lex("");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
    }
}
