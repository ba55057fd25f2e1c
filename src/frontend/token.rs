//! Token definitions for Aurora

use serde::Serialize;

/// The fixed Aurora keyword set. Immutable, process-wide; anything else that
/// lexes like an identifier is an `Identifier`.
pub const KEYWORDS: [&str; 11] = [
    "actor",
    "supervisor",
    "func",
    "let",
    "var",
    "on",
    "spawn",
    "log",
    "restart",
    "message",
    "return",
];

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-indexed line of the lexeme's first character
    pub line: usize,
    /// 1-indexed column of the lexeme's first character
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(TokenKind::EndOfInput, "", line, column)
    }

    /// Check kind and exact text in one go
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_symbol(&self, text: &str) -> bool {
        self.is(TokenKind::Symbol, text)
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.is(TokenKind::Keyword, text)
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Variable, actor, function names
    Identifier,
    /// One of [`KEYWORDS`], matched case-sensitively
    Keyword,
    /// Punctuation and operators; `->` is a single symbol
    Symbol,
    /// Unsigned decimal integer literal
    Number,
    /// String literal (quotes not included in `text`)
    String,
    /// End of input marker, exactly one per token stream
    EndOfInput,
}

impl TokenKind {
    /// Classify an identifier-shaped lexeme as keyword or identifier
    pub fn classify_word(text: &str) -> TokenKind {
        if KEYWORDS.contains(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}
