//! Parser for Aurora
//!
//! Recursive descent over the token stream with single-token lookahead.
//! Declarations are parsed structurally; statement interiors are captured
//! as brace-balanced opaque token sequences. A separate statement pass
//! ([`Parser::parse_statements`]) recognizes the two structural statement
//! forms inside a captured block.

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result};

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from a lexer
    pub fn new(mut lexer: Lexer) -> Result<Self> {
        Ok(Self::from_tokens(lexer.tokenize()?))
    }

    /// Create a parser from pre-tokenized input
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::EndOfInput) {
            let (line, column) = tokens
                .last()
                .map(|t| (t.line, t.column + t.text.chars().count()))
                .unwrap_or((1, 1));
            tokens.push(Token::eof(line, column));
        }
        Self { tokens, pos: 0 }
    }

    /// Create a statement parser over a previously captured opaque block
    pub fn from_block(block: &OpaqueBlock) -> Self {
        Self::from_tokens(block.tokens.clone())
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens.last().expect("token stream always holds EndOfInput")
        })
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::EndOfInput
    }

    /// Build the error for the current token not matching an expectation.
    /// `EndOfInput` maps to `UnexpectedEndOfInput`, anything else to
    /// `UnexpectedToken` with the offending token's position.
    fn unexpected(&self, expected: impl Into<String>) -> Error {
        let token = self.current();
        if token.kind == TokenKind::EndOfInput {
            Error::UnexpectedEndOfInput {
                expected: expected.into(),
                line: token.line,
                column: token.column,
            }
        } else {
            Error::UnexpectedToken {
                expected: expected.into(),
                got: format!("{} '{}'", token.kind, token.text),
                line: token.line,
                column: token.column,
            }
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    fn expect_text(&mut self, kind: TokenKind, text: &str) -> Result<Token> {
        if self.current().is(kind, text) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("'{text}'")))
        }
    }

    fn expect_symbol(&mut self, text: &str) -> Result<Token> {
        self.expect_text(TokenKind::Symbol, text)
    }

    fn expect_keyword(&mut self, text: &str) -> Result<Token> {
        self.expect_text(TokenKind::Keyword, text)
    }

    // ==================== Declarations ====================

    /// Parse a complete program: declarations until end of input
    pub fn parse(&mut self) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        while !self.is_at_end() {
            declarations.push(self.parse_declaration()?);
        }
        Ok(declarations)
    }

    fn parse_declaration(&mut self) -> Result<Declaration> {
        let token = self.current();
        if token.kind == TokenKind::Keyword {
            match token.text.as_str() {
                "actor" => return Ok(Declaration::Actor(self.parse_actor()?)),
                "supervisor" => return Ok(Declaration::Supervisor(self.parse_supervisor()?)),
                "func" => return Ok(Declaration::Function(self.parse_function()?)),
                _ => {}
            }
        }
        Err(self.unexpected("declaration ('actor', 'supervisor' or 'func')"))
    }

    fn parse_actor(&mut self) -> Result<Actor> {
        self.expect_keyword("actor")?;
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("{")?;
        let members = self.parse_members()?;
        self.expect_symbol("}")?;
        Ok(Actor { name, members })
    }

    fn parse_supervisor(&mut self) -> Result<Supervisor> {
        self.expect_keyword("supervisor")?;
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("{")?;
        let members = self.parse_members()?;
        self.expect_symbol("}")?;
        Ok(Supervisor { name, members })
    }

    /// Parse members until the enclosing body's closing brace.
    ///
    /// Unrecognized members (field declarations and the like) are retained
    /// as opaque token runs, never dropped.
    fn parse_members(&mut self) -> Result<Vec<Member>> {
        let mut members = Vec::new();
        loop {
            let token = self.current();
            if token.is_symbol("}") {
                return Ok(members);
            }
            if token.kind == TokenKind::EndOfInput {
                return Err(self.unexpected("'}'"));
            }
            if token.is_keyword("func") {
                members.push(Member::Function(self.parse_function()?));
            } else if token.is_keyword("on") {
                members.push(Member::EventHandler(self.parse_event_handler()?));
            } else {
                members.push(Member::Opaque(self.capture_opaque()?));
            }
        }
    }

    fn parse_function(&mut self) -> Result<Function> {
        self.expect_keyword("func")?;
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("(")?;
        let params = self.parse_parameters()?;
        self.expect_symbol(")")?;
        self.expect_symbol("->")?;
        let return_type = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("{")?;
        let body = self.capture_block()?;
        Ok(Function {
            name,
            params,
            return_type,
            body,
        })
    }

    fn parse_event_handler(&mut self) -> Result<EventHandler> {
        self.expect_keyword("on")?;
        let event = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("(")?;
        let params = self.parse_parameters()?;
        self.expect_symbol(")")?;
        self.expect_symbol("{")?;
        let body = self.capture_block()?;
        Ok(EventHandler { event, params, body })
    }

    /// Parse a comma-separated parameter list up to (not including) `)`.
    /// Each parameter is a name with an optional `: Type` annotation; the
    /// empty list is valid.
    fn parse_parameters(&mut self) -> Result<Vec<Param>> {
        let mut params = Vec::new();
        while !self.current().is_symbol(")") {
            if self.is_at_end() {
                return Err(self.unexpected("')'"));
            }
            let name = self.expect(TokenKind::Identifier)?.text;
            let ty = if self.current().is_symbol(":") {
                self.advance();
                Some(self.expect(TokenKind::Identifier)?.text)
            } else {
                None
            };
            params.push(Param { name, ty });
            if self.current().is_symbol(",") {
                self.advance();
                // no trailing comma: another parameter must follow
                if self.current().is_symbol(")") {
                    return Err(self.unexpected("parameter name"));
                }
            } else if !self.current().is_symbol(")") {
                return Err(self.unexpected("',' or ')'"));
            }
        }
        Ok(params)
    }

    // ==================== Opaque Capture ====================

    /// Capture a function or handler body whose opening `{` has already
    /// been consumed. Depth starts at 1; `{` increments, `}` decrements,
    /// and collection stops exactly when depth returns to 0. The final `}`
    /// is consumed as the terminator but not collected, so nested blocks
    /// inside the body are kept intact.
    fn capture_block(&mut self) -> Result<OpaqueBlock> {
        let mut tokens = Vec::new();
        let mut depth = 1usize;
        loop {
            if self.is_at_end() {
                return Err(self.unexpected("'}'"));
            }
            let token = self.advance();
            if token.is_symbol("{") {
                depth += 1;
            } else if token.is_symbol("}") {
                depth -= 1;
                if depth == 0 {
                    return Ok(OpaqueBlock::new(tokens));
                }
            }
            tokens.push(token);
        }
    }

    /// Capture one unrecognized member or statement: tokens up to and
    /// including a depth-0 `;`, or a fully balanced `{...}` block. A `}`
    /// at depth 0 belongs to the enclosing body and ends the capture
    /// without being consumed.
    fn capture_opaque(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            if self.is_at_end() {
                return Err(self.unexpected("';' or '}'"));
            }
            if depth == 0 && self.current().is_symbol("}") {
                return Ok(tokens);
            }
            let token = self.advance();
            let closes_block = token.is_symbol("}");
            let ends_statement = token.is_symbol(";");
            if token.is_symbol("{") {
                depth += 1;
            } else if closes_block {
                depth -= 1;
            }
            tokens.push(token);
            if depth == 0 && (closes_block || ends_statement) {
                return Ok(tokens);
            }
        }
    }

    // ==================== Statements ====================

    /// Parse the token stream as a statement sequence.
    ///
    /// This is the second pass over a captured body: `let` bindings and
    /// closure-style supervisor sends are recognized structurally, anything
    /// else becomes an opaque statement. Both forms are dispatched by
    /// bounded lookahead so that richer statements (multi-token `let`
    /// initializers, plain method calls) fall through to opaque capture
    /// instead of failing mid-statement.
    pub fn parse_statements(&mut self) -> Result<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Stmt> {
        // a close brace cannot start a statement; without this check an
        // unbalanced token slice would yield an empty capture and spin
        if self.current().is_symbol("}") {
            return Err(self.unexpected("statement"));
        }
        if self.looks_like_let_binding() {
            return self.parse_let();
        }
        if self.looks_like_supervisor_send() {
            return self.parse_supervisor_send();
        }
        Ok(Stmt::Opaque(self.capture_opaque()?))
    }

    /// `let` IDENT `=` <one token> `;`
    fn looks_like_let_binding(&self) -> bool {
        self.current().is_keyword("let")
            && self.peek(1).is_some_and(|t| t.kind == TokenKind::Identifier)
            && self.peek(2).is_some_and(|t| t.is_symbol("="))
            && self.peek(3).is_some_and(|t| t.kind != TokenKind::EndOfInput)
            && self.peek(4).is_some_and(|t| t.is_symbol(";"))
    }

    /// IDENT `.` IDENT `(` `message` ...
    fn looks_like_supervisor_send(&self) -> bool {
        self.current().kind == TokenKind::Identifier
            && self.peek(1).is_some_and(|t| t.is_symbol("."))
            && self.peek(2).is_some_and(|t| t.kind == TokenKind::Identifier)
            && self.peek(3).is_some_and(|t| t.is_symbol("("))
            && self.peek(4).is_some_and(|t| t.is_keyword("message"))
    }

    fn parse_let(&mut self) -> Result<Stmt> {
        self.expect_keyword("let")?;
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("=")?;
        let value = self.advance();
        self.expect_symbol(";")?;
        Ok(Stmt::Let { name, value })
    }

    /// target.method(message: { param in sourceActor.sourceMethod() });
    fn parse_supervisor_send(&mut self) -> Result<Stmt> {
        let target = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol(".")?;
        let method = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("(")?;
        self.expect_keyword("message")?;
        self.expect_symbol(":")?;
        self.expect_symbol("{")?;
        let binding_param = self.expect(TokenKind::Identifier)?.text;
        // `in` is not in the keyword set, it lexes as an identifier
        self.expect_text(TokenKind::Identifier, "in")?;
        let source_actor = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol(".")?;
        let source_method = self.expect(TokenKind::Identifier)?.text;
        self.expect_symbol("(")?;
        self.expect_symbol(")")?;
        self.expect_symbol("}")?;
        self.expect_symbol(")")?;
        self.expect_symbol(";")?;
        Ok(Stmt::SupervisorSend {
            target,
            method,
            binding_param,
            source_actor,
            source_method,
        })
    }
}
