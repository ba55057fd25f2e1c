//! Concrete syntax tree definitions for Aurora
//!
//! The parser establishes declaration-level shape only: names, parameter
//! lists, and nesting. Statement interiors are captured as opaque token
//! sequences that a later stage may re-parse.
#![allow(dead_code)]

use serde::Serialize;

use crate::frontend::token::Token;

/// Top-level declarations, in source order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    Actor(Actor),
    Supervisor(Supervisor),
    Function(Function),
}

/// actor Name { members }
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    pub name: String,
    pub members: Vec<Member>,
}

/// supervisor Name { members }
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supervisor {
    pub name: String,
    pub members: Vec<Member>,
}

/// A member of an actor or supervisor body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Member {
    Function(Function),
    EventHandler(EventHandler),
    /// An unrecognized member (e.g. a field declaration), retained
    /// token-for-token rather than dropped
    Opaque(Vec<Token>),
}

/// func name(params) -> ReturnType { body }
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: String,
    pub body: OpaqueBlock,
}

/// on event(params) { body }
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventHandler {
    pub event: String,
    pub params: Vec<Param>,
    pub body: OpaqueBlock,
}

/// Function or handler parameter, with an optional type annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
}

/// The raw tokens between a body's opening and matching closing brace,
/// brace-depth balanced. Neither brace is included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpaqueBlock {
    pub tokens: Vec<Token>,
}

impl OpaqueBlock {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The body's token texts, for structural comparison across re-parses
    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Statement forms recognized when a body is parsed structurally instead of
/// captured opaquely
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// let name = value;
    Let { name: String, value: Token },
    /// target.method(message: { param in source_actor.source_method() });
    SupervisorSend {
        target: String,
        method: String,
        binding_param: String,
        source_actor: String,
        source_method: String,
    },
    /// Any other statement, consumed up to a `;` or balanced block
    Opaque(Vec<Token>),
}

impl Declaration {
    /// The declared name, for logging and diagnostics
    pub fn name(&self) -> &str {
        match self {
            Declaration::Actor(a) => &a.name,
            Declaration::Supervisor(s) => &s.name,
            Declaration::Function(f) => &f.name,
        }
    }
}
