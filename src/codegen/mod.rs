//! Source renderer for parsed Aurora declarations
//!
//! Renders a declaration list back to Aurora syntax. Opaque token runs are
//! spelled out space-separated with string literals re-quoted, so the output
//! re-lexes to the same token text sequence the parser captured.

use crate::frontend::ast::{Declaration, EventHandler, Function, Member, Param};
use crate::frontend::token::{Token, TokenKind};

/// Render a declaration sequence as Aurora source text
pub fn emit_source(declarations: &[Declaration]) -> String {
    let mut out = String::new();
    for declaration in declarations {
        match declaration {
            Declaration::Actor(actor) => {
                emit_body(&mut out, "actor", &actor.name, &actor.members);
            }
            Declaration::Supervisor(supervisor) => {
                emit_body(&mut out, "supervisor", &supervisor.name, &supervisor.members);
            }
            Declaration::Function(function) => {
                emit_function(&mut out, function, "");
            }
        }
        out.push('\n');
    }
    out
}

fn emit_body(out: &mut String, keyword: &str, name: &str, members: &[Member]) {
    out.push_str(keyword);
    out.push(' ');
    out.push_str(name);
    out.push_str(" {\n");
    for member in members {
        match member {
            Member::Function(function) => emit_function(out, function, "    "),
            Member::EventHandler(handler) => emit_event_handler(out, handler),
            Member::Opaque(tokens) => {
                out.push_str("    ");
                out.push_str(&render_tokens(tokens));
                out.push('\n');
            }
        }
    }
    out.push_str("}\n");
}

fn emit_function(out: &mut String, function: &Function, indent: &str) {
    out.push_str(indent);
    out.push_str("func ");
    out.push_str(&function.name);
    out.push('(');
    out.push_str(&render_params(&function.params));
    out.push_str(") -> ");
    out.push_str(&function.return_type);
    out.push_str(" { ");
    out.push_str(&render_tokens(&function.body.tokens));
    out.push_str(" }\n");
}

fn emit_event_handler(out: &mut String, handler: &EventHandler) {
    out.push_str("    on ");
    out.push_str(&handler.event);
    out.push('(');
    out.push_str(&render_params(&handler.params));
    out.push_str(") { ");
    out.push_str(&render_tokens(&handler.body.tokens));
    out.push_str(" }\n");
}

fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| match &param.ty {
            Some(ty) => format!("{}: {}", param.name, ty),
            None => param.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(render_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_token(token: &Token) -> String {
    match token.kind {
        TokenKind::String => format!("\"{}\"", token.text),
        _ => token.text.clone(),
    }
}
