//! Aurora Compiler
//!
//! Front end for the Aurora actor-model description language.

mod codegen;
mod frontend;
mod utils;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use frontend::ast::Declaration;
use frontend::lexer::Lexer;
use frontend::parser::Parser as AuroraParser;

/// Aurora Compiler
#[derive(Parser, Debug)]
#[command(name = "aurorac")]
#[command(version = "0.1.0")]
#[command(about = "Aurora compiler - front end for an actor-model description language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file (.aur)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the token stream before parsing
    #[arg(long)]
    emit_tokens: bool,

    /// Print the parsed declarations as JSON instead of generated source
    #[arg(long)]
    emit_ast: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a source file for errors
    Check {
        /// Input source file
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Check { input }) => check_file(input),
        None => match &cli.input {
            Some(input) => compile_file(input, cli.emit_tokens, cli.emit_ast),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: aurorac <FILE> or aurorac check <FILE>");
                process::exit(1);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Compile a source file and print the generated output
fn compile_file(input: &Path, emit_tokens: bool, emit_ast: bool) -> anyhow::Result<()> {
    let declarations = parse_file(input, emit_tokens)?;

    if emit_ast {
        println!("{}", serde_json::to_string_pretty(&declarations)?);
        return Ok(());
    }

    // The structural statement pass stays opt-in: declaration parsing keeps
    // every body opaque, and the driver demonstrates the second pass on the
    // entry function for diagnostics only.
    for declaration in &declarations {
        if let Declaration::Function(function) = declaration {
            if function.name == "main" {
                let statements =
                    AuroraParser::from_block(&function.body).parse_statements()?;
                log::debug!("entry function: {} statement(s)", statements.len());
            }
        }
    }

    print!("{}", codegen::emit_source(&declarations));
    Ok(())
}

/// Check a source file for errors without generating output
fn check_file(input: &Path) -> anyhow::Result<()> {
    parse_file(input, false)?;
    println!("{}: no errors found", input.display());
    Ok(())
}

fn parse_file(input: &Path, emit_tokens: bool) -> anyhow::Result<Vec<Declaration>> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("could not read {}", input.display()))?;

    let tokens = Lexer::new(&source).tokenize()?;
    log::debug!("lexed {} token(s)", tokens.len());

    if emit_tokens {
        for token in &tokens {
            println!(
                "{}:{}: {} '{}'",
                token.line, token.column, token.kind, token.text
            );
        }
    }

    let declarations = AuroraParser::from_tokens(tokens).parse()?;
    log::debug!("parsed {} declaration(s)", declarations.len());
    for declaration in &declarations {
        log::debug!("  declaration: {}", declaration.name());
    }

    Ok(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontend::ast::{Member, Stmt};

    /// The counter/supervisor sample program, with keyword parameter names
    /// renamed (`actor` is a keyword and cannot name a handler parameter).
    const SAMPLE: &str = r#"
        actor Counter {
            let count: Int = 0;

            func increment() -> Int {
                count = count + 1;
                return count;
            }

            on unknown(msg) {
                log("Unhandled message: " + msg);
            }
        }

        supervisor CounterSupervisor {
            var counter: Counter;

            func start() -> Void {
                counter = spawn(Counter);
            }

            on error(who, err) {
                log("Error in " + who + ": " + err);
                restart(who);
            }
        }

        func main() -> Void {
            let sup = spawn(CounterSupervisor);
            sup.send(message: { a in c.increment() });
        }
        "#;

    #[test]
    fn test_compile_sample_program() {
        let tokens = Lexer::new(SAMPLE).tokenize().unwrap();
        let declarations = AuroraParser::from_tokens(tokens).parse().unwrap();

        let names: Vec<&str> = declarations.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["Counter", "CounterSupervisor", "main"]);

        let actor = match &declarations[0] {
            Declaration::Actor(actor) => actor,
            other => panic!("expected actor, got {other:?}"),
        };
        assert!(matches!(&actor.members[0], Member::Opaque(_)));
        assert!(matches!(&actor.members[1], Member::Function(_)));
        assert!(matches!(&actor.members[2], Member::EventHandler(_)));

        // the statement pass the driver runs over the entry function
        let entry = match &declarations[2] {
            Declaration::Function(function) => function,
            other => panic!("expected function, got {other:?}"),
        };
        let statements = AuroraParser::from_block(&entry.body)
            .parse_statements()
            .unwrap();
        assert_eq!(statements.len(), 2);
        // `let sup = spawn(...)` has a multi-token initializer, so it stays
        // opaque; the closure-style send is recognized structurally
        assert!(matches!(&statements[0], Stmt::Opaque(_)));
        assert!(matches!(
            &statements[1],
            Stmt::SupervisorSend { target, source_method, .. }
                if target.as_str() == "sup" && source_method.as_str() == "increment"
        ));

        // the rendered output compiles again to the same program shape
        let rendered = codegen::emit_source(&declarations);
        let reparsed = AuroraParser::from_tokens(Lexer::new(&rendered).tokenize().unwrap())
            .parse()
            .unwrap();
        assert_eq!(codegen::emit_source(&reparsed), rendered);
    }
}
