//! Line-oriented *scope scripts* that drive a [`SymbolTable`] the way a
//! compiler would, used by the `scopes` tool to inspect the `(scope, index)`
//! operands a program would compile to.
//!
//! # Format
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! builtin 0 len   # define_builtin(0, "len")
//! define x        # define("x")           (alias: let)
//! fn              # enter_scope()
//! name counter    # define_function_name("counter")
//! resolve x       # resolve("x"), unknown names are an error
//! end             # leave_scope()
//! ```

use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::symbol_table::{Scope, Symbol, SymbolTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Define,
    Builtin,
    FunctionName,
    Enter,
    Leave,
    Resolve,
}

static COMMANDS: phf::Map<&'static str, Command> = phf_map! {
    "define"  => Command::Define,
    "let"     => Command::Define,
    "builtin" => Command::Builtin,
    "name"    => Command::FunctionName,
    "fn"      => Command::Enter,
    "end"     => Command::Leave,
    "resolve" => Command::Resolve,
};

/// What one script line did to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Defined { symbol: Symbol },

    Resolved { symbol: Symbol },

    Entered { depth: usize },

    Left {
        depth: usize,
        num_definitions: usize,
        free: Vec<Symbol>,
    },
}

/// Result of a complete script run.
#[derive(Debug)]
pub struct Outcome {
    pub events: Vec<Event>,
    pub table: SymbolTable,
}

/// Runs `source` against a fresh table. Stops at the first bad line or
/// unresolved name.
pub fn run(source: &str) -> Result<Outcome> {
    info!("Running scope script ({} bytes)", source.len());

    let mut table = SymbolTable::new();
    let mut events = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let text = match memchr(b'#', raw.as_bytes()) {
            Some(pos) => &raw[..pos],
            None => raw,
        };

        let words: Vec<&str> = text.split_whitespace().collect();
        let Some((head, args)) = words.split_first() else {
            continue;
        };

        let command = COMMANDS
            .get(*head)
            .copied()
            .ok_or_else(|| CoreError::script(line, format!("Unknown command '{}'", head)))?;

        debug!("Line {}: {:?} {:?}", line, command, args);

        let event = step(&mut table, command, args, line)?;
        events.push(event);
    }

    info!("Scope script produced {} event(s)", events.len());

    Ok(Outcome { events, table })
}

fn step(table: &mut SymbolTable, command: Command, args: &[&str], line: usize) -> Result<Event> {
    let event = match (command, args) {
        (Command::Define, [name]) => Event::Defined {
            symbol: table.define(name),
        },

        (Command::Builtin, [index, name]) => {
            let index: usize = index
                .parse()
                .map_err(|_| CoreError::script(line, format!("Invalid builtin index '{}'", index)))?;
            Event::Defined {
                symbol: table.define_builtin(index, name),
            }
        }

        (Command::FunctionName, [name]) => Event::Defined {
            symbol: table.define_function_name(name)?,
        },

        (Command::Enter, []) => {
            table.enter_scope();
            Event::Entered {
                depth: table.depth(),
            }
        }

        (Command::Leave, []) => {
            let depth = table.depth();
            let frame = table.leave_scope()?;
            Event::Left {
                depth,
                num_definitions: frame.num_definitions(),
                free: frame.free_symbols().to_vec(),
            }
        }

        (Command::Resolve, [name]) => Event::Resolved {
            symbol: table.resolve_or_err(name)?,
        },

        _ => {
            return Err(CoreError::script(
                line,
                format!("Wrong number of arguments ({}) for {:?}", args.len(), command),
            ))
        }
    };

    Ok(event)
}

/// Lines printed for a frame by `scopes dump`: one per binding, then the
/// definition count. JSON mode renders each line as an object.
pub fn dump_lines(frame: &Scope, json: bool) -> serde_json::Result<Vec<String>> {
    let mut lines = Vec::with_capacity(frame.len() + 1);

    for symbol in frame.symbols() {
        if json {
            lines.push(serde_json::to_string(symbol)?);
        } else {
            lines.push(symbol.to_string());
        }
    }

    if json {
        lines.push(serde_json::json!({ "definitions": frame.num_definitions() }).to_string());
    } else {
        lines.push(format!("definitions {}", frame.num_definitions()));
    }

    Ok(lines)
}
