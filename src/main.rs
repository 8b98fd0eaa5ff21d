use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use monkey_runtime as runtime;

use runtime::script::{self, Event, Outcome};

#[derive(ClapParser, Debug)]
#[command(version, about = "Inspect how names resolve to scope slots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,

    /// Print symbols as JSON, one object per line
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a scope script, printing every definition and resolution
    Resolve { filename: Option<PathBuf> },

    /// Runs a scope script and prints the final global frame
    Dump { filename: Option<PathBuf> },
}

/// Reads the contents of a file into a String
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'monkey_runtime::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("monkey_runtime::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn print_event(event: &Event, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    match event {
        Event::Defined { symbol } => println!("define  {}", symbol),
        Event::Resolved { symbol } => println!("resolve {}", symbol),
        Event::Entered { depth } => println!("enter   depth {}", depth),
        Event::Left {
            depth,
            num_definitions,
            free,
        } => {
            println!("leave   depth {} locals {}", depth, num_definitions);
            for (i, symbol) in free.iter().enumerate() {
                println!("  free {} <- {}", i, symbol);
            }
        }
    }
    Ok(())
}

/// Runs the script in `filename`, exiting with 65 on a bad script or an
/// unresolved name.
fn run_script(filename: PathBuf) -> Result<Outcome> {
    let source = read_file(filename)?;

    match script::run(&source) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            debug!("Script debug: {}", e);
            eprintln!("{}", e);
            std::process::exit(65);
        }
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Resolve { filename } => match filename {
            Some(filename) => {
                info!("Running Resolve subcommand");
                let outcome = run_script(filename)?;

                for event in &outcome.events {
                    print_event(event, args.json)?;
                }

                info!("Resolve subcommand completed");
            }
            None => {
                info!("No filepath provided for Resolve");
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Dump { filename } => match filename {
            Some(filename) => {
                info!("Running Dump subcommand");
                let outcome = run_script(filename)?;
                for line in script::dump_lines(outcome.table.global(), args.json)? {
                    println!("{}", line);
                }

                info!("Dump subcommand completed");
            }
            None => {
                info!("No filepath provided for Dump");
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },
    }

    Ok(())
}
