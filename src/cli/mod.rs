//! # cmdtree CLI
//!
//! Loads a tree definition and runs one subcommand against it.
//!
//! ## Module Structure
//!
//! - **`args`**: clap definitions
//! - **`output`**: colored and JSON rendering
//!
//! Logging goes to stderr and is filtered by `CMDTREE_LOG` (default `warn`).

use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::definition::TreeDefinition;
use crate::CommandError;

pub mod args;
pub mod output;

use args::{CmdTreeArgs, Command};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CMDTREE_LOG";

/// Entry point for the `cmdtree` binary.
pub fn run() {
    init_tracing();
    let args = CmdTreeArgs::parse();
    if let Err(err) = dispatch(args) {
        eprintln!("{:?}", miette::Report::new(err));
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(args: CmdTreeArgs) -> Result<(), CommandError> {
    let tree = TreeDefinition::from_path(&args.tree)?.build()?;
    debug!("loaded tree from {}", args.tree.display());

    match args.command {
        Command::Parse { input, json } => {
            let context = tree.parse(&input, args.source);
            if json {
                output::print_json(&output::ParseReport::from_context(&context));
            } else {
                output::print_context(&context);
            }
        }
        Command::Execute { input } => {
            let result = tree.execute(&input, args.source)?;
            println!("{result}");
        }
        Command::Suggest { input } => {
            for suggestion in tree.suggest(&input, args.source) {
                println!("{suggestion}");
            }
        }
        Command::Describe => output::print_tree(&tree),
    }
    Ok(())
}
