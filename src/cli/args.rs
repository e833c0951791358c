//! Defines the command-line arguments and subcommands for the cmdtree CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "cmdtree",
    version,
    about = "Parse, run and complete commands against a declarative command tree."
)]
pub struct CmdTreeArgs {
    /// Tree definition file (`.json`, otherwise read as YAML).
    #[arg(short, long, required = true)]
    pub tree: PathBuf,

    /// Name handed to handlers as the command source.
    #[arg(short, long, default_value = "console")]
    pub source: String,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the slots a line of input parses into.
    Parse {
        /// The command line, quoted as one argument.
        #[arg(default_value = "", allow_hyphen_values = true)]
        input: String,
        /// Emit a JSON report instead of colored text.
        #[arg(long)]
        json: bool,
    },
    /// Parse a line and print what its handler returns.
    Execute {
        #[arg(default_value = "", allow_hyphen_values = true)]
        input: String,
    },
    /// List completions for the last token, one per line.
    Suggest {
        #[arg(default_value = "", allow_hyphen_values = true)]
        input: String,
    },
    /// Print the tree outline.
    Describe,
}
