//! Defines the command-line arguments and subcommands for the solast CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "solast",
    version,
    about = "Parse Solidity source into a serializable abstract syntax tree."
)]
pub struct SolastArgs {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides it.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the AST of a Solidity file.
    Ast {
        /// The path to the Solidity file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// Serialization format.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Emit JSON on a single line.
        #[arg(long)]
        compact: bool,
        /// Reject sources whose syntax tree is nested deeper than this.
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Parse every .sol file under a path and report the ones with errors.
    Check {
        /// A Solidity file or a directory to search.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Dump the concrete syntax tree of a Solidity file.
    Cst {
        /// The path to the Solidity file to parse.
        #[arg(required = true)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}
