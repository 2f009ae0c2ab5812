//! The solast Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::error::Error;
use std::path::Path;
use std::{fs, process};

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use crate::cli::args::{Command, Format, SolastArgs};
use crate::config::ParserConfig;
use crate::errors::{io_error, print_error, PhaseContext, SolastError, SourceContext};
use crate::syntax::{parse_cst, SyntaxError};

pub mod args;
pub mod output;

/// `Ok(false)` means the command ran but the input had problems.
type CommandResult = Result<bool, Box<dyn Error>>;

/// The main entry point for the CLI.
pub fn run() {
    let args = SolastArgs::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Ast {
            file,
            format,
            compact,
            max_depth,
        } => handle_ast(&file, format, compact, max_depth),
        Command::Check { path } => handle_check(&path),
        Command::Cst { file } => handle_cst(&file),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            match error.downcast::<SolastError>() {
                Ok(error) => print_error(*error),
                Err(error) => eprintln!("Error: {}", error),
            }
            process::exit(1);
        }
    }
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "solast=warn",
        1 => "solast=debug",
        _ => "solast=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_ast(
    path: &Path,
    format: Format,
    compact: bool,
    max_depth: Option<usize>,
) -> CommandResult {
    let source = read_source(path)?;
    let mut config = ParserConfig::new().with_source_name(path.display().to_string());
    config.max_depth = max_depth;

    let parsed = crate::parse_with(&source, &config)?;
    let document = match format {
        Format::Json if compact => parsed.to_json()?,
        Format::Json => parsed.to_json_pretty()?,
        Format::Yaml => parsed.to_yaml()?,
    };
    output::print_document(&document);

    output::print_syntax_errors(path, &parsed.errors);
    Ok(parsed.is_clean())
}

fn handle_check(root: &Path) -> CommandResult {
    let mut passed = 0;
    let mut failed = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let is_solidity = path.extension().and_then(|ext| ext.to_str()) == Some("sol");
        if !entry.file_type().is_file() || !is_solidity {
            continue;
        }

        let source = read_source(path)?;
        let config = ParserConfig::new().with_source_name(path.display().to_string());
        let error_count = match crate::parse_with(&source, &config) {
            Ok(parsed) => {
                output::print_syntax_errors(path, &parsed.errors);
                parsed.errors.len()
            }
            Err(error) => {
                print_error(error);
                1
            }
        };

        output::print_check_status(path, error_count);
        if error_count == 0 {
            passed += 1;
        } else {
            failed += 1;
        }
    }

    output::print_check_summary(passed, failed);
    Ok(failed == 0)
}

fn handle_cst(path: &Path) -> CommandResult {
    let source = read_source(path)?;
    let context = PhaseContext::new(
        SourceContext::from_file(path.display().to_string(), source.as_str()),
        "syntax",
    );

    let mut errors: Vec<SyntaxError> = Vec::new();
    let tree = parse_cst(&source, &context, &mut errors)?;
    output::print_document(&tree.to_string());

    output::print_syntax_errors(path, &errors);
    Ok(errors.is_empty())
}

fn read_source(path: &Path) -> Result<String, SolastError> {
    fs::read_to_string(path).map_err(|error| io_error(&path.display().to_string(), &error))
}
