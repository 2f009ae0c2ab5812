//! Handles all user-facing output for the CLI.
//!
//! Documents go to stdout uncolored so they can be piped; status lines and
//! syntax errors are colored when the stream is a terminal.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::syntax::SyntaxError;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints a serialized AST or CST dump as is.
pub fn print_document(text: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Never);
    let _ = write!(stdout, "{}", text);
    if !text.ends_with('\n') {
        let _ = writeln!(stdout);
    }
}

/// Prints syntax errors to stderr, one per line, prefixed with the file.
pub fn print_syntax_errors(path: &Path, errors: &[SyntaxError]) {
    let mut stderr = StandardStream::stderr(color_choice(atty::Stream::Stderr));
    for error in errors {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = write!(stderr, "syntax error");
        let _ = stderr.reset();
        let _ = writeln!(stderr, ": {}: {}", path.display(), error);
    }
}

/// One status line of `solast check`.
pub fn print_check_status(path: &Path, error_count: usize) {
    let mut stdout = StandardStream::stdout(color_choice(atty::Stream::Stdout));
    if error_count == 0 {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        let _ = write!(stdout, "ok  ");
        let _ = stdout.reset();
        let _ = writeln!(stdout, " {}", path.display());
    } else {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(stdout, "FAIL");
        let _ = stdout.reset();
        let _ = writeln!(stdout, " {} ({} errors)", path.display(), error_count);
    }
}

pub fn print_check_summary(passed: usize, failed: usize) {
    let mut stdout = StandardStream::stdout(color_choice(atty::Stream::Stdout));
    let color = if failed == 0 { Color::Green } else { Color::Red };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = writeln!(stdout, "{} passed, {} failed", passed, failed);
    let _ = stdout.reset();
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn color_choice(stream: atty::Stream) -> ColorChoice {
    if atty::is(stream) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
