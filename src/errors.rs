//! Solast Error Handling - one fatal error type for the whole engine.
//!
//! Syntax errors found by the front end are *not* represented here: they are
//! accumulated as [`crate::syntax::SyntaxError`] values and handed back next to
//! the tree. A `SolastError` always means the traversal was aborted.

use miette::{Diagnostic, SourceSpan};
use miette::{LabeledSpan, NamedSource};
use std::fmt;
use std::sync::Arc;

use crate::syntax::Span;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// The Solidity text being parsed, under the name diagnostics show for it.
///
/// Every phase of one parse holds a clone; the text itself is shared.
#[derive(Debug, Clone)]
pub struct SourceContext {
    source: Arc<NamedSource<String>>,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: Arc::new(NamedSource::new(name.into(), content.into())),
        }
    }

    /// A file that could not be read: the name is known, the text is not.
    pub fn unread(name: impl Into<String>) -> Self {
        Self::from_file(name, String::new())
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::clone(&self.source)
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::unread("input.sol")
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single fatal error type of the engine.
#[derive(Debug)]
pub struct SolastError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// Everything that can abort a parse.
///
/// Apart from `NestingLimit` and `Io`, every kind means the CST reaching the
/// builders does not have a shape the builders know about. Those are grammar
/// and engine mismatches, never problems with the user's source.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Contract violations between the grammar and the builders
    UnregisteredProduction {
        production: String,
    },
    UnrecognizedExpression {
        arity: usize,
        text: String,
    },
    UnsupportedShape {
        production: String,
        shape: String,
    },
    MissingElement {
        production: String,
        element: String,
    },
    UnexpectedNode {
        expected: String,
        found: String,
    },
    SeparatorExpected {
        found: String,
    },
    InvalidCatchKind {
        kind: String,
    },
    TagReassigned {
        existing: String,
        attempted: String,
    },

    // Resource limits requested by the caller
    NestingLimit {
        depth: usize,
        limit: usize,
    },

    // Reading input
    Io {
        path: String,
        reason: String,
    },
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Contract,
    Limit,
    Io,
}

const INTERNAL_HELP: &str =
    "This is an internal engine error: the grammar produced a shape the AST builders do not know. Please report this as a bug.";

impl ErrorKind {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnregisteredProduction { .. }
            | Self::UnrecognizedExpression { .. }
            | Self::UnsupportedShape { .. }
            | Self::MissingElement { .. }
            | Self::UnexpectedNode { .. }
            | Self::SeparatorExpected { .. }
            | Self::InvalidCatchKind { .. }
            | Self::TagReassigned { .. } => ErrorCategory::Contract,

            Self::NestingLimit { .. } => ErrorCategory::Limit,

            Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnregisteredProduction { .. } => "unregistered_production",
            Self::UnrecognizedExpression { .. } => "unrecognized_expression",
            Self::UnsupportedShape { .. } => "unsupported_shape",
            Self::MissingElement { .. } => "missing_element",
            Self::UnexpectedNode { .. } => "unexpected_node",
            Self::SeparatorExpected { .. } => "separator_expected",
            Self::InvalidCatchKind { .. } => "invalid_catch_kind",
            Self::TagReassigned { .. } => "tag_reassigned",
            Self::NestingLimit { .. } => "nesting_limit",
            Self::Io { .. } => "io",
        }
    }

    fn default_help(&self) -> Option<String> {
        match self.category() {
            ErrorCategory::Contract => Some(INTERNAL_HELP.into()),
            ErrorCategory::Limit => {
                Some("Raise the limit with --max-depth or reduce the nesting of the source.".into())
            }
            ErrorCategory::Io => None,
        }
    }
}

impl std::error::Error for SolastError {}

impl fmt::Display for SolastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnregisteredProduction { production } => {
                write!(f, "Internal error: no builder registered for production {}", production)
            }
            ErrorKind::UnrecognizedExpression { arity, text } => {
                write!(
                    f,
                    "Internal error: unrecognized expression shape with {} children: '{}'",
                    arity, text
                )
            }
            ErrorKind::UnsupportedShape { production, shape } => {
                write!(f, "Internal error: unsupported {} shape: {}", production, shape)
            }
            ErrorKind::MissingElement {
                production,
                element,
            } => {
                write!(f, "Internal error: {} is missing its {}", production, element)
            }
            ErrorKind::UnexpectedNode { expected, found } => {
                write!(f, "Internal error: expected {}, found {}", expected, found)
            }
            ErrorKind::SeparatorExpected { found } => {
                write!(f, "Internal error: expected ',', found '{}'", found)
            }
            ErrorKind::InvalidCatchKind { kind } => {
                write!(f, "Internal error: expected 'Error' or 'Panic', found '{}'", kind)
            }
            ErrorKind::TagReassigned {
                existing,
                attempted,
            } => {
                write!(
                    f,
                    "Internal error: node tagged {} cannot be retagged as {}",
                    existing, attempted
                )
            }
            ErrorKind::NestingLimit { depth, limit } => {
                write!(
                    f,
                    "Limit error: syntax tree depth {} exceeds the limit of {}",
                    depth, limit
                )
            }
            ErrorKind::Io { path, reason } => {
                write!(f, "I/O error: cannot read '{}': {}", path, reason)
            }
        }
    }
}

impl Diagnostic for SolastError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

impl SolastError {
    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::UnregisteredProduction { .. } => "no builder for this node".into(),
            ErrorKind::UnrecognizedExpression { .. } => "unrecognized expression".into(),
            ErrorKind::UnsupportedShape { .. } => "unsupported shape".into(),
            ErrorKind::MissingElement { .. } => "missing here".into(),
            ErrorKind::UnexpectedNode { .. } => "unexpected node".into(),
            ErrorKind::SeparatorExpected { .. } => "separator expected".into(),
            ErrorKind::InvalidCatchKind { .. } => "invalid catch kind".into(),
            ErrorKind::TagReassigned { .. } => "tagged twice".into(),
            ErrorKind::NestingLimit { .. } => "nested too deeply".into(),
            ErrorKind::Io { .. } => "while reading this".into(),
        }
    }
}

// ============================================================================
// ERROR CREATION CONTEXTS
// ============================================================================

/// Context-aware error creation
pub trait ErrorReporting {
    /// Create an error with context-appropriate enhancements
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> SolastError;

    fn missing_element(&self, production: &str, element: &str, span: SourceSpan) -> SolastError {
        self.report(
            ErrorKind::MissingElement {
                production: production.into(),
                element: element.into(),
            },
            span,
        )
    }

    fn unexpected_node(&self, expected: &str, found: &str, span: SourceSpan) -> SolastError {
        self.report(
            ErrorKind::UnexpectedNode {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    fn unsupported_shape(&self, production: &str, shape: &str, span: SourceSpan) -> SolastError {
        self.report(
            ErrorKind::UnsupportedShape {
                production: production.into(),
                shape: shape.into(),
            },
            span,
        )
    }
}

/// General-purpose error creation context: one source, one phase.
pub struct PhaseContext {
    pub source: SourceContext,
    pub phase: String,
}

impl PhaseContext {
    pub fn new(source: SourceContext, phase: impl Into<String>) -> Self {
        Self {
            source,
            phase: phase.into(),
        }
    }
}

impl ErrorReporting for PhaseContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> SolastError {
        let error_code = format!("solast::{}::{}", self.phase, kind.code_suffix());
        let help = kind.default_help();

        SolastError {
            kind,
            source_info: SourceInfo {
                source: self.source.to_named_source(),
                primary_span: span,
                phase: self.phase.clone(),
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }
}

/// Builds an I/O error for a file that could not be read.
pub fn io_error(path: &str, error: &std::io::Error) -> SolastError {
    PhaseContext::new(SourceContext::unread(path), "io").report(
        ErrorKind::Io {
            path: path.into(),
            reason: error.to_string(),
        },
        unspanned(),
    )
}

/// Creates a placeholder span for errors not tied to a specific source code
/// location, such as I/O errors.
pub fn unspanned() -> miette::SourceSpan {
    miette::SourceSpan::from(0..0)
}

/// Converts a CST span to a miette SourceSpan.
pub fn to_source_span(span: Span) -> miette::SourceSpan {
    miette::SourceSpan::from(span.start..span.end)
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a SolastError with full miette diagnostics
pub fn print_error(error: SolastError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
