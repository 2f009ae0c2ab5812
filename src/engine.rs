//! Solast Engine - source text to AST in one call.
//!
//! Runs the syntax front end, applies the configured resource limits and
//! hands the concrete syntax tree to the [`AstBuilder`]. Syntax errors never
//! abort the pipeline; they travel next to the best-effort tree built from
//! whatever still parsed.

use serde::Serialize;
use tracing::{debug, warn};

use crate::ast::Node;
use crate::builder::AstBuilder;
use crate::config::ParserConfig;
use crate::errors::{
    to_source_span, ErrorKind, ErrorReporting, PhaseContext, SolastError, SourceContext,
};
use crate::syntax::{parse_cst, SyntaxError};

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// The AST root (if any) and every syntax error reported on the way.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutput {
    pub result: Option<Node>,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    /// True when the source parsed without syntax errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Parses `source` with the default [`ParserConfig`].
pub fn parse(source: &str) -> Result<ParseOutput, SolastError> {
    parse_with(source, &ParserConfig::default())
}

/// Parses `source` into an AST.
///
/// `Err` means the traversal was aborted: either the nesting limit was hit or
/// the grammar produced a shape no builder accepts. Syntax errors are not
/// failures and come back in [`ParseOutput::errors`].
pub fn parse_with(source: &str, config: &ParserConfig) -> Result<ParseOutput, SolastError> {
    debug!(
        source = %config.source_name,
        bytes = source.len(),
        "parsing"
    );

    let source_context = SourceContext::from_file(config.source_name.clone(), source);
    let syntax = PhaseContext::new(source_context.clone(), "syntax");
    let mut errors: Vec<SyntaxError> = Vec::new();
    let tree = parse_cst(source, &syntax, &mut errors)?;

    if !errors.is_empty() {
        warn!(
            source = %config.source_name,
            count = errors.len(),
            "syntax errors reported"
        );
    }

    if let Some(limit) = config.max_depth {
        let depth = tree.depth();
        if depth > limit {
            return Err(syntax.report(
                ErrorKind::NestingLimit { depth, limit },
                to_source_span(tree.span),
            ));
        }
    }

    let builder = AstBuilder::new(PhaseContext::new(source_context, "build"));
    let result = builder.build(&tree)?;

    debug!(
        errors = errors.len(),
        built = result.is_some(),
        "parse finished"
    );

    Ok(ParseOutput { result, errors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, Walk};
    use crate::errors::ErrorCategory;

    #[test]
    fn clean_source_has_a_source_unit_root() {
        let output = parse("pragma solidity ^0.8.0;").expect("parse");
        assert!(output.is_clean());
        let root = output.result.expect("root");
        assert_eq!(root.kind(), NodeKind::SourceUnit);
        assert_eq!(root.node_type(), Some("SourceUnit"));
    }

    #[test]
    fn syntax_errors_are_returned_next_to_the_tree() {
        let output = parse("contract C {} pragma abicoder v1").expect("parse");
        assert!(!output.is_clean());
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].line, 1);

        let root = output.result.expect("root");
        let mut contracts = 0;
        root.walk(&mut |node| {
            if node.kind() == NodeKind::ContractDefinition {
                contracts += 1;
            }
        });
        assert_eq!(contracts, 1);
    }

    #[test]
    fn nesting_limit_aborts_before_building() {
        let config = ParserConfig::new().with_max_depth(3);
        let error = parse_with("contract C { uint x; }", &config).expect_err("limit");
        assert_eq!(error.kind.category(), ErrorCategory::Limit);
        assert_eq!(error.diagnostic_info.error_code, "solast::syntax::nesting_limit");
    }

    #[test]
    fn generous_limit_is_transparent() {
        let config = ParserConfig::new().with_max_depth(1_000);
        let limited = parse_with("contract C { uint x; }", &config).expect("parse");
        let unlimited = parse("contract C { uint x; }").expect("parse");
        assert_eq!(
            limited.to_json().expect("json"),
            unlimited.to_json().expect("json")
        );
    }

    #[test]
    fn output_serializes_both_fields() {
        let output = parse("contract {").expect("parse");
        let json: serde_json::Value =
            serde_json::from_str(&output.to_json().expect("json")).expect("valid json");
        assert_eq!(json["result"]["type"], "SourceUnit");
        assert_eq!(json["result"]["Children"], serde_json::json!([null]));
        assert_eq!(json["errors"][0]["line"], 1);
    }
}
