//! Solast Parser - pest grammar to concrete syntax tree.
//!
//! pest yields a flat operand/operator sequence for expressions and a base
//! plus suffix list for array types. This module rebuilds both into the nested
//! shapes the AST builders classify, and splices every other helper rule into
//! its parent.

use once_cell::sync::Lazy;
use pest::error::{Error, InputLocation};
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;
use tracing::trace;

use super::cst::{Cst, CstNode, Production, Token};
use super::{Span, SyntaxErrorListener};
use crate::errors::{to_source_span, ErrorReporting, PhaseContext, SolastError};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub struct SolidityParser;

/// Operator table, lowest binding power first.
static PRATT: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::op_assign, Assoc::Right) | Op::infix(Rule::op_ternary, Assoc::Right))
        .op(Op::infix(Rule::op_or, Assoc::Left))
        .op(Op::infix(Rule::op_and, Assoc::Left))
        .op(Op::infix(Rule::op_equality, Assoc::Left))
        .op(Op::infix(Rule::op_comparison, Assoc::Left))
        .op(Op::infix(Rule::op_bit_or, Assoc::Left))
        .op(Op::infix(Rule::op_bit_xor, Assoc::Left))
        .op(Op::infix(Rule::op_bit_and, Assoc::Left))
        .op(Op::infix(Rule::op_shift, Assoc::Left))
        .op(Op::infix(Rule::op_additive, Assoc::Left))
        .op(Op::infix(Rule::op_multiplicative, Assoc::Left))
        .op(Op::infix(Rule::op_exp, Assoc::Left))
        .op(Op::prefix(Rule::prefix_op))
        .op(Op::postfix(Rule::op_postfix_inc)
            | Op::postfix(Rule::index_range_suffix)
            | Op::postfix(Rule::index_suffix)
            | Op::postfix(Rule::member_suffix)
            | Op::postfix(Rule::name_value_suffix)
            | Op::postfix(Rule::call_suffix))
});

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse Solidity source into a CST rooted at `SourceUnit`.
///
/// Syntax errors go to `listener` and never fail the call. When the source
/// does not parse as a whole, the tree is rebuilt item by item: every
/// top-level item that parses is kept, and each one that does not is reported
/// once and skipped. An `Err` means the converter met a pair it has no shape
/// for.
pub fn parse_cst<'src>(
    source: &'src str,
    context: &PhaseContext,
    listener: &mut dyn SyntaxErrorListener,
) -> Result<CstNode<'src>, SolastError> {
    let pairs = match SolidityParser::parse(Rule::source_unit, source) {
        Ok(pairs) => pairs,
        Err(_) => return recover(source, context, listener),
    };

    let converter = Converter::new(source, context, 0);
    match pairs.into_iter().next() {
        Some(root) => converter.node(root),
        None => Err(context.missing_element(
            "SourceUnit",
            "root",
            to_source_span(Span::new(0, source.len())),
        )),
    }
}

// ============================================================================
// RECOVERY
// ============================================================================

/// Builds a `SourceUnit` one top-level item at a time, resynchronizing after
/// each item that fails to parse.
fn recover<'src>(
    source: &'src str,
    context: &PhaseContext,
    listener: &mut dyn SyntaxErrorListener,
) -> Result<CstNode<'src>, SolastError> {
    let mut children = Vec::new();
    let mut offset = 0;

    loop {
        let rest = source.get(offset..).unwrap_or("");
        let converter = Converter::new(source, context, offset);

        if let Ok(pairs) = SolidityParser::parse(Rule::source_end, rest) {
            let eoi = pairs.flatten().find(|pair| pair.as_rule() == Rule::EOI);
            if let Some(eoi) = eoi {
                children.push(Cst::Token(converter.token(&eoi)));
            }
            break;
        }

        match SolidityParser::parse(Rule::source_item, rest) {
            Ok(pairs) => {
                let item = pairs
                    .into_iter()
                    .next()
                    .and_then(|pair| pair.into_inner().next())
                    .ok_or_else(|| {
                        context.missing_element(
                            "SourceUnit",
                            "item",
                            to_source_span(Span::new(offset, source.len())),
                        )
                    })?;
                let end = item.as_span().end();
                children.push(converter.convert(item)?);
                offset += end;
            }
            Err(error) => {
                report_syntax_error(source, offset, error, listener);
                offset += skip_item(rest);
            }
        }
    }

    trace!(items = children.len(), "recovered source unit");

    Ok(CstNode {
        production: Production::SourceUnit,
        text: source,
        span: Span::new(0, source.len()),
        children,
    })
}

/// Byte length of the broken item at the start of `rest`: through the first
/// `;` outside braces, or through the `}` closing its outermost brace.
/// Strings and comments are stepped over. Never zero for non-empty input.
fn skip_item(rest: &str) -> usize {
    let mut depth = 0usize;
    let mut chars = rest.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' | '\'' => {
                while let Some((_, inner)) = chars.next() {
                    if inner == '\\' {
                        chars.next();
                    } else if inner == c {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                for (_, inner) in chars.by_ref() {
                    if inner == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut previous = ' ';
                for (_, inner) in chars.by_ref() {
                    if previous == '*' && inner == '/' {
                        break;
                    }
                    previous = inner;
                }
            }
            '{' => depth += 1,
            '}' if depth <= 1 => return index + 1,
            '}' => depth -= 1,
            ';' if depth == 0 => return index + 1,
            _ => {}
        }
    }
    rest.len()
}

// ============================================================================
// CST CONVERSION
// ============================================================================

struct Converter<'a, 'src> {
    source: &'src str,
    context: &'a PhaseContext,
    /// Where the parsed slice starts in `source`.
    offset: usize,
}

impl<'a, 'src> Converter<'a, 'src> {
    fn new(source: &'src str, context: &'a PhaseContext, offset: usize) -> Self {
        Self {
            source,
            context,
            offset,
        }
    }

    fn span_of(&self, pair: &Pair<'src, Rule>) -> Span {
        let span = pair.as_span();
        Span::new(self.offset + span.start(), self.offset + span.end())
    }

    fn token(&self, pair: &Pair<'src, Rule>) -> Token<'src> {
        Token {
            text: pair.as_str(),
            span: self.span_of(pair),
        }
    }

    fn convert(&self, pair: Pair<'src, Rule>) -> Result<Cst<'src>, SolastError> {
        match pair.as_rule() {
            Rule::expression => self.expression(pair).map(Cst::Node),
            Rule::type_name => self.type_name(pair).map(Cst::Node),
            Rule::function_call => self.function_call(pair).map(Cst::Node),
            rule => match production_of(rule) {
                Some(production) => self.node_of(production, pair).map(Cst::Node),
                None => Ok(Cst::Token(self.token(&pair))),
            },
        }
    }

    fn node(&self, pair: Pair<'src, Rule>) -> Result<CstNode<'src>, SolastError> {
        let span = self.span_of(&pair);
        match self.convert(pair)? {
            Cst::Node(node) => Ok(node),
            Cst::Token(token) => Err(self.context.unexpected_node(
                "production",
                token.text,
                to_source_span(span),
            )),
        }
    }

    fn node_of(
        &self,
        production: Production,
        pair: Pair<'src, Rule>,
    ) -> Result<CstNode<'src>, SolastError> {
        let span = self.span_of(&pair);
        let text = pair.as_str();
        let children = self.children(pair.into_inner())?;
        Ok(CstNode {
            production,
            text,
            span,
            children,
        })
    }

    fn children(&self, pairs: Pairs<'src, Rule>) -> Result<Vec<Cst<'src>>, SolastError> {
        pairs.map(|pair| self.convert(pair)).collect()
    }

    /// Wraps already converted children in a new node spanning all of them.
    fn compose(&self, production: Production, children: Vec<Cst<'src>>) -> CstNode<'src> {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => Span::default(),
        };
        let text = self.source.get(span.start..span.end).unwrap_or("");
        CstNode {
            production,
            text,
            span,
            children,
        }
    }

    fn expression(&self, pair: Pair<'src, Rule>) -> Result<CstNode<'src>, SolastError> {
        PRATT
            .map_primary(|primary| self.primary_term(primary))
            .map_prefix(|op, operand| {
                let children = vec![Cst::Token(self.token(&op)), Cst::Node(operand?)];
                Ok(self.compose(Production::Expression, children))
            })
            .map_postfix(|operand, op| {
                let mut children = vec![Cst::Node(operand?)];
                children.extend(self.suffix(op)?);
                Ok(self.compose(Production::Expression, children))
            })
            .map_infix(|lhs, op, rhs| {
                let mut children = vec![Cst::Node(lhs?)];
                match op.as_rule() {
                    // `? e :` carries its middle operand
                    Rule::op_ternary => children.extend(self.children(op.into_inner())?),
                    _ => children.push(Cst::Token(self.token(&op))),
                }
                children.push(Cst::Node(rhs?));
                Ok(self.compose(Production::Expression, children))
            })
            .parse(pair.into_inner())
    }

    fn primary_term(&self, pair: Pair<'src, Rule>) -> Result<CstNode<'src>, SolastError> {
        match pair.as_rule() {
            Rule::new_expression | Rule::paren_expression => {
                self.node_of(Production::Expression, pair)
            }
            Rule::primary_expression => {
                let primary = self.node_of(Production::PrimaryExpression, pair)?;
                Ok(self.compose(Production::Expression, vec![Cst::Node(primary)]))
            }
            _ => Err(self.context.unexpected_node(
                "primary expression",
                pair.as_str(),
                to_source_span(self.span_of(&pair)),
            )),
        }
    }

    fn suffix(&self, op: Pair<'src, Rule>) -> Result<Vec<Cst<'src>>, SolastError> {
        match op.as_rule() {
            Rule::op_postfix_inc => Ok(vec![Cst::Token(self.token(&op))]),
            _ => self.children(op.into_inner()),
        }
    }

    /// `T[a][]` folds left: TypeName[TypeName[TypeName[T], "[", a, "]"], "[", "]"].
    fn type_name(&self, pair: Pair<'src, Rule>) -> Result<CstNode<'src>, SolastError> {
        let span = self.span_of(&pair);
        let mut inner = pair.into_inner();
        let base = inner.next().ok_or_else(|| {
            self.context
                .missing_element("TypeName", "base type", to_source_span(span))
        })?;

        let base_children = match base.as_rule() {
            Rule::address_payable => self.children(base.into_inner())?,
            _ => vec![self.convert(base)?],
        };

        let mut current = self.compose(Production::TypeName, base_children);
        for suffix in inner {
            let mut children = vec![Cst::Node(current)];
            children.extend(self.children(suffix.into_inner())?);
            current = self.compose(Production::TypeName, children);
        }
        Ok(current)
    }

    fn function_call(&self, pair: Pair<'src, Rule>) -> Result<CstNode<'src>, SolastError> {
        let span = self.span_of(&pair);
        let text = pair.as_str();
        let children = pair
            .into_inner()
            .map(|child| match child.as_rule() {
                Rule::call_target => self.call_target(child).map(Cst::Node),
                _ => self.convert(child),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CstNode {
            production: Production::FunctionCall,
            text,
            span,
            children,
        })
    }

    fn call_target(&self, pair: Pair<'src, Rule>) -> Result<CstNode<'src>, SolastError> {
        let span = self.span_of(&pair);
        let mut inner = pair.into_inner();
        let head = inner.next().ok_or_else(|| {
            self.context
                .missing_element("FunctionCall", "callee", to_source_span(span))
        })?;

        let mut current = self.primary_term(head)?;
        for suffix in inner {
            let mut children = vec![Cst::Node(current)];
            children.extend(self.suffix(suffix)?);
            current = self.compose(Production::Expression, children);
        }
        Ok(current)
    }
}

/// Grammar rules that become production nodes. Everything else is a token.
fn production_of(rule: Rule) -> Option<Production> {
    use Production as P;
    let production = match rule {
        Rule::source_unit => P::SourceUnit,
        Rule::pragma_directive => P::PragmaDirective,
        Rule::pragma_name => P::PragmaName,
        Rule::pragma_value => P::PragmaValue,
        Rule::import_directive => P::ImportDirective,
        Rule::import_declaration => P::ImportDeclaration,
        Rule::import_path => P::ImportPath,
        Rule::contract_definition => P::ContractDefinition,
        Rule::inheritance_specifier => P::InheritanceSpecifier,
        Rule::contract_part => P::ContractPart,
        Rule::state_variable_declaration => P::StateVariableDeclaration,
        Rule::file_level_constant => P::FileLevelConstant,
        Rule::custom_error_definition => P::CustomErrorDefinition,
        Rule::type_definition => P::TypeDefinition,
        Rule::using_for_declaration => P::UsingForDeclaration,
        Rule::struct_definition => P::StructDefinition,
        Rule::modifier_definition => P::ModifierDefinition,
        Rule::modifier_invocation => P::ModifierInvocation,
        Rule::function_definition => P::FunctionDefinition,
        Rule::function_descriptor => P::FunctionDescriptor,
        Rule::return_parameters => P::ReturnParameters,
        Rule::modifier_list => P::ModifierList,
        Rule::event_definition => P::EventDefinition,
        Rule::enum_value => P::EnumValue,
        Rule::enum_definition => P::EnumDefinition,
        Rule::parameter_list => P::ParameterList,
        Rule::parameter => P::Parameter,
        Rule::event_parameter_list => P::EventParameterList,
        Rule::event_parameter => P::EventParameter,
        Rule::function_type_parameter_list => P::FunctionTypeParameterList,
        Rule::function_type_parameter => P::FunctionTypeParameter,
        Rule::variable_declaration => P::VariableDeclaration,
        Rule::override_specifier => P::OverrideSpecifier,
        Rule::user_defined_type_name => P::UserDefinedTypeName,
        Rule::mapping_key => P::MappingKey,
        Rule::mapping => P::Mapping,
        Rule::function_type_name => P::FunctionTypeName,
        Rule::storage_location => P::StorageLocation,
        Rule::state_mutability => P::StateMutability,
        Rule::elementary_type_name => P::ElementaryTypeName,
        Rule::block => P::Block,
        Rule::statement => P::Statement,
        Rule::expression_statement => P::ExpressionStatement,
        Rule::if_statement => P::IfStatement,
        Rule::try_statement => P::TryStatement,
        Rule::catch_clause => P::CatchClause,
        Rule::while_statement => P::WhileStatement,
        Rule::simple_statement => P::SimpleStatement,
        Rule::unchecked_statement => P::UncheckedStatement,
        Rule::for_statement => P::ForStatement,
        Rule::inline_assembly_statement => P::InlineAssemblyStatement,
        Rule::do_while_statement => P::DoWhileStatement,
        Rule::continue_statement => P::ContinueStatement,
        Rule::break_statement => P::BreakStatement,
        Rule::return_statement => P::ReturnStatement,
        Rule::throw_statement => P::ThrowStatement,
        Rule::emit_statement => P::EmitStatement,
        Rule::revert_statement => P::RevertStatement,
        Rule::variable_declaration_statement => P::VariableDeclarationStatement,
        Rule::variable_declaration_list => P::VariableDeclarationList,
        Rule::identifier_list => P::IdentifierList,
        Rule::primary_expression => P::PrimaryExpression,
        Rule::expression_list => P::ExpressionList,
        Rule::name_value_list => P::NameValueList,
        Rule::name_value => P::NameValue,
        Rule::function_call_arguments => P::FunctionCallArguments,
        Rule::tuple_expression => P::TupleExpression,
        Rule::type_name_expression => P::TypeNameExpression,
        Rule::number_literal => P::NumberLiteral,
        Rule::hex_literal => P::HexLiteral,
        Rule::string_literal => P::StringLiteral,
        Rule::identifier => P::Identifier,
        Rule::assembly_block => P::AssemblyBlock,
        Rule::assembly_local_definition => P::AssemblyLocalDefinition,
        Rule::assembly_assignment => P::AssemblyAssignment,
        Rule::assembly_identifier_list => P::AssemblyIdentifierList,
        Rule::assembly_member => P::AssemblyMember,
        Rule::assembly_call => P::AssemblyCall,
        Rule::assembly_literal => P::AssemblyLiteral,
        Rule::assembly_if => P::AssemblyIf,
        Rule::assembly_for => P::AssemblyFor,
        Rule::assembly_switch => P::AssemblySwitch,
        Rule::assembly_case => P::AssemblyCase,
        Rule::assembly_function_definition => P::AssemblyFunctionDefinition,
        Rule::assembly_function_returns => P::AssemblyFunctionReturns,
        Rule::assembly_flow_control => P::AssemblyFlowControl,
        _ => return None,
    };
    Some(production)
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Reports a pest failure on the slice of `source` starting at `offset`.
fn report_syntax_error(
    source: &str,
    offset: usize,
    error: Error<Rule>,
    listener: &mut dyn SyntaxErrorListener,
) {
    let position = match error.location {
        InputLocation::Pos(position) => position,
        InputLocation::Span((start, _)) => start,
    };
    let (line, column) = line_column(source, offset + position);
    let error = error.renamed_rules(describe_rule);
    listener.syntax_error(line, column, error.variant.message().into_owned());
}

/// 1-based line and 0-based column (in characters) of a byte position.
fn line_column(source: &str, position: usize) -> (usize, usize) {
    let before = source.get(..position).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |text| text.chars().count());
    (line, column)
}

/// Human-readable rule names for syntax error messages.
fn describe_rule(rule: &Rule) -> String {
    let punctuation = match rule {
        Rule::LPAREN => "'('",
        Rule::RPAREN => "')'",
        Rule::LBRACE => "'{'",
        Rule::RBRACE => "'}'",
        Rule::LBRACK => "'['",
        Rule::RBRACK => "']'",
        Rule::COMMA => "','",
        Rule::SEMI => "';'",
        Rule::DOT => "'.'",
        Rule::COLON => "':'",
        Rule::QUESTION => "'?'",
        Rule::ASSIGN => "'='",
        Rule::ARROW => "'=>'",
        Rule::STAR => "'*'",
        Rule::YUL_ASSIGN => "':='",
        Rule::YUL_ARROW => "'->'",
        Rule::EOI => "end of input",
        _ => "",
    };
    if !punctuation.is_empty() {
        return punctuation.to_string();
    }

    let name = format!("{:?}", rule);
    match name.strip_prefix("kw_") {
        Some(keyword) => format!("'{}'", keyword),
        None => name.replace('_', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceContext;
    use crate::syntax::SyntaxError;

    fn parse(source: &str) -> (CstNode<'_>, Vec<SyntaxError>) {
        let context = PhaseContext::new(SourceContext::from_file("test.sol", source), "syntax");
        let mut errors = Vec::new();
        let tree = parse_cst(source, &context, &mut errors).expect("conversion failed");
        (tree, errors)
    }

    fn first_expression<'t, 's>(node: &'t CstNode<'s>) -> Option<&'t CstNode<'s>> {
        if node.production == Production::Expression {
            return Some(node);
        }
        node.nodes().find_map(|child| first_expression(child))
    }

    fn in_function(body: &str) -> String {
        format!("contract C {{ function f() public {{ {} }} }}", body)
    }

    #[test]
    fn source_unit_ends_with_eoi_token() {
        let (tree, errors) = parse("pragma solidity ^0.8.0;");
        assert!(errors.is_empty());
        assert_eq!(tree.production, Production::SourceUnit);
        assert_eq!(tree.len(), 2);
        assert!(tree.children[1].is_token());
        assert_eq!(tree.text_at(1), "");
    }

    #[test]
    fn binary_expression_arity() {
        let source = in_function("a + b * c;");
        let (tree, _) = parse(&source);
        let expr = first_expression(&tree).expect("expression");
        assert_eq!(expr.len(), 3);
        assert_eq!(expr.text_at(1), "+");
        assert_eq!(expr.text_at(2), "b * c");
    }

    #[test]
    fn ternary_expression_arity() {
        let source = in_function("x = a ? b : c;");
        let (tree, _) = parse(&source);
        let assign = first_expression(&tree).expect("expression");
        assert_eq!(assign.text_at(1), "=");
        let ternary = assign.child(2).and_then(Cst::as_node).expect("rhs");
        assert_eq!(ternary.len(), 5);
        assert_eq!(ternary.text_at(1), "?");
        assert_eq!(ternary.text_at(3), ":");
    }

    #[test]
    fn call_and_range_arity() {
        let source = in_function("f(1, 2)[3:];");
        let (tree, _) = parse(&source);
        let range = first_expression(&tree).expect("expression");
        assert_eq!(range.len(), 5);
        assert_eq!(range.text_at(1), "[");
        assert_eq!(range.text_at(3), ":");
        let call = range.child(0).and_then(Cst::as_node).expect("callee");
        assert_eq!(call.len(), 4);
        assert_eq!(call.text_at(1), "(");
    }

    #[test]
    fn array_type_folds_left() {
        let source = "contract C { uint[2][] values; }";
        let (tree, errors) = parse(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let text = tree.to_string();
        assert!(text.contains("TypeName\n"));
        assert!(text.contains("\"[\""));
    }

    #[test]
    fn unterminated_item_still_yields_a_source_unit() {
        let (tree, errors) = parse("contract C {");
        assert_eq!(tree.production, Production::SourceUnit);
        assert_eq!(tree.len(), 1);
        assert!(tree.children[0].is_token());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
    }

    #[test]
    fn recovery_keeps_the_items_around_a_broken_one() {
        let source = "contract A {}\ncontract { uint x; }\ncontract B {}";
        let (tree, errors) = parse(source);
        assert_eq!(errors.len(), 1);
        assert_eq!((errors[0].line, errors[0].column), (2, 9));

        let items: Vec<_> = tree.nodes().map(|node| node.text).collect();
        assert_eq!(items, ["contract A {}", "contract B {}"]);
        let b = tree.nodes().nth(1).expect("second contract");
        assert_eq!(b.span, Span::new(35, 48));
        assert_eq!(&source[b.span.start..b.span.end], "contract B {}");
        assert!(tree.children.last().is_some_and(Cst::is_token));
    }

    #[test]
    fn skipping_stops_at_the_item_boundary() {
        assert_eq!(skip_item("pragma abicoder v1"), 18);
        assert_eq!(skip_item("uint x = ; rest"), 10);
        assert_eq!(skip_item("contract { f() { a; } } B"), 23);
        assert_eq!(skip_item("} tail"), 1);
        assert_eq!(skip_item("x = \"};\" ; y"), 10);
        assert_eq!(skip_item("/* } */ ;"), 9);
    }

    #[test]
    fn line_column_counts_characters() {
        assert_eq!(line_column("ab\ncd", 4), (2, 1));
        assert_eq!(line_column("\u{e9}x", 2), (1, 1));
        assert_eq!(line_column("abc", 0), (1, 0));
    }

    #[test]
    fn rule_descriptions() {
        assert_eq!(describe_rule(&Rule::SEMI), "';'");
        assert_eq!(describe_rule(&Rule::kw_returns), "'returns'");
        assert_eq!(describe_rule(&Rule::type_name), "type name");
    }
}
