//! Expression disambiguation.
//!
//! The grammar has one generic `Expression` production for every operator
//! form. Precedence is already settled by the shape of the tree; here each
//! node is only *named*, by its number of children and the literal text at
//! fixed positions. The first matching row wins:
//!
//! | children | check                            | node                     |
//! |----------|----------------------------------|--------------------------|
//! | 1        |                                  | the child itself         |
//! | 2        | `new` T                          | NewExpression            |
//! | 2        | prefix operator, operand         | UnaryOperation (prefix)  |
//! | 2        | operand, `++` / `--`             | UnaryOperation (postfix) |
//! | 3        | `(` e `)`                        | TupleExpression          |
//! | 3        | e `.` name                       | MemberAccess             |
//! | 3        | e binop e                        | BinaryOperation          |
//! | 4        | e `(` args `)`                   | FunctionCall             |
//! | 4        | e `[` `:` `]`                    | IndexRangeAccess         |
//! | 4        | e `[` i `]`                      | IndexAccess              |
//! | 4        | e `{` list `}`                   | NameValueExpression      |
//! | 5        | c `?` a `:` b                    | Conditional              |
//! | 5        | e `[` `:` end `]`                | IndexRangeAccess         |
//! | 5        | e `[` start `:` `]`              | IndexRangeAccess         |
//! | 6        | e `[` start `:` end `]`          | IndexRangeAccess         |

use crate::ast::{
    BinaryOperation, BooleanLiteral, Conditional, Expression, FunctionCall, HexLiteral,
    Identifier, IndexAccess, IndexRangeAccess, MemberAccess, NameValueExpression, NameValueList,
    NewExpression, NodeKind, NumberLiteral, StringLiteral, Tag, TupleExpression,
    TypeNameExpression, UnaryOperation,
};
use crate::errors::{ErrorKind, SolastError};
use crate::syntax::{Cst, CstNode, Production};

use super::declarations::{expression_list, unquote};
use super::statements::parenthesized;
use super::{AstBuilder, BuildResult};

pub const PREFIX_OPERATORS: &[&str] = &["-", "+", "--", "++", "~", "after", "delete", "!"];

pub const POSTFIX_OPERATORS: &[&str] = &["++", "--"];

pub const BINARY_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "**", "%", "<<", ">>", "&&", "||", "&", "|", "^", "<", ">", "<=", ">=",
    "==", "!=", "=", "|=", "^=", "&=", "<<=", ">>=", "+=", "-=", "*=", "/=", "%=",
];

// ============================================================================
// EXPRESSION
// ============================================================================

pub(super) fn build_expression(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let text = |index: usize| node.text_at(index);
    let is_range = |open: usize, colon: usize, close: usize| {
        text(open) == "[" && text(colon) == ":" && text(close) == "]"
    };

    let expression: Expression = match node.len() {
        1 => return b.visit(&node.children[0]),

        2 if text(0) == "new" => NewExpression {
            tag: Tag::of(NodeKind::NewExpression),
            type_name: b.expect_at(node, 1)?,
        }
        .into(),
        2 if PREFIX_OPERATORS.contains(&text(0)) => UnaryOperation {
            tag: Tag::of(NodeKind::UnaryOperation),
            operator: text(0).into(),
            sub_expression: b.boxed_at(node, 1)?,
            is_prefix: true,
        }
        .into(),
        2 if POSTFIX_OPERATORS.contains(&text(1)) => UnaryOperation {
            tag: Tag::of(NodeKind::UnaryOperation),
            operator: text(1).into(),
            sub_expression: b.boxed_at(node, 0)?,
            is_prefix: false,
        }
        .into(),

        3 if text(0) == "(" && text(2) == ")" => TupleExpression {
            tag: Tag::of(NodeKind::TupleExpression),
            components: vec![Some(b.expect_at(node, 1)?)],
            is_array: false,
        }
        .into(),
        3 if text(1) == "." => MemberAccess {
            tag: Tag::of(NodeKind::MemberAccess),
            expression: b.boxed_at(node, 0)?,
            member_name: text(2).into(),
        }
        .into(),
        3 if BINARY_OPERATORS.contains(&text(1)) => BinaryOperation {
            tag: Tag::of(NodeKind::BinaryOperation),
            operator: text(1).into(),
            left: b.boxed_at(node, 0)?,
            right: b.boxed_at(node, 2)?,
        }
        .into(),

        4 if text(1) == "(" && text(3) == ")" => {
            call(b, node, Tag::of(NodeKind::FunctionCall))?.into()
        }
        4 if is_range(1, 2, 3) => IndexRangeAccess {
            tag: Tag::of(NodeKind::IndexRangeAccess),
            base: b.boxed_at(node, 0)?,
            index_start: None,
            index_end: None,
        }
        .into(),
        4 if text(1) == "[" && text(3) == "]" => IndexAccess {
            tag: Tag::of(NodeKind::IndexAccess),
            base: b.boxed_at(node, 0)?,
            index: b.boxed_at(node, 2)?,
        }
        .into(),
        4 if text(1) == "{" && text(3) == "}" => NameValueExpression {
            tag: Tag::of(NodeKind::NameValueExpression),
            expression: b.boxed_at(node, 0)?,
            arguments: b.expect_at::<NameValueList>(node, 2)?,
        }
        .into(),

        5 if text(1) == "?" && text(3) == ":" => Conditional {
            tag: Tag::of(NodeKind::Conditional),
            condition: b.boxed_at(node, 0)?,
            true_expression: b.boxed_at(node, 2)?,
            false_expression: b.boxed_at(node, 4)?,
        }
        .into(),
        5 if is_range(1, 2, 4) => IndexRangeAccess {
            tag: Tag::of(NodeKind::IndexRangeAccess),
            base: b.boxed_at(node, 0)?,
            index_start: None,
            index_end: Some(b.boxed_at(node, 3)?),
        }
        .into(),
        5 if is_range(1, 3, 4) => IndexRangeAccess {
            tag: Tag::of(NodeKind::IndexRangeAccess),
            base: b.boxed_at(node, 0)?,
            index_start: Some(b.boxed_at(node, 2)?),
            index_end: None,
        }
        .into(),

        6 if is_range(1, 3, 5) => IndexRangeAccess {
            tag: Tag::of(NodeKind::IndexRangeAccess),
            base: b.boxed_at(node, 0)?,
            index_start: Some(b.boxed_at(node, 2)?),
            index_end: Some(b.boxed_at(node, 4)?),
        }
        .into(),

        arity => {
            return Err(b.error(
                ErrorKind::UnrecognizedExpression {
                    arity,
                    text: node.text.into(),
                },
                node.span,
            ))
        }
    };

    Ok(Some(expression.into()))
}

// ============================================================================
// CALLS
// ============================================================================

/// The call production used by `emit` and `revert`.
pub(super) fn build_function_call(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(call(b, node, Tag::unset())?.into()))
}

/// `callee ( arguments )`. Arguments are either positional or named, never
/// both.
fn call(b: &AstBuilder, node: &CstNode<'_>, tag: Tag) -> Result<FunctionCall, SolastError> {
    let mut call = FunctionCall {
        tag,
        arguments: Vec::new(),
        names: Vec::new(),
        identifiers: Vec::new(),
        expression: b.boxed_at(node, 0)?,
    };

    let arguments = b.require(node, Production::FunctionCallArguments)?;
    if let Some(named) = arguments.find(Production::NameValueList) {
        let list = name_value_list(b, named, Tag::of(NodeKind::NameValueList))?;
        call.names = list.names;
        call.identifiers = list.identifiers;
        call.arguments = list.args;
    } else if let Some(positional) = arguments.find(Production::ExpressionList) {
        call.arguments = expression_list(b, positional)?;
    }

    Ok(call)
}

pub(super) fn build_name_value_list(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(name_value_list(b, node, Tag::unset())?.into()))
}

fn name_value_list(
    b: &AstBuilder,
    node: &CstNode<'_>,
    tag: Tag,
) -> Result<NameValueList, SolastError> {
    let mut list = NameValueList {
        tag,
        names: Vec::new(),
        identifiers: Vec::new(),
        args: Vec::new(),
    };
    for pair in node.find_all(Production::NameValue) {
        let name = b.require(pair, Production::Identifier)?;
        list.names.push(name.text.into());
        list.identifiers.push(b.expect(name)?);
        list.args.push(b.expect_child(pair, Production::Expression)?);
    }
    Ok(list)
}

// ============================================================================
// PRIMARY EXPRESSIONS AND LITERALS
// ============================================================================

pub(super) fn build_primary_expression(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let first = node.child(0).ok_or_else(|| b.missing(node, "operand"))?;

    if let Cst::Token(token) = first {
        if let Ok(value) = token.text.parse::<bool>() {
            let literal = BooleanLiteral {
                tag: Tag::of(NodeKind::BooleanLiteral),
                value,
            };
            return Ok(Some(literal.into()));
        }
    }

    if node.len() == 3 && node.text_at(1) == "[" && node.text_at(2) == "]" {
        return Err(b.unsupported(node, "array type in expression position"));
    }

    for literal in [
        Production::HexLiteral,
        Production::StringLiteral,
        Production::NumberLiteral,
    ] {
        if let Some(child) = node.find(literal) {
            return b.visit_node(child);
        }
    }

    if first.is_token() && first.text() == "type" {
        let identifier = Identifier {
            tag: Tag::of(NodeKind::Identifier),
            name: "type".into(),
        };
        return Ok(Some(identifier.into()));
    }

    b.visit(first)
}

pub(super) fn build_identifier(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        Identifier {
            tag: Tag::unset(),
            name: node.text.into(),
        }
        .into(),
    ))
}

/// Digits as written, plus the unit when one follows.
pub(super) fn build_number_literal(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        NumberLiteral {
            tag: Tag::unset(),
            number: node.text_at(0).into(),
            sub_denomination: (node.len() == 2).then(|| node.text_at(1).into()),
        }
        .into(),
    ))
}

pub(super) fn build_hex_literal(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let parts: Vec<String> = node
        .children
        .iter()
        .map(|fragment| {
            let text = fragment.text();
            unquote(text.strip_prefix("hex").unwrap_or(text)).to_string()
        })
        .collect();

    Ok(Some(
        HexLiteral {
            tag: Tag::unset(),
            value: parts.concat(),
            parts,
        }
        .into(),
    ))
}

pub(super) fn build_string_literal(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let mut parts = Vec::with_capacity(node.len());
    let mut is_unicode = Vec::with_capacity(node.len());
    for fragment in &node.children {
        let text = fragment.text();
        let body = text.strip_prefix("unicode");
        is_unicode.push(body.is_some());
        parts.push(unquote(body.unwrap_or(text)).to_string());
    }

    Ok(Some(
        StringLiteral {
            tag: Tag::unset(),
            value: parts.concat(),
            parts,
            is_unicode,
        }
        .into(),
    ))
}

/// `(a, , b)` keeps its gap; `[a, b]` is an inline array.
pub(super) fn build_tuple_expression(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let components = b.sparse(parenthesized(b, node)?, |child| {
        b.expect_cst::<Expression>(child)
    })?;

    Ok(Some(
        TupleExpression {
            tag: Tag::unset(),
            components,
            is_array: node.text_at(0) == "[",
        }
        .into(),
    ))
}

pub(super) fn build_type_name_expression(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        TypeNameExpression {
            tag: Tag::unset(),
            type_name: b.expect_at(node, 0)?,
        }
        .into(),
    ))
}
