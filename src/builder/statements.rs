//! Statements. Mostly one field per grammar slot; `for`, `try` and
//! declaration statements need more care.

use crate::ast::{
    AssemblyBlock, Block, BreakStatement, CatchClause, ContinueStatement, DoWhileStatement,
    EmitStatement, Expression, ExpressionStatement, ForStatement, Identifier, IfStatement,
    InlineAssemblyStatement, NodeKind, ReturnStatement, RevertStatement, Statement, Tag,
    ThrowStatement, TryStatement, UncheckedStatement, VariableDeclaration,
    VariableDeclarationStatement, WhileStatement,
};
use crate::errors::{ErrorKind, SolastError};
use crate::syntax::{Cst, CstNode, Production};

use super::declarations::parameter_list;
use super::{AstBuilder, BuildResult};

pub(super) fn build_block(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        Block {
            tag: Tag::unset(),
            statements: b.all_children::<Statement>(node, Production::Statement)?,
        }
        .into(),
    ))
}

pub(super) fn build_expression_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        ExpressionStatement {
            tag: Tag::unset(),
            expression: Some(b.expect_child(node, Production::Expression)?),
        }
        .into(),
    ))
}

pub(super) fn build_if_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let mut bodies = node.find_all(Production::Statement);
    let true_body = bodies
        .next()
        .ok_or_else(|| b.missing(node, "body"))?;
    let false_body = bodies
        .next()
        .map(|body| b.expect::<Statement>(body).map(Box::new))
        .transpose()?;

    Ok(Some(
        IfStatement {
            tag: Tag::unset(),
            condition: b.expect_child(node, Production::Expression)?,
            true_body: Box::new(b.expect(true_body)?),
            false_body,
        }
        .into(),
    ))
}

pub(super) fn build_while_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        WhileStatement {
            tag: Tag::unset(),
            condition: b.expect_child(node, Production::Expression)?,
            body: Box::new(b.expect_child(node, Production::Statement)?),
        }
        .into(),
    ))
}

pub(super) fn build_do_while_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        DoWhileStatement {
            tag: Tag::unset(),
            condition: b.expect_child(node, Production::Expression)?,
            body: Box::new(b.expect_child(node, Production::Statement)?),
        }
        .into(),
    ))
}

/// Every header clause is optional. The loop clause is always wrapped in an
/// ExpressionStatement, even when empty.
pub(super) fn build_for_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let init_expression = b
        .optional_child::<Statement>(node, Production::SimpleStatement)?
        .map(Box::new);
    let condition_expression = node
        .find(Production::ExpressionStatement)
        .map(|clause| b.expect_child::<Expression>(clause, Production::Expression))
        .transpose()?;
    let loop_expression = ExpressionStatement {
        tag: Tag::of(NodeKind::ExpressionStatement),
        expression: b.optional_child(node, Production::Expression)?,
    };

    Ok(Some(
        ForStatement {
            tag: Tag::unset(),
            init_expression,
            condition_expression,
            loop_expression,
            body: Box::new(b.expect_child(node, Production::Statement)?),
        }
        .into(),
    ))
}

pub(super) fn build_unchecked_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        UncheckedStatement {
            tag: Tag::unset(),
            block: b.expect_child(node, Production::Block)?,
        }
        .into(),
    ))
}

pub(super) fn build_inline_assembly_statement(
    b: &AstBuilder,
    node: &CstNode<'_>,
) -> BuildResult {
    Ok(Some(
        InlineAssemblyStatement {
            tag: Tag::unset(),
            body: b.expect_child::<AssemblyBlock>(node, Production::AssemblyBlock)?,
        }
        .into(),
    ))
}

pub(super) fn build_continue_statement(_: &AstBuilder, _: &CstNode<'_>) -> BuildResult {
    Ok(Some(ContinueStatement { tag: Tag::unset() }.into()))
}

pub(super) fn build_break_statement(_: &AstBuilder, _: &CstNode<'_>) -> BuildResult {
    Ok(Some(BreakStatement { tag: Tag::unset() }.into()))
}

pub(super) fn build_throw_statement(_: &AstBuilder, _: &CstNode<'_>) -> BuildResult {
    Ok(Some(ThrowStatement { tag: Tag::unset() }.into()))
}

pub(super) fn build_return_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        ReturnStatement {
            tag: Tag::unset(),
            expression: b.optional_child(node, Production::Expression)?,
        }
        .into(),
    ))
}

pub(super) fn build_emit_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        EmitStatement {
            tag: Tag::unset(),
            event_call: b.expect_child(node, Production::FunctionCall)?,
        }
        .into(),
    ))
}

pub(super) fn build_revert_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        RevertStatement {
            tag: Tag::unset(),
            revert_call: b.expect_child(node, Production::FunctionCall)?,
        }
        .into(),
    ))
}

// ============================================================================
// TRY / CATCH
// ============================================================================

pub(super) fn build_try_statement(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let return_parameters = node
        .find(Production::ReturnParameters)
        .map(|returns| parameter_list(b, b.require(returns, Production::ParameterList)?))
        .transpose()?;

    Ok(Some(
        TryStatement {
            tag: Tag::unset(),
            expression: b.expect_child(node, Production::Expression)?,
            catch_clause: b.all_children::<CatchClause>(node, Production::CatchClause)?,
            body: b.expect_child(node, Production::Block)?,
            return_parameters,
        }
        .into(),
    ))
}

/// `catch Error(...)`, `catch Panic(...)` or a bare `catch`. Any other
/// identifier aborts the build.
pub(super) fn build_catch_clause(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let kind = node
        .find(Production::Identifier)
        .map(|identifier| identifier.text)
        .unwrap_or("");
    if !matches!(kind, "" | "Error" | "Panic") {
        return Err(b.error(ErrorKind::InvalidCatchKind { kind: kind.into() }, node.span));
    }

    let parameters = node
        .find(Production::ParameterList)
        .map(|list| parameter_list(b, list))
        .transpose()?;

    Ok(Some(
        CatchClause {
            tag: Tag::unset(),
            is_reason_type: kind == "Error",
            kind: kind.into(),
            parameters,
            body: b.expect_child(node, Production::Block)?,
        }
        .into(),
    ))
}

// ============================================================================
// DECLARATION STATEMENTS
// ============================================================================

/// `T x = e;`, `(T a, , U b) = e;` or `var (a, , b) = e;`. Gaps in the
/// tuple forms stay as empty slots.
pub(super) fn build_variable_declaration_statement(
    b: &AstBuilder,
    node: &CstNode<'_>,
) -> BuildResult {
    let variables = if let Some(list) = node.find(Production::IdentifierList) {
        identifier_list(b, list)?
    } else if let Some(list) = node.find(Production::VariableDeclarationList) {
        b.sparse(&list.children, |child| b.expect_cst::<VariableDeclaration>(child))?
    } else {
        vec![Some(b.expect_child(node, Production::VariableDeclaration)?)]
    };

    Ok(Some(
        VariableDeclarationStatement {
            tag: Tag::unset(),
            initial_value: b.optional_child(node, Production::Expression)?,
            variables,
        }
        .into(),
    ))
}

/// `(a, , b)` after `var`: untyped declarations named by each identifier.
fn identifier_list(
    b: &AstBuilder,
    list: &CstNode<'_>,
) -> Result<Vec<Option<VariableDeclaration>>, SolastError> {
    let inner = parenthesized(b, list)?;
    b.sparse(inner, |child| {
        let identifier = b.expect_cst::<Identifier>(child)?;
        Ok(VariableDeclaration {
            tag: Tag::of(NodeKind::VariableDeclaration),
            name: identifier.name.clone(),
            identifier: Some(identifier),
            ..VariableDeclaration::default()
        })
    })
}

/// Children between the opening and closing delimiter.
pub(super) fn parenthesized<'t, 'src>(
    b: &AstBuilder,
    node: &'t CstNode<'src>,
) -> Result<&'t [Cst<'src>], SolastError> {
    match node.len() {
        0 | 1 => Err(b.missing(node, "closing delimiter")),
        len => Ok(&node.children[1..len - 1]),
    }
}
