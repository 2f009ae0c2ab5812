//! Inline assembly.

use crate::ast::{
    AssemblyAssignment, AssemblyBlock, AssemblyCall, AssemblyCase, AssemblyExpression,
    AssemblyFlowControl, AssemblyFor, AssemblyFunctionDefinition, AssemblyIf, AssemblyItem,
    AssemblyLiteral, AssemblyLocalDefinition, AssemblyMember, AssemblySwitch, Tag,
};
use crate::syntax::{Cst, CstNode, Production};

use super::{AstBuilder, BuildResult};

const EXPRESSIONS: &[Production] = &[
    Production::AssemblyCall,
    Production::AssemblyLiteral,
    Production::AssemblyMember,
];

/// Yul names in an identifier list, commas dropped.
fn names(list: &CstNode<'_>) -> Vec<String> {
    list.children
        .iter()
        .filter(|child| child.is_token() && child.text() != ",")
        .map(|child| child.text().to_string())
        .collect()
}

fn expressions<'t, 'src>(node: &'t CstNode<'src>) -> impl Iterator<Item = &'t CstNode<'src>> {
    node.nodes()
        .filter(|child| EXPRESSIONS.contains(&child.production))
}

pub(super) fn build_assembly_block(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let operations = node
        .nodes()
        .map(|item| b.expect::<AssemblyItem>(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(
        AssemblyBlock {
            tag: Tag::unset(),
            operations,
        }
        .into(),
    ))
}

pub(super) fn build_assembly_local_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let list = b.require(node, Production::AssemblyIdentifierList)?;
    Ok(Some(
        AssemblyLocalDefinition {
            tag: Tag::unset(),
            names: names(list),
            expression: expressions(node)
                .next()
                .map(|expression| b.expect::<AssemblyExpression>(expression))
                .transpose()?,
        }
        .into(),
    ))
}

pub(super) fn build_assembly_assignment(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let target = node
        .child(0)
        .and_then(Cst::as_node)
        .ok_or_else(|| b.missing(node, "assignment target"))?;
    let names = match target.production {
        Production::AssemblyIdentifierList => names(target),
        _ => vec![target.text.to_string()],
    };

    Ok(Some(
        AssemblyAssignment {
            tag: Tag::unset(),
            names,
            expression: b.expect_at(node, 2)?,
        }
        .into(),
    ))
}

/// A bare name is a call without an argument list.
pub(super) fn build_assembly_call(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblyCall {
            tag: Tag::unset(),
            function_name: node.text_at(0).into(),
            arguments: node
                .nodes()
                .map(|argument| b.expect::<AssemblyExpression>(argument))
                .collect::<Result<Vec<_>, _>>()?,
        }
        .into(),
    ))
}

pub(super) fn build_assembly_member(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblyMember {
            tag: Tag::unset(),
            expression: node.text_at(0).into(),
            member_name: node.text_at(2).into(),
        }
        .into(),
    ))
}

pub(super) fn build_assembly_literal(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblyLiteral {
            tag: Tag::unset(),
            value: node.text.into(),
        }
        .into(),
    ))
}

pub(super) fn build_assembly_if(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblyIf {
            tag: Tag::unset(),
            condition: b.expect_at(node, 1)?,
            body: b.expect_child(node, Production::AssemblyBlock)?,
        }
        .into(),
    ))
}

/// `for { pre } condition { post } { body }`
pub(super) fn build_assembly_for(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblyFor {
            tag: Tag::unset(),
            pre: b.expect_at(node, 1)?,
            condition: b.expect_at(node, 2)?,
            post: b.expect_at(node, 3)?,
            body: b.expect_at(node, 4)?,
        }
        .into(),
    ))
}

pub(super) fn build_assembly_switch(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblySwitch {
            tag: Tag::unset(),
            expression: b.expect_at(node, 1)?,
            cases: b.all_children::<AssemblyCase>(node, Production::AssemblyCase)?,
        }
        .into(),
    ))
}

pub(super) fn build_assembly_case(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblyCase {
            tag: Tag::unset(),
            value: b.optional_child::<AssemblyLiteral>(node, Production::AssemblyLiteral)?,
            block: b.expect_child(node, Production::AssemblyBlock)?,
        }
        .into(),
    ))
}

pub(super) fn build_assembly_function_definition(
    b: &AstBuilder,
    node: &CstNode<'_>,
) -> BuildResult {
    let return_arguments = node
        .find(Production::AssemblyFunctionReturns)
        .and_then(|returns| returns.find(Production::AssemblyIdentifierList))
        .map(names)
        .unwrap_or_default();

    Ok(Some(
        AssemblyFunctionDefinition {
            tag: Tag::unset(),
            name: node.text_at(1).into(),
            arguments: node
                .find(Production::AssemblyIdentifierList)
                .map(names)
                .unwrap_or_default(),
            return_arguments,
            body: b.expect_child(node, Production::AssemblyBlock)?,
        }
        .into(),
    ))
}

pub(super) fn build_assembly_flow_control(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        AssemblyFlowControl {
            tag: Tag::unset(),
            keyword: node.text.into(),
        }
        .into(),
    ))
}
