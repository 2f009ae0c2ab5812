//! Inline assembly (Yul) nodes.
//!
//! Yul identifiers are kept as plain strings; only calls, literals and
//! member accesses appear in expression position.

use serde::Serialize;

use super::{AssemblyExpression, AssemblyItem, Tag};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyBlock {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub operations: Vec<AssemblyItem>,
}

/// `let a, b := e`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyLocalDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub names: Vec<String>,
    pub expression: Option<AssemblyExpression>,
}

/// `a, b := e` or `x.slot := e`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyAssignment {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub names: Vec<String>,
    pub expression: AssemblyExpression,
}

/// A builtin or user function call. A bare identifier is a call with no
/// argument list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyCall {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub function_name: String,
    pub arguments: Vec<AssemblyExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyMember {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub expression: String,
    pub member_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyLiteral {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyIf {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub condition: AssemblyExpression,
    pub body: AssemblyBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyFor {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub pre: AssemblyBlock,
    pub condition: AssemblyExpression,
    pub post: AssemblyBlock,
    pub body: AssemblyBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblySwitch {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub expression: AssemblyExpression,
    pub cases: Vec<AssemblyCase>,
}

/// A `case` arm, or the `default` arm when `Value` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyCase {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub value: Option<AssemblyLiteral>,
    pub block: AssemblyBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyFunctionDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub arguments: Vec<String>,
    pub return_arguments: Vec<String>,
    pub body: AssemblyBlock,
}

/// `break`, `continue` or `leave`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyFlowControl {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub keyword: String,
}

walk_fields! {
    AssemblyBlock { operations }
    AssemblyLocalDefinition { expression }
    AssemblyAssignment { expression }
    AssemblyCall { arguments }
    AssemblyMember {}
    AssemblyLiteral {}
    AssemblyIf { condition, body }
    AssemblyFor { pre, condition, post, body }
    AssemblySwitch { expression, cases }
    AssemblyCase { value, block }
    AssemblyFunctionDefinition { body }
    AssemblyFlowControl {}
}
