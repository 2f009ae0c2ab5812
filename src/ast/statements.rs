use serde::Serialize;

use super::{AssemblyBlock, Expression, FunctionCall, Statement, Tag, VariableDeclaration};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub statements: Vec<Statement>,
}

/// An expression used as a statement. The expression is absent only for the
/// loop clause of a `for` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpressionStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IfStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub condition: Expression,
    pub true_body: Box<Statement>,
    pub false_body: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WhileStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DoWhileStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub init_expression: Option<Box<Statement>>,
    pub condition_expression: Option<Expression>,
    pub loop_expression: ExpressionStatement,
    pub body: Box<Statement>,
}

/// `T x = e;`, `(T a, , U b) = e;` or `var (a, b) = e;`.
///
/// Omitted positions in a tuple declaration stay as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableDeclarationStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub initial_value: Option<Expression>,
    pub variables: Vec<Option<VariableDeclaration>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReturnStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmitStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub event_call: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RevertStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub revert_call: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TryStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub expression: Expression,
    pub catch_clause: Vec<CatchClause>,
    pub body: Block,
    pub return_parameters: Option<Vec<VariableDeclaration>>,
}

/// One `catch` arm. `Kind` is `Error`, `Panic` or empty for a bare catch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatchClause {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub is_reason_type: bool,
    pub kind: String,
    pub parameters: Option<Vec<VariableDeclaration>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UncheckedStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InlineAssemblyStatement {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub body: AssemblyBlock,
}

walk_fields! {
    Block { statements }
    ExpressionStatement { expression }
    IfStatement { condition, true_body, false_body }
    WhileStatement { condition, body }
    DoWhileStatement { body, condition }
    ForStatement { init_expression, condition_expression, loop_expression, body }
    VariableDeclarationStatement { variables, initial_value }
    ReturnStatement { expression }
    BreakStatement {}
    ContinueStatement {}
    ThrowStatement {}
    EmitStatement { event_call }
    RevertStatement { revert_call }
    TryStatement { expression, return_parameters, body, catch_clause }
    CatchClause { parameters, body }
    UncheckedStatement { block }
    InlineAssemblyStatement { body }
}
