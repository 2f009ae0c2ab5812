use serde::Serialize;

use super::{Expression, Tag, TypeName};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Identifier {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
}

/// A number with an optional unit such as `ether` or `days`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NumberLiteral {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub number: String,
    pub sub_denomination: Option<String>,
}

/// One or more adjacent string fragments.
///
/// `Value` is the concatenation of `Parts`; `IsUnicode` has one flag per
/// fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StringLiteral {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub value: String,
    pub parts: Vec<String>,
    pub is_unicode: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HexLiteral {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub value: String,
    pub parts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BooleanLiteral {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnaryOperation {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub operator: String,
    pub sub_expression: Box<Expression>,
    pub is_prefix: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BinaryOperation {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// `c ? a : b`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Conditional {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub condition: Box<Expression>,
    pub true_expression: Box<Expression>,
    pub false_expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberAccess {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub expression: Box<Expression>,
    pub member_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexAccess {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub base: Box<Expression>,
    pub index: Box<Expression>,
}

/// `a[s:e]`, where either bound may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexRangeAccess {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub base: Box<Expression>,
    pub index_start: Option<Box<Expression>>,
    pub index_end: Option<Box<Expression>>,
}

/// A parenthesized tuple or a bracketed inline array. Omitted tuple
/// components stay as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TupleExpression {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub components: Vec<Option<Expression>>,
    pub is_array: bool,
}

/// A call. For named-argument calls `Names` and `Identifiers` line up with
/// `Arguments`; for positional calls both are empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionCall {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub arguments: Vec<Expression>,
    pub names: Vec<String>,
    pub identifiers: Vec<Identifier>,
    pub expression: Box<Expression>,
}

/// `e{value: v, gas: g}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NameValueExpression {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub expression: Box<Expression>,
    pub arguments: NameValueList,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NameValueList {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub names: Vec<String>,
    pub identifiers: Vec<Identifier>,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewExpression {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub type_name: TypeName,
}

/// An elementary type used as a value, as in `uint(x)` or `address[]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeNameExpression {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub type_name: TypeName,
}

walk_fields! {
    Identifier {}
    NumberLiteral {}
    StringLiteral {}
    HexLiteral {}
    BooleanLiteral {}
    UnaryOperation { sub_expression }
    BinaryOperation { left, right }
    Conditional { condition, true_expression, false_expression }
    MemberAccess { expression }
    IndexAccess { base, index }
    IndexRangeAccess { base, index_start, index_end }
    TupleExpression { components }
    FunctionCall { expression, identifiers, arguments }
    NameValueExpression { expression, arguments }
    NameValueList { identifiers, args }
    NewExpression { type_name }
    TypeNameExpression { type_name }
}
