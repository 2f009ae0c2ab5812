use serde::Serialize;

use super::{Expression, Tag, TypeName, VariableDeclaration};

/// A built-in type such as `uint256`, `bytes32` or `address payable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ElementaryTypeName {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub state_mutability: String,
}

/// A possibly dotted path naming a contract, struct, enum or alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserDefinedTypeName {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArrayTypeName {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub base_type_name: Box<TypeName>,
    pub length: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mapping {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub key_type: Box<TypeName>,
    pub value_type: Box<TypeName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionTypeName {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub parameter_types: Vec<VariableDeclaration>,
    pub return_types: Vec<VariableDeclaration>,
    pub visibility: String,
    pub state_mutability: String,
}

walk_fields! {
    ElementaryTypeName {}
    UserDefinedTypeName {}
    ArrayTypeName { base_type_name, length }
    Mapping { key_type, value_type }
    FunctionTypeName { parameter_types, return_types }
}
