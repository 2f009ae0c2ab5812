//! Source units, contracts and everything declared inside them.

use serde::Serialize;

use super::{
    Block, ContractPart, ElementaryTypeName, Expression, Identifier, SourceUnitPart,
    StringLiteral, Tag, TypeName, UserDefinedTypeName, Walk,
};

/// Root of every successful parse.
///
/// Top-level items are kept in source order. The trailing end-of-input token
/// contributes a `null` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceUnit {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub children: Vec<Option<SourceUnitPart>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PragmaDirective {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    /// Text between the pragma name and the `;`, verbatim.
    pub value: String,
}

/// `import "p";`, `import "p" as A;`, `import * as A from "p";` or
/// `import {a as b, c} from "p";`.
///
/// Exactly one of the unit alias and the symbol alias lists is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportDirective {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub path: String,
    pub path_literal: StringLiteral,
    pub unit_alias: String,
    pub unit_alias_identifier: Option<Identifier>,
    pub symbol_aliases: Option<Vec<(String, String)>>,
    pub symbol_aliases_identifiers: Option<Vec<(Identifier, Option<Identifier>)>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContractDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    #[serde(rename = "name")]
    pub name: String,
    pub sub_nodes: Vec<ContractPart>,
    pub base_contracts: Vec<InheritanceSpecifier>,
    /// `contract`, `interface` or `library`.
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InheritanceSpecifier {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub base_name: UserDefinedTypeName,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StructDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub members: Vec<VariableDeclaration>,
}

/// A declared variable: state variable, parameter, struct member or local.
///
/// Which fields are meaningful depends on where the declaration appears; the
/// others keep their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableDeclaration {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub type_name: Option<TypeName>,
    pub identifier: Option<Identifier>,
    pub is_indexed: bool,
    pub is_state_var: bool,
    pub is_declared_const: bool,
    pub storage_location: String,
    pub expression: Option<Expression>,
    pub visibility: String,
    #[serde(rename = "Override")]
    pub overrides: Vec<UserDefinedTypeName>,
}

/// `InitialValue` is kept for schema compatibility and always null; the
/// initializer is the variable's `Expression`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateVariableDeclaration {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub variables: Vec<StateVariableDeclarationVariable>,
    pub initial_value: Option<Expression>,
}

/// A state variable entry: the declaration fields plus `IsImmutable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateVariableDeclarationVariable {
    #[serde(flatten)]
    pub declaration: VariableDeclaration,
    pub is_immutable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileLevelConstant {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub initial_value: Expression,
    pub type_name: TypeName,
    pub is_declared_const: bool,
    pub is_immutable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomErrorDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub parameters: Vec<VariableDeclaration>,
}

/// `type Name is <elementary type>;`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub definition: ElementaryTypeName,
}

/// `using L for T;`. The type is `None` for `using L for *;`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsingForDeclaration {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub library_name: String,
    pub type_name: Option<TypeName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifierDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub parameters: Option<Vec<VariableDeclaration>>,
    pub body: Option<Block>,
    pub is_virtual: bool,
    #[serde(rename = "Override")]
    pub overrides: Vec<UserDefinedTypeName>,
}

/// A modifier applied in a function header. `Arguments` is `None` when the
/// modifier is written without parentheses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifierInvocation {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub arguments: Option<Vec<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub parameters: Vec<VariableDeclaration>,
    pub modifiers: Vec<ModifierInvocation>,
    pub return_parameters: Option<Vec<VariableDeclaration>>,
    pub body: Option<Block>,
    pub state_mutability: String,
    pub visibility: String,
    pub is_constructor: bool,
    pub is_receive_ether: bool,
    pub is_fallback: bool,
    pub is_virtual: bool,
    #[serde(rename = "Override")]
    pub overrides: Vec<UserDefinedTypeName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub parameters: Vec<VariableDeclaration>,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDefinition {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
    pub members: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    #[serde(rename = "type")]
    pub tag: Tag,
    pub name: String,
}

walk_fields! {
    SourceUnit { children }
    PragmaDirective {}
    ImportDirective { path_literal, unit_alias_identifier, symbol_aliases_identifiers }
    ContractDefinition { sub_nodes, base_contracts }
    InheritanceSpecifier { base_name, arguments }
    StructDefinition { members }
    VariableDeclaration { type_name, identifier, expression, overrides }
    StateVariableDeclaration { variables, initial_value }
    FileLevelConstant { initial_value, type_name }
    CustomErrorDefinition { parameters }
    TypeDefinition { definition }
    UsingForDeclaration { type_name }
    ModifierDefinition { parameters, body, overrides }
    ModifierInvocation { arguments }
    FunctionDefinition { parameters, modifiers, return_parameters, body, overrides }
    EventDefinition { parameters }
    EnumDefinition { members }
    EnumValue {}
}

impl Walk for StateVariableDeclarationVariable {
    fn walk<'a>(&'a self, visitor: &mut dyn FnMut(super::NodeRef<'a>)) {
        self.declaration.walk(visitor)
    }
}
