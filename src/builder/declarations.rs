//! Source units, contracts and declarations.

use crate::ast::{
    ContractDefinition, ContractPart, CustomErrorDefinition, ElementaryTypeName, EnumDefinition,
    EnumValue, EventDefinition, Expression, FileLevelConstant, FunctionDefinition, Identifier,
    ImportDirective, InheritanceSpecifier, ModifierDefinition, ModifierInvocation, NodeKind,
    PragmaDirective, SourceUnit, SourceUnitPart, StateVariableDeclaration,
    StateVariableDeclarationVariable, StringLiteral, StructDefinition, Tag, TypeDefinition,
    TypeName, UserDefinedTypeName, UsingForDeclaration, VariableDeclaration,
};
use crate::errors::{to_source_span, ErrorReporting, SolastError};
use crate::syntax::{Cst, CstNode, Production};

use super::{AstBuilder, BuildResult};

const FUNCTION_VISIBILITY: &[&str] = &["external", "internal", "public", "private"];
const STATE_VARIABLE_VISIBILITY: &[&str] = &["internal", "public", "private"];
const CONSTRUCTOR_VISIBILITY: &[&str] = &["internal", "public"];

/// First candidate keyword present among `node`'s tokens, or "default".
pub(super) fn visibility(node: &CstNode<'_>, candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|keyword| node.has_token(keyword))
        .copied()
        .unwrap_or("default")
        .to_string()
}

// ============================================================================
// SOURCE UNIT AND DIRECTIVES
// ============================================================================

pub(super) fn build_source_unit(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let children = node
        .children
        .iter()
        .map(|child| {
            b.visit(child)?
                .map(|built| {
                    SourceUnitPart::try_from(built).map_err(|other| {
                        b.context.unexpected_node(
                            "top-level declaration",
                            other.kind().name(),
                            to_source_span(child.span()),
                        )
                    })
                })
                .transpose()
        })
        .collect::<Result<Vec<_>, SolastError>>()?;

    Ok(Some(
        SourceUnit {
            tag: Tag::unset(),
            children,
        }
        .into(),
    ))
}

pub(super) fn build_pragma_directive(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let name = b.require(node, Production::PragmaName)?.text;
    let value = b.require(node, Production::PragmaValue)?.text;
    Ok(Some(
        PragmaDirective {
            tag: Tag::unset(),
            name: name.into(),
            value: value.into(),
        }
        .into(),
    ))
}

pub(super) fn build_import_directive(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let path = unquote(b.require(node, Production::ImportPath)?.text).to_string();
    let path_literal = StringLiteral {
        tag: Tag::of(NodeKind::StringLiteral),
        value: path.clone(),
        parts: vec![path.clone()],
        is_unicode: vec![false],
    };

    let mut directive = ImportDirective {
        tag: Tag::unset(),
        path,
        path_literal,
        unit_alias: String::new(),
        unit_alias_identifier: None,
        symbol_aliases: None,
        symbol_aliases_identifiers: None,
    };

    if node.find(Production::ImportDeclaration).is_some() {
        let mut aliases = Vec::new();
        let mut identifiers = Vec::new();
        for declaration in node.find_all(Production::ImportDeclaration) {
            let mut names = declaration.find_all(Production::Identifier);
            let symbol = names
                .next()
                .ok_or_else(|| b.missing(declaration, "symbol"))?;
            let alias = names.next();
            aliases.push((
                symbol.text.to_string(),
                alias.map(|a| a.text).unwrap_or("").to_string(),
            ));
            identifiers.push((
                b.expect::<Identifier>(symbol)?,
                alias.map(|a| b.expect::<Identifier>(a)).transpose()?,
            ));
        }
        directive.symbol_aliases = Some(aliases);
        directive.symbol_aliases_identifiers = Some(identifiers);
    } else {
        // `import A as B from "p"` aliases to the last name
        if let Some(alias) = node.find_all(Production::Identifier).last() {
            directive.unit_alias = alias.text.to_string();
            directive.unit_alias_identifier = Some(b.expect::<Identifier>(alias)?);
        }
    }

    Ok(Some(directive.into()))
}

/// Drops the surrounding quote characters of a literal.
pub(super) fn unquote(text: &str) -> &str {
    text.get(1..text.len().saturating_sub(1)).unwrap_or("")
}

// ============================================================================
// CONTRACTS
// ============================================================================

pub(super) fn build_contract_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let name = b.require(node, Production::Identifier)?.text;
    let kind = node
        .children
        .iter()
        .find(|child| {
            child.is_token() && matches!(child.text(), "contract" | "interface" | "library")
        })
        .map(Cst::text)
        .ok_or_else(|| b.missing(node, "contract kind"))?;

    Ok(Some(
        ContractDefinition {
            tag: Tag::unset(),
            name: name.into(),
            sub_nodes: b.all_children::<ContractPart>(node, Production::ContractPart)?,
            base_contracts: b
                .all_children::<InheritanceSpecifier>(node, Production::InheritanceSpecifier)?,
            kind: kind.into(),
        }
        .into(),
    ))
}

pub(super) fn build_inheritance_specifier(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let arguments = match node.find(Production::ExpressionList) {
        Some(list) => expression_list(b, list)?,
        None => Vec::new(),
    };
    Ok(Some(
        InheritanceSpecifier {
            tag: Tag::unset(),
            base_name: b.expect_child(node, Production::UserDefinedTypeName)?,
            arguments,
        }
        .into(),
    ))
}

pub(super) fn build_state_variable_declaration(
    b: &AstBuilder,
    node: &CstNode<'_>,
) -> BuildResult {
    let identifier = b.require(node, Production::Identifier)?;
    let declaration = VariableDeclaration {
        tag: Tag::of(NodeKind::VariableDeclaration),
        name: identifier.text.into(),
        type_name: Some(b.expect_child(node, Production::TypeName)?),
        identifier: Some(b.expect(identifier)?),
        is_state_var: true,
        is_declared_const: node.has_token("constant"),
        expression: b.optional_child(node, Production::Expression)?,
        visibility: visibility(node, STATE_VARIABLE_VISIBILITY),
        overrides: overrides(b, node)?,
        ..VariableDeclaration::default()
    };

    Ok(Some(
        StateVariableDeclaration {
            tag: Tag::unset(),
            variables: vec![StateVariableDeclarationVariable {
                declaration,
                is_immutable: node.has_token("immutable"),
            }],
            initial_value: None,
        }
        .into(),
    ))
}

pub(super) fn build_file_level_constant(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        FileLevelConstant {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            initial_value: b.expect_child(node, Production::Expression)?,
            type_name: b.expect_child(node, Production::TypeName)?,
            is_declared_const: true,
            is_immutable: false,
        }
        .into(),
    ))
}

pub(super) fn build_custom_error_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        CustomErrorDefinition {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            parameters: parameter_list(b, b.require(node, Production::ParameterList)?)?,
        }
        .into(),
    ))
}

pub(super) fn build_type_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        TypeDefinition {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            definition: b.expect_child::<ElementaryTypeName>(node, Production::ElementaryTypeName)?,
        }
        .into(),
    ))
}

pub(super) fn build_using_for_declaration(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        UsingForDeclaration {
            tag: Tag::unset(),
            library_name: b.require(node, Production::Identifier)?.text.into(),
            type_name: b.optional_child::<TypeName>(node, Production::TypeName)?,
        }
        .into(),
    ))
}

pub(super) fn build_struct_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        StructDefinition {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            members: b.all_children(node, Production::VariableDeclaration)?,
        }
        .into(),
    ))
}

// ============================================================================
// FUNCTIONS AND MODIFIERS
// ============================================================================

pub(super) fn build_modifier_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let parameters = node
        .find(Production::ParameterList)
        .map(|list| parameter_list(b, list))
        .transpose()?;

    Ok(Some(
        ModifierDefinition {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            parameters,
            body: b.optional_child(node, Production::Block)?,
            is_virtual: node.has_token("virtual"),
            overrides: overrides(b, node)?,
        }
        .into(),
    ))
}

/// `m` has no argument list at all, `m()` an empty one.
pub(super) fn build_modifier_invocation(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let arguments = if node.has_token("(") {
        match node.find(Production::ExpressionList) {
            Some(list) => Some(expression_list(b, list)?),
            None => Some(Vec::new()),
        }
    } else {
        None
    };

    Ok(Some(
        ModifierInvocation {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            arguments,
        }
        .into(),
    ))
}

pub(super) fn build_function_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let descriptor = b.require(node, Production::FunctionDescriptor)?;
    let modifiers = b.require(node, Production::ModifierList)?;

    let mut function = FunctionDefinition {
        tag: Tag::unset(),
        name: String::new(),
        parameters: parameter_list(b, b.require(node, Production::ParameterList)?)?,
        modifiers: b.all_children(modifiers, Production::ModifierInvocation)?,
        return_parameters: None,
        body: b.optional_child(node, Production::Block)?,
        state_mutability: modifiers
            .find(Production::StateMutability)
            .map(|m| m.text)
            .unwrap_or("")
            .into(),
        visibility: String::new(),
        is_constructor: false,
        is_receive_ether: false,
        is_fallback: false,
        is_virtual: modifiers.has_token("virtual"),
        overrides: overrides(b, modifiers)?,
    };

    match descriptor.text_at(0) {
        "constructor" => {
            function.is_constructor = true;
            function.visibility = visibility(modifiers, CONSTRUCTOR_VISIBILITY);
        }
        "fallback" => {
            function.is_fallback = true;
            function.visibility = "external".into();
        }
        "receive" => {
            function.is_receive_ether = true;
            function.visibility = "external".into();
        }
        "function" => {
            function.name = descriptor
                .find(Production::Identifier)
                .map(|name| name.text)
                .unwrap_or("")
                .into();
            function.return_parameters = node
                .find(Production::ReturnParameters)
                .map(|returns| parameter_list(b, b.require(returns, Production::ParameterList)?))
                .transpose()?;
            function.visibility = visibility(modifiers, FUNCTION_VISIBILITY);
            // an unnamed `function()` is the pre-0.6 fallback
            function.is_fallback = function.name.is_empty();
        }
        other => return Err(b.unsupported(descriptor, other)),
    }

    Ok(Some(function.into()))
}

pub(super) fn build_event_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let list = b.require(node, Production::EventParameterList)?;
    let parameters = list
        .find_all(Production::EventParameter)
        .map(|parameter| event_parameter(b, parameter))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(
        EventDefinition {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            parameters,
            is_anonymous: node.has_token("anonymous"),
        }
        .into(),
    ))
}

fn event_parameter(
    b: &AstBuilder,
    node: &CstNode<'_>,
) -> Result<VariableDeclaration, SolastError> {
    let identifier = node.find(Production::Identifier);
    Ok(VariableDeclaration {
        tag: Tag::of(NodeKind::VariableDeclaration),
        name: identifier.map(|i| i.text).unwrap_or("").into(),
        type_name: Some(b.expect_child(node, Production::TypeName)?),
        identifier: identifier.map(|i| b.expect(i)).transpose()?,
        is_indexed: node.has_token("indexed"),
        ..VariableDeclaration::default()
    })
}

pub(super) fn build_enum_definition(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        EnumDefinition {
            tag: Tag::unset(),
            name: b.require(node, Production::Identifier)?.text.into(),
            members: b.all_children::<EnumValue>(node, Production::EnumValue)?,
        }
        .into(),
    ))
}

pub(super) fn build_enum_value(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        EnumValue {
            tag: Tag::unset(),
            name: node.text.into(),
        }
        .into(),
    ))
}

// ============================================================================
// VARIABLES AND PARAMETERS
// ============================================================================

pub(super) fn build_variable_declaration(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let identifier = b.require(node, Production::Identifier)?;
    Ok(Some(
        VariableDeclaration {
            tag: Tag::unset(),
            name: identifier.text.into(),
            type_name: Some(b.expect_child(node, Production::TypeName)?),
            identifier: Some(b.expect(identifier)?),
            storage_location: storage_location(node),
            ..VariableDeclaration::default()
        }
        .into(),
    ))
}

pub(super) fn build_parameter(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let identifier = node.find(Production::Identifier);
    Ok(Some(
        VariableDeclaration {
            tag: Tag::of(NodeKind::VariableDeclaration),
            name: identifier.map(|i| i.text).unwrap_or("").into(),
            type_name: Some(b.expect_child(node, Production::TypeName)?),
            identifier: identifier.map(|i| b.expect(i)).transpose()?,
            storage_location: storage_location(node),
            ..VariableDeclaration::default()
        }
        .into(),
    ))
}

pub(super) fn parameter_list(
    b: &AstBuilder,
    list: &CstNode<'_>,
) -> Result<Vec<VariableDeclaration>, SolastError> {
    b.all_children(list, Production::Parameter)
}

pub(super) fn expression_list(
    b: &AstBuilder,
    list: &CstNode<'_>,
) -> Result<Vec<Expression>, SolastError> {
    b.all_children(list, Production::Expression)
}

pub(super) fn storage_location(node: &CstNode<'_>) -> String {
    node.find(Production::StorageLocation)
        .map(|location| location.text)
        .unwrap_or("")
        .into()
}

/// Base types named by an override specifier among `node`'s children. No
/// specifier, or a bare `override`, gives an empty list.
fn overrides(
    b: &AstBuilder,
    node: &CstNode<'_>,
) -> Result<Vec<UserDefinedTypeName>, SolastError> {
    match node.find(Production::OverrideSpecifier) {
        Some(specifier) => b.all_children(specifier, Production::UserDefinedTypeName),
        None => Ok(Vec::new()),
    }
}
