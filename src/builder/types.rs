//! Type references.

use crate::ast::{
    ArrayTypeName, ElementaryTypeName, FunctionTypeName, Mapping, NodeKind, Tag, TypeName,
    UserDefinedTypeName, VariableDeclaration,
};
use crate::errors::SolastError;
use crate::syntax::{CstNode, Production};

use super::declarations::{storage_location, visibility};
use super::{AstBuilder, BuildResult};

const FUNCTION_TYPE_VISIBILITY: &[&str] = &["internal", "external"];

/// `T[n]` / `T[]` (left-nested), `address payable`, or a single base type.
pub(super) fn build_type_name(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let type_name: TypeName = match node.len() {
        0 => return Err(b.missing(node, "base type")),
        1 => return b.visit(&node.children[0]),
        2 => ElementaryTypeName {
            tag: Tag::of(NodeKind::ElementaryTypeName),
            name: node.text_at(0).into(),
            state_mutability: node.text_at(1).into(),
        }
        .into(),
        len => ArrayTypeName {
            tag: Tag::of(NodeKind::ArrayTypeName),
            base_type_name: b.boxed_at(node, 0)?,
            length: if len == 4 {
                Some(b.boxed_at(node, 2)?)
            } else {
                None
            },
        }
        .into(),
    };
    Ok(Some(type_name.into()))
}

pub(super) fn build_elementary_type_name(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        ElementaryTypeName {
            tag: Tag::unset(),
            name: node.text.into(),
            state_mutability: String::new(),
        }
        .into(),
    ))
}

pub(super) fn build_user_defined_type_name(_: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        UserDefinedTypeName {
            tag: Tag::unset(),
            name_path: node.text.into(),
        }
        .into(),
    ))
}

pub(super) fn build_mapping(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        Mapping {
            tag: Tag::unset(),
            key_type: Box::new(b.expect_child(node, Production::MappingKey)?),
            value_type: Box::new(b.expect_child(node, Production::TypeName)?),
        }
        .into(),
    ))
}

/// `function (params) <visibility|mutability>* returns (types)`
pub(super) fn build_function_type_name(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    let mut lists = node.find_all(Production::FunctionTypeParameterList);
    let parameter_types = match lists.next() {
        Some(list) => function_type_parameters(b, list)?,
        None => return Err(b.missing(node, "parameter list")),
    };
    let return_types = match lists.next() {
        Some(list) => function_type_parameters(b, list)?,
        None => Vec::new(),
    };

    Ok(Some(
        FunctionTypeName {
            tag: Tag::unset(),
            parameter_types,
            return_types,
            visibility: visibility(node, FUNCTION_TYPE_VISIBILITY),
            state_mutability: node
                .find(Production::StateMutability)
                .map(|m| m.text)
                .unwrap_or("")
                .into(),
        }
        .into(),
    ))
}

pub(super) fn build_function_type_parameter(b: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    Ok(Some(
        VariableDeclaration {
            tag: Tag::of(NodeKind::VariableDeclaration),
            type_name: Some(b.expect_child(node, Production::TypeName)?),
            storage_location: storage_location(node),
            ..VariableDeclaration::default()
        }
        .into(),
    ))
}

fn function_type_parameters(
    b: &AstBuilder,
    list: &CstNode<'_>,
) -> Result<Vec<VariableDeclaration>, SolastError> {
    b.all_children(list, Production::FunctionTypeParameter)
}
