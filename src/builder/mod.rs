//! Solast Builder - CST to AST.
//!
//! One builder per production, looked up in a static table. A builder reads
//! the node's children, visits the ones that carry meaning, and returns the
//! finished node; the dispatcher then stamps it with the production's tag.
//!
//! Productions that only wrap a single alternative are *suppressed*: their
//! builders delegate and the result keeps the tag of the node it came from.
//! Purely structural productions (parameter lists, modifier lists, argument
//! lists, ...) have no builder; the builder of their parent reads them.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::trace;

use crate::ast::{Node, NodeKind, Slot};
use crate::errors::{to_source_span, ErrorKind, ErrorReporting, PhaseContext, SolastError};
use crate::syntax::{Cst, CstNode, Production, Span};

mod assembly;
mod declarations;
mod expressions;
pub mod list;
mod statements;
mod types;

pub(crate) type BuildResult = Result<Option<Node>, SolastError>;

type BuilderFn = fn(&AstBuilder, &CstNode<'_>) -> BuildResult;

/// Productions that exist only to wrap one alternative. They never get a tag
/// of their own.
pub const SUPPRESSED: &[Production] = &[
    Production::Statement,
    Production::SimpleStatement,
    Production::Expression,
    Production::TypeName,
    Production::ContractPart,
    Production::PrimaryExpression,
    Production::MappingKey,
    Production::Parameter,
    Production::FunctionTypeParameter,
];

/// Tag assigned after construction, keyed by production.
static TAGS: Lazy<HashMap<Production, NodeKind>> = Lazy::new(|| {
    Production::ALL
        .iter()
        .copied()
        .filter(|production| !SUPPRESSED.contains(production))
        .filter_map(|production| {
            NodeKind::ALL
                .iter()
                .copied()
                .find(|kind| kind.name() == production.name())
                .map(|kind| (production, kind))
        })
        .collect()
});

// ============================================================================
// DISPATCH
// ============================================================================

/// Walks a CST and builds the AST for it.
pub struct AstBuilder {
    context: PhaseContext,
}

impl AstBuilder {
    pub fn new(context: PhaseContext) -> Self {
        Self { context }
    }

    /// Builds the AST for a whole tree.
    pub fn build(&self, root: &CstNode<'_>) -> BuildResult {
        self.visit_node(root)
    }

    /// Tokens are leaves and build nothing.
    pub fn visit(&self, tree: &Cst<'_>) -> BuildResult {
        match tree {
            Cst::Token(_) => Ok(None),
            Cst::Node(node) => self.visit_node(node),
        }
    }

    pub fn visit_node(&self, node: &CstNode<'_>) -> BuildResult {
        let Some(builder) = builder_for(node.production) else {
            return Err(self.error(
                ErrorKind::UnregisteredProduction {
                    production: node.production.name().into(),
                },
                node.span,
            ));
        };

        trace!(production = node.production.name(), "build");

        let Some(mut built) = builder(self, node)? else {
            return Ok(None);
        };

        if let Some(&kind) = TAGS.get(&node.production) {
            if built.kind() != kind {
                return Err(self.context.unexpected_node(
                    kind.name(),
                    built.kind().name(),
                    to_source_span(node.span),
                ));
            }
            built.assign_tag(kind).map_err(|existing| {
                self.error(
                    ErrorKind::TagReassigned {
                        existing: existing.name().into(),
                        attempted: kind.name().into(),
                    },
                    node.span,
                )
            })?;
        }

        Ok(Some(built))
    }

    // ------------------------------------------------------------------------
    // Typed access for builders
    // ------------------------------------------------------------------------

    /// Visits `node` and requires a result that fits slot `T`.
    pub(crate) fn expect<T: Slot>(&self, node: &CstNode<'_>) -> Result<T, SolastError> {
        match self.visit_node(node)? {
            Some(built) => T::try_from(built).map_err(|other| {
                self.context
                    .unexpected_node(T::NAME, other.kind().name(), to_source_span(node.span))
            }),
            None => Err(self.missing(node, T::NAME)),
        }
    }

    pub(crate) fn expect_cst<T: Slot>(&self, tree: &Cst<'_>) -> Result<T, SolastError> {
        match tree {
            Cst::Node(node) => self.expect(node),
            Cst::Token(token) => Err(self.context.unexpected_node(
                T::NAME,
                token.text,
                to_source_span(token.span),
            )),
        }
    }

    /// The child at `index`, which must build into `T`.
    pub(crate) fn expect_at<T: Slot>(
        &self,
        parent: &CstNode<'_>,
        index: usize,
    ) -> Result<T, SolastError> {
        let child = parent
            .child(index)
            .ok_or_else(|| self.missing(parent, &format!("child {}", index)))?;
        self.expect_cst(child)
    }

    pub(crate) fn boxed_at<T: Slot>(
        &self,
        parent: &CstNode<'_>,
        index: usize,
    ) -> Result<Box<T>, SolastError> {
        self.expect_at(parent, index).map(Box::new)
    }

    /// The first direct child of `production`, which must build into `T`.
    pub(crate) fn expect_child<T: Slot>(
        &self,
        parent: &CstNode<'_>,
        production: Production,
    ) -> Result<T, SolastError> {
        self.expect(self.require(parent, production)?)
    }

    pub(crate) fn optional_child<T: Slot>(
        &self,
        parent: &CstNode<'_>,
        production: Production,
    ) -> Result<Option<T>, SolastError> {
        parent
            .find(production)
            .map(|child| self.expect(child))
            .transpose()
    }

    /// Every direct child of `production`, each built into `T`.
    pub(crate) fn all_children<T: Slot>(
        &self,
        parent: &CstNode<'_>,
        production: Production,
    ) -> Result<Vec<T>, SolastError> {
        parent
            .find_all(production)
            .map(|child| self.expect(child))
            .collect()
    }

    /// A direct child the grammar guarantees.
    pub(crate) fn require<'t, 'src>(
        &self,
        parent: &'t CstNode<'src>,
        production: Production,
    ) -> Result<&'t CstNode<'src>, SolastError> {
        parent
            .find(production)
            .ok_or_else(|| self.missing(parent, production.name()))
    }

    /// Splits comma-separated children into element slots, building each
    /// element with `build`.
    pub(crate) fn sparse<'t, 'src: 't, T>(
        &self,
        children: &'t [Cst<'src>],
        mut build: impl FnMut(&'t Cst<'src>) -> Result<T, SolastError>,
    ) -> Result<Vec<Option<T>>, SolastError> {
        let slots = list::sparse_elements(children, ",").map_err(|found| {
            self.error(
                ErrorKind::SeparatorExpected {
                    found: found.text().into(),
                },
                found.span(),
            )
        })?;
        slots
            .into_iter()
            .map(|slot| slot.map(&mut build).transpose())
            .collect()
    }

    // ------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------

    pub(crate) fn error(&self, kind: ErrorKind, span: Span) -> SolastError {
        self.context.report(kind, to_source_span(span))
    }

    pub(crate) fn missing(&self, node: &CstNode<'_>, element: &str) -> SolastError {
        self.context
            .missing_element(node.production.name(), element, to_source_span(node.span))
    }

    pub(crate) fn unsupported(&self, node: &CstNode<'_>, shape: &str) -> SolastError {
        self.context
            .unsupported_shape(node.production.name(), shape, to_source_span(node.span))
    }
}

/// Suppressed productions hand back whatever their single alternative builds.
fn build_delegate(builder: &AstBuilder, node: &CstNode<'_>) -> BuildResult {
    match node.child(0) {
        Some(child) => builder.visit(child),
        None => Err(builder.missing(node, "alternative")),
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// The builder for each production. Structural productions that only their
/// parent's builder reads have none.
fn builder_for(production: Production) -> Option<BuilderFn> {
    use Production as P;
    let builder: BuilderFn = match production {
        P::SourceUnit => declarations::build_source_unit,
        P::PragmaDirective => declarations::build_pragma_directive,
        P::ImportDirective => declarations::build_import_directive,
        P::ContractDefinition => declarations::build_contract_definition,
        P::InheritanceSpecifier => declarations::build_inheritance_specifier,
        P::StateVariableDeclaration => declarations::build_state_variable_declaration,
        P::FileLevelConstant => declarations::build_file_level_constant,
        P::CustomErrorDefinition => declarations::build_custom_error_definition,
        P::TypeDefinition => declarations::build_type_definition,
        P::UsingForDeclaration => declarations::build_using_for_declaration,
        P::StructDefinition => declarations::build_struct_definition,
        P::ModifierDefinition => declarations::build_modifier_definition,
        P::ModifierInvocation => declarations::build_modifier_invocation,
        P::FunctionDefinition => declarations::build_function_definition,
        P::EventDefinition => declarations::build_event_definition,
        P::EnumValue => declarations::build_enum_value,
        P::EnumDefinition => declarations::build_enum_definition,
        P::VariableDeclaration => declarations::build_variable_declaration,
        P::Parameter => declarations::build_parameter,

        P::UserDefinedTypeName => types::build_user_defined_type_name,
        P::Mapping => types::build_mapping,
        P::FunctionTypeName => types::build_function_type_name,
        P::ElementaryTypeName => types::build_elementary_type_name,
        P::TypeName => types::build_type_name,
        P::FunctionTypeParameter => types::build_function_type_parameter,

        P::Block => statements::build_block,
        P::ExpressionStatement => statements::build_expression_statement,
        P::IfStatement => statements::build_if_statement,
        P::TryStatement => statements::build_try_statement,
        P::CatchClause => statements::build_catch_clause,
        P::WhileStatement => statements::build_while_statement,
        P::UncheckedStatement => statements::build_unchecked_statement,
        P::ForStatement => statements::build_for_statement,
        P::InlineAssemblyStatement => statements::build_inline_assembly_statement,
        P::DoWhileStatement => statements::build_do_while_statement,
        P::ContinueStatement => statements::build_continue_statement,
        P::BreakStatement => statements::build_break_statement,
        P::ReturnStatement => statements::build_return_statement,
        P::ThrowStatement => statements::build_throw_statement,
        P::EmitStatement => statements::build_emit_statement,
        P::RevertStatement => statements::build_revert_statement,
        P::VariableDeclarationStatement => statements::build_variable_declaration_statement,

        P::Expression => expressions::build_expression,
        P::PrimaryExpression => expressions::build_primary_expression,
        P::NameValueList => expressions::build_name_value_list,
        P::FunctionCall => expressions::build_function_call,
        P::TupleExpression => expressions::build_tuple_expression,
        P::TypeNameExpression => expressions::build_type_name_expression,
        P::NumberLiteral => expressions::build_number_literal,
        P::HexLiteral => expressions::build_hex_literal,
        P::StringLiteral => expressions::build_string_literal,
        P::Identifier => expressions::build_identifier,

        P::AssemblyBlock => assembly::build_assembly_block,
        P::AssemblyLocalDefinition => assembly::build_assembly_local_definition,
        P::AssemblyAssignment => assembly::build_assembly_assignment,
        P::AssemblyMember => assembly::build_assembly_member,
        P::AssemblyCall => assembly::build_assembly_call,
        P::AssemblyLiteral => assembly::build_assembly_literal,
        P::AssemblyIf => assembly::build_assembly_if,
        P::AssemblyFor => assembly::build_assembly_for,
        P::AssemblySwitch => assembly::build_assembly_switch,
        P::AssemblyCase => assembly::build_assembly_case,
        P::AssemblyFunctionDefinition => assembly::build_assembly_function_definition,
        P::AssemblyFlowControl => assembly::build_assembly_flow_control,

        P::Statement | P::SimpleStatement | P::ContractPart | P::MappingKey => build_delegate,

        P::PragmaName
        | P::PragmaValue
        | P::ImportDeclaration
        | P::ImportPath
        | P::FunctionDescriptor
        | P::ReturnParameters
        | P::ModifierList
        | P::ParameterList
        | P::EventParameterList
        | P::EventParameter
        | P::FunctionTypeParameterList
        | P::OverrideSpecifier
        | P::StorageLocation
        | P::StateMutability
        | P::VariableDeclarationList
        | P::IdentifierList
        | P::ExpressionList
        | P::NameValue
        | P::FunctionCallArguments
        | P::AssemblyIdentifierList
        | P::AssemblyFunctionReturns => return None,
    };
    Some(builder)
}
