//! Solast AST - the node model produced by the builders.
//!
//! Every node is a plain struct whose first field is its [`Tag`]. Fields that
//! may hold several node kinds use a sum type listing exactly those kinds
//! ([`Expression`], [`Statement`], [`TypeName`], ...). [`Node`] is the closed
//! union of every kind and is what the dispatcher passes around.
//!
//! Serialization follows the established Solidity AST schema: the tag is
//! written first as `"type"`, fields follow in declaration order, absent
//! optionals are `null`, and sparse sequences keep their `null` slots.

use serde::{Serialize, Serializer};
use std::fmt;

/// Implements [`Walk`] for node structs: the node itself is visited first,
/// then the listed child fields in order.
macro_rules! walk_fields {
    ($($node:ident { $($field:ident),* $(,)? })*) => {
        $(
            impl $crate::ast::Walk for $node {
                fn walk<'a>(&'a self, visitor: &mut dyn FnMut($crate::ast::NodeRef<'a>)) {
                    visitor($crate::ast::NodeRef::$node(self));
                    $( $crate::ast::Walk::walk(&self.$field, visitor); )*
                }
            }
        )*
    };
}

/// Declares a slot union: an untagged sum over the node kinds legal in one
/// field position.
macro_rules! node_union {
    ($(#[$meta:meta])* $union:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum $union {
            $($variant($variant)),*
        }

        impl $union {
            pub fn tag(&self) -> Tag {
                match self {
                    $($union::$variant(node) => node.tag),*
                }
            }
        }

        impl TryFrom<Node> for $union {
            type Error = Node;

            fn try_from(node: Node) -> Result<Self, Node> {
                match node {
                    $(Node::$variant(inner) => Ok($union::$variant(inner)),)*
                    other => Err(other),
                }
            }
        }

        impl From<$union> for Node {
            fn from(value: $union) -> Node {
                match value {
                    $($union::$variant(inner) => Node::$variant(inner)),*
                }
            }
        }

        $(
            impl From<$variant> for $union {
                fn from(node: $variant) -> Self {
                    $union::$variant(node)
                }
            }
        )*

        impl Slot for $union {
            const NAME: &'static str = stringify!($union);
        }

        impl Walk for $union {
            fn walk<'a>(&'a self, visitor: &mut dyn FnMut(NodeRef<'a>)) {
                match self {
                    $($union::$variant(node) => node.walk(visitor)),*
                }
            }
        }
    };
}

/// Declares the closed set of node kinds: `NodeKind`, the owned `Node` union
/// and the borrowed `NodeRef` view.
macro_rules! nodes {
    ($($name:ident),* $(,)?) => {
        /// Every kind of AST node. The kind's name is its serialized tag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($name),*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$name),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$name => stringify!($name)),*
                }
            }
        }

        /// Any AST node, owned.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Node {
            $($name($name)),*
        }

        /// Any AST node, borrowed. This is what [`Walk`] visitors receive.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum NodeRef<'a> {
            $($name(&'a $name)),*
        }

        impl Node {
            pub fn tag(&self) -> Tag {
                match self {
                    $(Node::$name(node) => node.tag),*
                }
            }

            pub(crate) fn tag_mut(&mut self) -> &mut Tag {
                match self {
                    $(Node::$name(node) => &mut node.tag),*
                }
            }

            /// The structural kind of this node, whether or not it is tagged yet.
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Node::$name(_) => NodeKind::$name),*
                }
            }

            pub fn as_node_ref(&self) -> NodeRef<'_> {
                match self {
                    $(Node::$name(node) => NodeRef::$name(node)),*
                }
            }
        }

        impl NodeRef<'_> {
            pub fn tag(&self) -> Tag {
                match self {
                    $(NodeRef::$name(node) => node.tag),*
                }
            }

            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeRef::$name(_) => NodeKind::$name),*
                }
            }
        }

        impl Walk for Node {
            fn walk<'a>(&'a self, visitor: &mut dyn FnMut(NodeRef<'a>)) {
                match self {
                    $(Node::$name(node) => node.walk(visitor)),*
                }
            }
        }

        $(
            impl From<$name> for Node {
                fn from(node: $name) -> Self {
                    Node::$name(node)
                }
            }

            impl TryFrom<Node> for $name {
                type Error = Node;

                fn try_from(node: Node) -> Result<Self, Node> {
                    match node {
                        Node::$name(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }

            impl Slot for $name {
                const NAME: &'static str = stringify!($name);
            }
        )*
    };
}

mod assembly;
mod declarations;
mod expressions;
mod statements;
mod types;

pub use assembly::*;
pub use declarations::*;
pub use expressions::*;
pub use statements::*;
pub use types::*;

// ============================================================================
// TAGS
// ============================================================================

/// The discriminant every node carries.
///
/// Builders create nodes untagged; the dispatcher assigns the tag right after
/// construction. Nodes synthesized inside another builder are created with
/// their tag already set. Either way a tag is set at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag(Option<NodeKind>);

impl Tag {
    pub const fn unset() -> Self {
        Tag(None)
    }

    pub const fn of(kind: NodeKind) -> Self {
        Tag(Some(kind))
    }

    pub fn kind(self) -> Option<NodeKind> {
        self.0
    }

    pub fn name(self) -> Option<&'static str> {
        self.0.map(NodeKind::name)
    }

    pub fn is_set(self) -> bool {
        self.0.is_some()
    }

    /// Sets the tag, or returns the kind already recorded.
    pub fn assign(&mut self, kind: NodeKind) -> Result<(), NodeKind> {
        match self.0 {
            Some(existing) => Err(existing),
            None => {
                self.0 = Some(kind);
                Ok(())
            }
        }
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(kind) => serializer.serialize_str(kind.name()),
            None => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// NODE UNION
// ============================================================================

nodes! {
    // top level and declarations
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    ContractDefinition,
    InheritanceSpecifier,
    StateVariableDeclaration,
    FileLevelConstant,
    CustomErrorDefinition,
    TypeDefinition,
    UsingForDeclaration,
    StructDefinition,
    ModifierDefinition,
    ModifierInvocation,
    FunctionDefinition,
    EventDefinition,
    EnumValue,
    EnumDefinition,
    VariableDeclaration,
    // types
    ElementaryTypeName,
    UserDefinedTypeName,
    ArrayTypeName,
    Mapping,
    FunctionTypeName,
    // statements
    Block,
    ExpressionStatement,
    IfStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    UncheckedStatement,
    ForStatement,
    InlineAssemblyStatement,
    DoWhileStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    ThrowStatement,
    EmitStatement,
    RevertStatement,
    VariableDeclarationStatement,
    // expressions
    Identifier,
    NumberLiteral,
    StringLiteral,
    HexLiteral,
    BooleanLiteral,
    UnaryOperation,
    BinaryOperation,
    Conditional,
    MemberAccess,
    IndexAccess,
    IndexRangeAccess,
    TupleExpression,
    FunctionCall,
    NameValueExpression,
    NameValueList,
    NewExpression,
    TypeNameExpression,
    // inline assembly
    AssemblyBlock,
    AssemblyLocalDefinition,
    AssemblyAssignment,
    AssemblyCall,
    AssemblyMember,
    AssemblyLiteral,
    AssemblyIf,
    AssemblyFor,
    AssemblySwitch,
    AssemblyCase,
    AssemblyFunctionDefinition,
    AssemblyFlowControl,
}

impl Node {
    /// The serialized tag, if the node has been tagged.
    pub fn node_type(&self) -> Option<&'static str> {
        self.tag().name()
    }

    pub(crate) fn assign_tag(&mut self, kind: NodeKind) -> Result<(), NodeKind> {
        self.tag_mut().assign(kind)
    }
}

/// A field position in the AST: a single node kind or a union of kinds.
pub trait Slot: TryFrom<Node, Error = Node> {
    const NAME: &'static str;
}

// ============================================================================
// SLOT UNIONS
// ============================================================================

node_union! {
    /// Anything that can appear at the top level of a source unit.
    SourceUnitPart {
        PragmaDirective,
        ImportDirective,
        ContractDefinition,
        EnumDefinition,
        StructDefinition,
        FunctionDefinition,
        FileLevelConstant,
        CustomErrorDefinition,
        TypeDefinition,
    }
}

node_union! {
    /// Anything that can appear in a contract body.
    ContractPart {
        StateVariableDeclaration,
        UsingForDeclaration,
        StructDefinition,
        ModifierDefinition,
        FunctionDefinition,
        EventDefinition,
        EnumDefinition,
        CustomErrorDefinition,
        TypeDefinition,
    }
}

node_union! {
    /// A type reference.
    TypeName {
        ElementaryTypeName,
        UserDefinedTypeName,
        ArrayTypeName,
        Mapping,
        FunctionTypeName,
    }
}

node_union! {
    Statement {
        Block,
        ExpressionStatement,
        IfStatement,
        TryStatement,
        WhileStatement,
        UncheckedStatement,
        ForStatement,
        InlineAssemblyStatement,
        DoWhileStatement,
        ContinueStatement,
        BreakStatement,
        ReturnStatement,
        ThrowStatement,
        EmitStatement,
        RevertStatement,
        VariableDeclarationStatement,
    }
}

node_union! {
    Expression {
        Identifier,
        NumberLiteral,
        StringLiteral,
        HexLiteral,
        BooleanLiteral,
        UnaryOperation,
        BinaryOperation,
        Conditional,
        MemberAccess,
        IndexAccess,
        IndexRangeAccess,
        TupleExpression,
        FunctionCall,
        NameValueExpression,
        NewExpression,
        TypeNameExpression,
    }
}

node_union! {
    /// One item of an inline assembly block.
    AssemblyItem {
        AssemblyBlock,
        AssemblyLocalDefinition,
        AssemblyAssignment,
        AssemblyCall,
        AssemblyMember,
        AssemblyLiteral,
        AssemblyIf,
        AssemblyFor,
        AssemblySwitch,
        AssemblyFunctionDefinition,
        AssemblyFlowControl,
    }
}

node_union! {
    AssemblyExpression {
        AssemblyCall,
        AssemblyMember,
        AssemblyLiteral,
    }
}

// ============================================================================
// TRAVERSAL
// ============================================================================

/// Pre-order traversal over the AST.
///
/// ```
/// use solast::ast::{NodeKind, Walk};
///
/// let output = solast::parse("contract C { function f() public { g(); } }").unwrap();
/// let mut calls = 0;
/// if let Some(root) = &output.result {
///     root.walk(&mut |node| {
///         if node.kind() == NodeKind::FunctionCall {
///             calls += 1;
///         }
///     });
/// }
/// assert_eq!(calls, 1);
/// ```
pub trait Walk {
    fn walk<'a>(&'a self, visitor: &mut dyn FnMut(NodeRef<'a>));
}

impl<T: Walk> Walk for Box<T> {
    fn walk<'a>(&'a self, visitor: &mut dyn FnMut(NodeRef<'a>)) {
        (**self).walk(visitor)
    }
}

impl<T: Walk> Walk for Option<T> {
    fn walk<'a>(&'a self, visitor: &mut dyn FnMut(NodeRef<'a>)) {
        if let Some(inner) = self {
            inner.walk(visitor)
        }
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn walk<'a>(&'a self, visitor: &mut dyn FnMut(NodeRef<'a>)) {
        for item in self {
            item.walk(visitor)
        }
    }
}

impl<A: Walk, B: Walk> Walk for (A, B) {
    fn walk<'a>(&'a self, visitor: &mut dyn FnMut(NodeRef<'a>)) {
        self.0.walk(visitor);
        self.1.walk(visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_assigned_once() {
        let mut tag = Tag::unset();
        assert_eq!(tag.assign(NodeKind::Identifier), Ok(()));
        assert_eq!(tag.assign(NodeKind::Block), Err(NodeKind::Identifier));
        assert_eq!(tag.name(), Some("Identifier"));
    }

    #[test]
    fn unset_tag_serializes_as_null() {
        let node = Identifier {
            tag: Tag::unset(),
            name: "x".into(),
        };
        let json = serde_json::to_string(&node).expect("serialize");
        assert_eq!(json, r#"{"type":null,"Name":"x"}"#);
    }

    #[test]
    fn slot_conversion_rejects_foreign_kinds() {
        let node = Node::from(BreakStatement {
            tag: Tag::of(NodeKind::BreakStatement),
        });
        let back = Expression::try_from(node).expect_err("break is not an expression");
        assert_eq!(back.kind(), NodeKind::BreakStatement);
        assert!(Statement::try_from(back).is_ok());
    }

    #[test]
    fn walk_visits_in_pre_order() {
        let call = FunctionCall {
            tag: Tag::of(NodeKind::FunctionCall),
            arguments: vec![Expression::Identifier(Identifier {
                tag: Tag::of(NodeKind::Identifier),
                name: "a".into(),
            })],
            names: vec![],
            identifiers: vec![],
            expression: Box::new(Expression::Identifier(Identifier {
                tag: Tag::of(NodeKind::Identifier),
                name: "f".into(),
            })),
        };
        let mut seen = Vec::new();
        Node::from(call).walk(&mut |node| seen.push(node.kind()));
        assert_eq!(
            seen,
            vec![NodeKind::FunctionCall, NodeKind::Identifier, NodeKind::Identifier]
        );
    }
}
