//! Concrete syntax tree.
//!
//! The CST keeps every token the grammar matched, so builders can classify a
//! node by its arity and by the literal text of its children. It is built once
//! and never mutated afterwards.

use std::fmt;

use super::Span;

macro_rules! productions {
    ($($name:ident),* $(,)?) => {
        /// Grammar productions that materialize as CST nodes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Production {
            $($name),*
        }

        impl Production {
            /// Every production, in declaration order.
            pub const ALL: &'static [Production] = &[$(Production::$name),*];

            /// The production's grammar name, which doubles as the AST tag.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Production::$name => stringify!($name)),*
                }
            }
        }
    };
}

productions! {
    SourceUnit,
    PragmaDirective,
    PragmaName,
    PragmaValue,
    ImportDirective,
    ImportDeclaration,
    ImportPath,
    ContractDefinition,
    InheritanceSpecifier,
    ContractPart,
    StateVariableDeclaration,
    FileLevelConstant,
    CustomErrorDefinition,
    TypeDefinition,
    UsingForDeclaration,
    StructDefinition,
    ModifierDefinition,
    ModifierInvocation,
    FunctionDefinition,
    FunctionDescriptor,
    ReturnParameters,
    ModifierList,
    EventDefinition,
    EnumValue,
    EnumDefinition,
    ParameterList,
    Parameter,
    EventParameterList,
    EventParameter,
    FunctionTypeParameterList,
    FunctionTypeParameter,
    VariableDeclaration,
    OverrideSpecifier,
    TypeName,
    UserDefinedTypeName,
    MappingKey,
    Mapping,
    FunctionTypeName,
    StorageLocation,
    StateMutability,
    ElementaryTypeName,
    Block,
    Statement,
    ExpressionStatement,
    IfStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    SimpleStatement,
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
    VariableDeclarationList,
    IdentifierList,
    Expression,
    PrimaryExpression,
    ExpressionList,
    NameValueList,
    NameValue,
    FunctionCallArguments,
    FunctionCall,
    TupleExpression,
    TypeNameExpression,
    NumberLiteral,
    HexLiteral,
    StringLiteral,
    Identifier,
    AssemblyBlock,
    AssemblyLocalDefinition,
    AssemblyAssignment,
    AssemblyIdentifierList,
    AssemblyMember,
    AssemblyCall,
    AssemblyLiteral,
    AssemblyIf,
    AssemblyFor,
    AssemblySwitch,
    AssemblyCase,
    AssemblyFunctionDefinition,
    AssemblyFunctionReturns,
    AssemblyFlowControl,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A leaf of the CST: punctuation, a keyword, an operator or a literal chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub text: &'src str,
    pub span: Span,
}

/// An interior CST node produced by one grammar production.
#[derive(Debug, Clone, PartialEq)]
pub struct CstNode<'src> {
    pub production: Production,
    pub text: &'src str,
    pub span: Span,
    pub children: Vec<Cst<'src>>,
}

/// Either a production node or a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Cst<'src> {
    Node(CstNode<'src>),
    Token(Token<'src>),
}

impl<'src> Cst<'src> {
    /// The exact source text spanned by this node or token.
    pub fn text(&self) -> &'src str {
        match self {
            Cst::Node(node) => node.text,
            Cst::Token(token) => token.text,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Cst::Node(node) => node.span,
            Cst::Token(token) => token.span,
        }
    }

    pub fn as_node(&self) -> Option<&CstNode<'src>> {
        match self {
            Cst::Node(node) => Some(node),
            Cst::Token(_) => None,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Cst::Token(_))
    }

    /// True when this is a node of the given production.
    pub fn is(&self, production: Production) -> bool {
        matches!(self, Cst::Node(node) if node.production == production)
    }
}

impl<'src> CstNode<'src> {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&Cst<'src>> {
        self.children.get(index)
    }

    /// Text of the child at `index`, or "" when there is no such child.
    pub fn text_at(&self, index: usize) -> &'src str {
        self.children.get(index).map(Cst::text).unwrap_or("")
    }

    /// Direct children that are production nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &CstNode<'src>> {
        self.children.iter().filter_map(Cst::as_node)
    }

    /// First direct child of the given production.
    pub fn find(&self, production: Production) -> Option<&CstNode<'src>> {
        self.nodes().find(|node| node.production == production)
    }

    /// All direct children of the given production, in source order.
    pub fn find_all(&self, production: Production) -> impl Iterator<Item = &CstNode<'src>> {
        self.nodes().filter(move |node| node.production == production)
    }

    /// True when a direct token child has exactly this text.
    pub fn has_token(&self, text: &str) -> bool {
        self.children
            .iter()
            .any(|child| matches!(child, Cst::Token(token) if token.text == text))
    }

    /// Maximum nesting depth of the subtree rooted here (a lone node is 1).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.nodes().map(|child| (child, depth + 1)));
        }
        deepest
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.production, indent = indent)?;
        for child in &self.children {
            match child {
                Cst::Node(node) => node.write_tree(f, indent + 2)?,
                Cst::Token(token) => writeln!(f, "{:indent$}{:?}", "", token.text, indent = indent + 2)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for CstNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> Cst<'_> {
        Cst::Token(Token {
            text,
            span: Span::default(),
        })
    }

    fn node<'a>(production: Production, text: &'a str, children: Vec<Cst<'a>>) -> CstNode<'a> {
        CstNode {
            production,
            text,
            span: Span::default(),
            children,
        }
    }

    #[test]
    fn production_names_are_unique() {
        let mut names: Vec<_> = Production::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Production::ALL.len());
    }

    #[test]
    fn child_queries() {
        let ident = node(Production::Identifier, "a", vec![]);
        let tree = node(
            Production::Expression,
            "(a)",
            vec![token("("), Cst::Node(ident), token(")")],
        );

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.text_at(0), "(");
        assert_eq!(tree.text_at(7), "");
        assert!(tree.has_token(")"));
        assert!(!tree.has_token("a"));
        assert_eq!(tree.find(Production::Identifier).map(|n| n.text), Some("a"));
        assert!(tree.child(1).is_some_and(|c| c.is(Production::Identifier)));
    }

    #[test]
    fn depth_counts_nodes_not_tokens() {
        let leaf = node(Production::Identifier, "x", vec![]);
        let primary = node(Production::PrimaryExpression, "x", vec![Cst::Node(leaf)]);
        let expr = node(Production::Expression, "x;", vec![Cst::Node(primary), token(";")]);
        assert_eq!(expr.depth(), 3);
    }
}
