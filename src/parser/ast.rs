// AST (Abstract Syntax Tree) definitions for minicpp

use super::token::{Token, TokenKind};

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// `#include <...>` and `using namespace ...;` lines, in source order per kind
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Imports {
    pub include_nodes: Vec<AstNode>,
    pub using_nodes: Vec<AstNode>,
}

/// `int main() { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct MainFunction {
    pub name: Token,
    /// Always an [`AstNode::Compound`]
    pub body: Box<AstNode>,
}

/// Root of the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub imports: Imports,
    pub declarations_before: Vec<AstNode>,
    pub main_function: Option<MainFunction>,
    pub declarations_after: Vec<AstNode>,
}

/// AST nodes for statements and expressions.
///
/// Consumers are expected to `match` on this enum without a wildcard arm, so
/// that adding a variant breaks every consumer at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Statements
    Compound {
        /// The opening `{`; `None` for case bodies and `for` declarations
        brace: Option<Token>,
        children: Vec<AstNode>,
    },
    VarDecl {
        /// Always an [`AstNode::Variable`]
        var_node: Box<AstNode>,
        /// Always an [`AstNode::Type`]
        type_node: Box<AstNode>,
    },
    Assign {
        left: Box<AstNode>,
        op: Token,
        right: Box<AstNode>,
    },
    Print {
        token: Token,
        children: Vec<AstNode>,
    },
    ConditionStatement {
        token: Token,
        condition: Box<AstNode>,
        if_body: Box<AstNode>,
        else_body: Option<Box<AstNode>>,
    },
    WhileStatement {
        token: Token,
        condition: Box<AstNode>,
        body: Box<AstNode>,
    },
    DoWhileStatement {
        token: Token,
        body: Box<AstNode>,
        condition: Box<AstNode>,
    },
    ForStatement {
        token: Token,
        init: Box<AstNode>,
        condition: Box<AstNode>,
        action: Box<AstNode>,
        body: Box<AstNode>,
    },
    BreakStatement {
        token: Token,
    },
    ContinueStatement {
        token: Token,
    },
    ReturnStatement {
        token: Token,
        expr: Option<Box<AstNode>>,
    },
    SwitchStatement {
        token: Token,
        condition: Box<AstNode>,
        /// [`AstNode::SwitchCompound`] per `case` label
        case_statements: Vec<AstNode>,
        /// Body of the `default:` label, an [`AstNode::Compound`]
        default_statement: Option<Box<AstNode>>,
    },
    SwitchCompound {
        /// The case label, a constant or a variable
        condition: Box<AstNode>,
        /// Always an [`AstNode::Compound`]
        body: Box<AstNode>,
    },
    NoOp,

    // Expressions
    BinOp {
        left: Box<AstNode>,
        op: Token,
        right: Box<AstNode>,
    },
    /// Unary `+ - ! ~ &`, or a cast when `op` is a type keyword
    UnaryOp {
        op: Token,
        expr: Box<AstNode>,
    },
    PrefixOp {
        op: Token,
        expr: Box<AstNode>,
    },
    PostfixOp {
        op: Token,
        expr: Box<AstNode>,
    },
    TernaryOp {
        condition: Box<AstNode>,
        first_expr: Box<AstNode>,
        second_expr: Box<AstNode>,
    },
    Variable {
        token: Token,
    },
    /// Integer, float and char constants
    Num {
        token: Token,
    },
    String {
        token: Token,
    },
    Bool {
        token: Token,
    },
    Type {
        token: Token,
        is_const: bool,
    },
}

impl AstNode {
    /// Name of a [`AstNode::Variable`], `None` for every other node.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            AstNode::Variable { token } => token.ident(),
            _ => None,
        }
    }

    /// `true` for a [`AstNode::UnaryOp`] whose operator is a type keyword.
    pub fn is_cast(&self) -> bool {
        matches!(self, AstNode::UnaryOp { op, .. } if op.kind.is_type_spec())
    }

    /// Start of the node's keyword, brace or first token; `None` for an empty subtree.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            AstNode::Compound { brace, children } => brace
                .as_ref()
                .map(|brace| brace.location)
                .or_else(|| children.iter().find_map(AstNode::location)),
            AstNode::VarDecl { type_node, .. } => type_node.location(),
            AstNode::Assign { left, .. } | AstNode::BinOp { left, .. } => left.location(),
            AstNode::SwitchCompound { condition, .. } | AstNode::TernaryOp { condition, .. } => {
                condition.location()
            }
            AstNode::Print { token, .. }
            | AstNode::ConditionStatement { token, .. }
            | AstNode::WhileStatement { token, .. }
            | AstNode::DoWhileStatement { token, .. }
            | AstNode::ForStatement { token, .. }
            | AstNode::SwitchStatement { token, .. }
            | AstNode::BreakStatement { token }
            | AstNode::ContinueStatement { token }
            | AstNode::ReturnStatement { token, .. }
            | AstNode::Variable { token }
            | AstNode::Num { token }
            | AstNode::String { token }
            | AstNode::Bool { token }
            | AstNode::Type { token, .. } => Some(token.location),
            AstNode::UnaryOp { op, .. } | AstNode::PrefixOp { op, .. } => Some(op.location),
            AstNode::PostfixOp { expr, .. } => expr.location(),
            AstNode::NoOp => None,
        }
    }

    /// Kind of the leaf token for literal and variable nodes.
    pub fn leaf_kind(&self) -> Option<TokenKind> {
        match self {
            AstNode::Variable { token }
            | AstNode::Num { token }
            | AstNode::String { token }
            | AstNode::Bool { token }
            | AstNode::Type { token, .. } => Some(token.kind),
            _ => None,
        }
    }
}
