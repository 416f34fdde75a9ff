//! Text views of a parse: the AST as an indented tree and the token stream
//! grouped by source line.
//!
//! Both views are produced as data first ([`TreeLine`], [`TokenLine`]) so the
//! explorer can render them as selectable lists; the `render`/`dump` helpers
//! flatten them to the text the CLI prints.

use std::fmt;

use crate::parser::ast::{AstNode, Program, SourceLocation};
use crate::parser::diagnostics::ParseError;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};

const INDENT: &str = " | ";

/// One row of the printed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLine {
    pub depth: usize,
    pub text: String,
    /// Start of the node's first token; `None` for slot labels and empty nodes.
    pub location: Option<SourceLocation>,
}

impl TreeLine {
    /// The row with its depth prefix but without the location suffix.
    pub fn indented(&self) -> String {
        format!("{}{}", INDENT.repeat(self.depth), self.text)
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indented())?;
        if let Some(loc) = self.location {
            write!(f, "  ({}:{})", loc.line, loc.column)?;
        }
        Ok(())
    }
}

/// Walks a [`Program`] and flattens it into [`TreeLine`]s.
#[derive(Debug, Default)]
pub struct TreePrinter {
    lines: Vec<TreeLine>,
    depth: usize,
}

impl TreePrinter {
    pub fn lines(program: &Program) -> Vec<TreeLine> {
        let mut printer = Self::default();
        printer.program(program);
        printer.lines
    }

    /// The whole tree as text, one newline-terminated row per line.
    pub fn render(program: &Program) -> String {
        Self::lines(program)
            .iter()
            .map(|line| format!("{}\n", line))
            .collect()
    }

    fn line(&mut self, text: impl Into<String>, location: Option<SourceLocation>) {
        self.lines.push(TreeLine {
            depth: self.depth,
            text: text.into(),
            location,
        });
    }

    fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    /// A label row with `node` one level below it.
    fn slot(&mut self, label: &str, node: &AstNode) {
        self.line(label, None);
        self.nested(|p| p.node(node));
    }

    fn program(&mut self, program: &Program) {
        self.line("Program", None);
        self.nested(|p| {
            for include in &program.imports.include_nodes {
                p.import("Include", include);
            }
            for using in &program.imports.using_nodes {
                p.import("Using", using);
            }
            for decl in &program.declarations_before {
                p.node(decl);
            }
            if let Some(main) = &program.main_function {
                p.line(format!("Main {}", main.name.text()), Some(main.name.location));
                p.nested(|p| p.node(&main.body));
            }
            for decl in &program.declarations_after {
                p.node(decl);
            }
        });
    }

    fn import(&mut self, label: &str, node: &AstNode) {
        let name = node.variable_name().unwrap_or_default();
        self.line(format!("{} {}", label, name), node.location());
    }

    fn node(&mut self, node: &AstNode) {
        let loc = node.location();
        match node {
            AstNode::Compound { children, .. } => {
                self.line("Compound", loc);
                self.nested(|p| children.iter().for_each(|child| p.node(child)));
            }
            AstNode::VarDecl {
                var_node,
                type_node,
            } => {
                self.line("VarDecl", loc);
                self.nested(|p| {
                    p.node(var_node);
                    p.node(type_node);
                });
            }
            AstNode::Assign { left, op, right } => {
                self.line(format!("Assign {}", op.text()), loc);
                self.nested(|p| {
                    p.node(left);
                    p.node(right);
                });
            }
            AstNode::Print { children, .. } => {
                self.line("Print", loc);
                self.nested(|p| children.iter().for_each(|child| p.node(child)));
            }
            AstNode::ConditionStatement {
                condition,
                if_body,
                else_body,
                ..
            } => {
                self.line("If", loc);
                self.nested(|p| {
                    p.slot("Condition", condition);
                    p.slot("Then", if_body);
                    if let Some(else_body) = else_body {
                        p.slot("Else", else_body);
                    }
                });
            }
            AstNode::WhileStatement {
                condition, body, ..
            } => {
                self.line("While", loc);
                self.nested(|p| {
                    p.slot("Condition", condition);
                    p.slot("Body", body);
                });
            }
            AstNode::DoWhileStatement {
                body, condition, ..
            } => {
                self.line("DoWhile", loc);
                self.nested(|p| {
                    p.slot("Body", body);
                    p.slot("Condition", condition);
                });
            }
            AstNode::ForStatement {
                init,
                condition,
                action,
                body,
                ..
            } => {
                self.line("For", loc);
                self.nested(|p| {
                    p.slot("Init", init);
                    p.slot("Condition", condition);
                    p.slot("Action", action);
                    p.slot("Body", body);
                });
            }
            AstNode::BreakStatement { .. } => self.line("Break", loc),
            AstNode::ContinueStatement { .. } => self.line("Continue", loc),
            AstNode::ReturnStatement { expr, .. } => {
                self.line("Return", loc);
                if let Some(expr) = expr {
                    self.nested(|p| p.node(expr));
                }
            }
            AstNode::SwitchStatement {
                condition,
                case_statements,
                default_statement,
                ..
            } => {
                self.line("Switch", loc);
                self.nested(|p| {
                    p.slot("Condition", condition);
                    for case in case_statements {
                        p.node(case);
                    }
                    if let Some(default) = default_statement {
                        p.slot("Default", default);
                    }
                });
            }
            AstNode::SwitchCompound { condition, body } => {
                self.line("Case", loc);
                self.nested(|p| {
                    p.node(condition);
                    p.node(body);
                });
            }
            AstNode::NoOp => self.line("NoOp", loc),
            AstNode::BinOp { left, op, right } => {
                self.line(format!("BinOp {}", op.text()), loc);
                self.nested(|p| {
                    p.node(left);
                    p.node(right);
                });
            }
            AstNode::UnaryOp { op, expr } => {
                let label = if node.is_cast() { "Cast" } else { "UnaryOp" };
                self.line(format!("{} {}", label, op.text()), loc);
                self.nested(|p| p.node(expr));
            }
            AstNode::PrefixOp { op, expr } => {
                self.line(format!("PrefixOp {}", op.text()), loc);
                self.nested(|p| p.node(expr));
            }
            AstNode::PostfixOp { op, expr } => {
                self.line(format!("PostfixOp {}", op.text()), loc);
                self.nested(|p| p.node(expr));
            }
            AstNode::TernaryOp {
                condition,
                first_expr,
                second_expr,
            } => {
                self.line("TernaryOp", loc);
                self.nested(|p| {
                    p.slot("Condition", condition);
                    p.slot("Then", first_expr);
                    p.slot("Else", second_expr);
                });
            }
            AstNode::Variable { token } => self.line(format!("Variable {}", token.text()), loc),
            AstNode::Num { token } => self.line(format!("Num {}", token.text()), loc),
            AstNode::String { token } => self.line(format!("String {}", token.text()), loc),
            AstNode::Bool { token } => self.line(format!("Bool {}", token.text()), loc),
            AstNode::Type { token, is_const } => {
                let prefix = if *is_const { "const " } else { "" };
                self.line(format!("Type {}{}", prefix, token.text()), loc);
            }
        }
    }
}

/// All tokens that start on one source line.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLine {
    pub line: usize,
    pub tokens: Vec<Token>,
}

impl fmt::Display for TokenLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.tokens.iter().map(token_label).collect();
        write!(f, "/{}:  {}", self.line, labels.join(", "))
    }
}

/// `KIND` for fixed-spelling tokens, `KIND(value)` for names and literals.
pub fn token_label(token: &Token) -> String {
    match token.kind {
        TokenKind::Id
        | TokenKind::IntegerConst
        | TokenKind::FloatConst
        | TokenKind::CharConst
        | TokenKind::StringConst => format!("{}({})", token.kind.name(), token.text()),
        kind => kind.name().to_string(),
    }
}

/// Lex `source` completely and group the tokens by the line they start on.
pub fn token_lines(source: &str) -> Result<Vec<TokenLine>, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut lines: Vec<TokenLine> = Vec::new();

    for token in tokens {
        match lines.last_mut() {
            Some(last) if last.line == token.location.line => last.tokens.push(token),
            _ => lines.push(TokenLine {
                line: token.location.line,
                tokens: vec![token],
            }),
        }
    }

    Ok(lines)
}

/// The token listing as text, one newline-terminated row per source line.
pub fn dump_tokens(source: &str) -> Result<String, ParseError> {
    Ok(token_lines(source)?
        .iter()
        .map(|line| format!("{}\n", line))
        .collect())
}
