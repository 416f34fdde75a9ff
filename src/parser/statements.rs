//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Compound statements: `{ ... }`, which may also hold declaration lists
//! - Control flow: `if`, `while`, `do-while`, `for`, `switch`
//! - Jump statements: `return`, `break`, `continue`
//! - Output: `cout << a << b;`
//! - Expression statements, including `x op= expr;` assignments
//!
//! # Grammar
//!
//! ```text
//! statement      ::= if_stmt | compound | while_stmt | do_while_stmt | for_stmt
//!                  | return_stmt | break_stmt | continue_stmt | switch_stmt
//!                  | print_stmt | expr_stmt
//! expr_stmt      ::= (assign | expr)? ";"
//! assign         ::= ID ("=" | "+=" | "-=" | "*=" | "/=" | "%=" | "^=") expr
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::diagnostics::ParseError;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse `{ (declaration_list | statement)* }`
    pub(crate) fn compound_statement(&mut self) -> Result<AstNode, ParseError> {
        let brace = self.eat(TokenKind::LBrace)?;
        let children = self.block_items(&[TokenKind::RBrace])?;
        self.eat(TokenKind::RBrace)?;
        Ok(AstNode::Compound {
            brace: Some(brace),
            children,
        })
    }

    /// Declarations and statements up to (not including) one of `terminators`.
    fn block_items(&mut self, terminators: &[TokenKind]) -> Result<Vec<AstNode>, ParseError> {
        let mut children = Vec::new();

        while !terminators.contains(&self.current.kind) && !self.check(TokenKind::Eof) {
            if self.at_declaration() {
                children.extend(self.declaration_list()?);
            } else {
                children.push(self.statement()?);
            }
        }

        Ok(children)
    }

    /// Parse a statement
    pub(crate) fn statement(&mut self) -> Result<AstNode, ParseError> {
        self.nested("Statement", Self::statement_kind)
    }

    fn statement_kind(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            TokenKind::If => self.if_statement(),
            TokenKind::LBrace => self.compound_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Do => self.do_while_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Break => {
                let token = self.eat(TokenKind::Break)?;
                self.eat(TokenKind::Semi)?;
                Ok(AstNode::BreakStatement { token })
            }
            TokenKind::Continue => {
                let token = self.eat(TokenKind::Continue)?;
                self.eat(TokenKind::Semi)?;
                Ok(AstNode::ContinueStatement { token })
            }
            TokenKind::Switch => self.switch_statement(),
            TokenKind::Cout => self.print_statement(),
            _ => self.expr_statement(),
        }
    }

    /// Parse `(assign | expr)? ;`; a bare `;` is a `NoOp`.
    pub(crate) fn expr_statement(&mut self) -> Result<AstNode, ParseError> {
        if self.check(TokenKind::Semi) {
            self.eat(TokenKind::Semi)?;
            return Ok(AstNode::NoOp);
        }

        let node = self.assign_or_expr()?;
        self.eat(TokenKind::Semi)?;
        Ok(node)
    }

    fn assign_or_expr(&mut self) -> Result<AstNode, ParseError> {
        if self.check_assign_statement() {
            self.assign_statement()
        } else {
            self.expr()
        }
    }

    /// Probe: is this `ID assign_op ...`?
    pub(crate) fn check_assign_statement(&mut self) -> bool {
        self.probe(|p| {
            p.eat(TokenKind::Id)?;
            Ok(p.current.kind.is_assign_op())
        })
    }

    /// Parse `ID assign_op expr` (the terminating `;` belongs to the caller)
    fn assign_statement(&mut self) -> Result<AstNode, ParseError> {
        let left = self.variable()?;
        if !self.current.kind.is_assign_op() {
            return Err(self.unexpected("assignment operator"));
        }
        let op = self.advance()?;
        let right = self.expr()?;
        Ok(AstNode::Assign {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Parse if statement
    fn if_statement(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::If)?;
        self.eat(TokenKind::LParen)?;
        let condition = self.expr()?;
        self.eat(TokenKind::RParen)?;

        let if_body = self.statement()?;

        let else_body = if self.check(TokenKind::Else) {
            self.eat(TokenKind::Else)?;
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(AstNode::ConditionStatement {
            token,
            condition: Box::new(condition),
            if_body: Box::new(if_body),
            else_body,
        })
    }

    /// Parse while statement
    fn while_statement(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::While)?;
        self.eat(TokenKind::LParen)?;
        let condition = self.expr()?;
        self.eat(TokenKind::RParen)?;
        let body = self.statement()?;

        Ok(AstNode::WhileStatement {
            token,
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    /// Parse do-while statement
    fn do_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::Do)?;
        let body = self.statement()?;
        self.eat(TokenKind::While)?;
        self.eat(TokenKind::LParen)?;
        let condition = self.expr()?;
        self.eat(TokenKind::RParen)?;
        self.eat(TokenKind::Semi)?;

        Ok(AstNode::DoWhileStatement {
            token,
            body: Box::new(body),
            condition: Box::new(condition),
        })
    }

    /// Parse `for (init; condition; action) body`; missing clauses are `NoOp`.
    fn for_statement(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::For)?;
        self.eat(TokenKind::LParen)?;

        let init = if self.at_declaration() {
            AstNode::Compound {
                brace: None,
                children: self.declaration_list()?,
            }
        } else {
            self.expr_statement()?
        };

        let condition = self.expr_statement()?;

        let action = if self.check(TokenKind::RParen) {
            AstNode::NoOp
        } else {
            self.assign_or_expr()?
        };
        self.eat(TokenKind::RParen)?;

        let body = self.statement()?;

        Ok(AstNode::ForStatement {
            token,
            init: Box::new(init),
            condition: Box::new(condition),
            action: Box::new(action),
            body: Box::new(body),
        })
    }

    /// Parse return statement
    fn return_statement(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::Return)?;
        let expr = if self.check(TokenKind::Semi) {
            None
        } else {
            Some(Box::new(self.expr()?))
        };
        self.eat(TokenKind::Semi)?;

        Ok(AstNode::ReturnStatement { token, expr })
    }

    /// Parse `switch (expr) { case* default? }`
    fn switch_statement(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::Switch)?;
        self.eat(TokenKind::LParen)?;
        let condition = self.expr()?;
        self.eat(TokenKind::RParen)?;
        self.eat(TokenKind::LBrace)?;

        let mut case_statements = Vec::new();
        while self.check(TokenKind::Case) {
            self.eat(TokenKind::Case)?;
            let label = if self.check(TokenKind::Id) {
                self.variable()?
            } else {
                self.constant()?
            };
            self.eat(TokenKind::Colon)?;
            let body = self.case_body()?;

            case_statements.push(AstNode::SwitchCompound {
                condition: Box::new(label),
                body: Box::new(body),
            });
        }

        let default_statement = if self.check(TokenKind::Default) {
            self.eat(TokenKind::Default)?;
            self.eat(TokenKind::Colon)?;
            Some(Box::new(self.case_body()?))
        } else {
            None
        };

        self.eat(TokenKind::RBrace)?;

        Ok(AstNode::SwitchStatement {
            token,
            condition: Box::new(condition),
            case_statements,
            default_statement,
        })
    }

    /// Statements following a `case`/`default` label, up to the next label.
    fn case_body(&mut self) -> Result<AstNode, ParseError> {
        let children =
            self.block_items(&[TokenKind::Case, TokenKind::Default, TokenKind::RBrace])?;
        Ok(AstNode::Compound {
            brace: None,
            children,
        })
    }

    /// Parse `cout << a << b;`
    ///
    /// Operands are parsed one level above the shift operators so that each
    /// `<<` separates two printed items.
    fn print_statement(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::Cout)?;

        let mut children = Vec::new();
        loop {
            self.eat(TokenKind::LeftOp)?;
            children.push(self.shift_operand()?);
            if !self.check(TokenKind::LeftOp) {
                break;
            }
        }
        self.eat(TokenKind::Semi)?;

        Ok(AstNode::Print { token, children })
    }
}
