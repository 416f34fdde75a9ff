//! Declaration parsing implementation
//!
//! This module handles the program layout and everything that introduces a
//! name:
//!
//! - Imports: `#include <iostream>`, `using namespace std;`
//! - The `int main() { ... }` entry point
//! - Declaration lists: `const int a = 1, b;`
//!
//! # Grammar
//!
//! ```text
//! program          ::= (import | declaration_list)* main_function? declaration_list*
//! import           ::= "using" "namespace" ID ";" | "#" "include" "<" ID ("." ID)* ">"
//! main_function    ::= "int" "main" "(" ")" compound
//! declaration_list ::= "const"? type_spec declaration ("," declaration)* ";"
//! declaration      ::= ID ("=" expr)?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::diagnostics::ParseError;
use crate::parser::parse::Parser;
use crate::parser::token::{Literal, Token, TokenKind};

impl Parser {
    /// Parse imports, global declarations and the optional `main`.
    pub(crate) fn program(&mut self) -> Result<Program, ParseError> {
        let mut imports = Imports::default();
        let mut declarations_before = Vec::new();

        loop {
            let kind = self.current.kind;
            match kind {
                TokenKind::Using => imports.using_nodes.push(self.using_import()?),
                TokenKind::Hash => imports.include_nodes.push(self.include_import()?),
                _ if self.at_declaration() && !self.is_main() => {
                    declarations_before.extend(self.declaration_list()?);
                }
                _ => break,
            }
        }

        let main_function = if self.is_main() {
            Some(self.main_function()?)
        } else {
            None
        };

        let mut declarations_after = Vec::new();
        while self.at_declaration() {
            declarations_after.extend(self.declaration_list()?);
        }

        Ok(Program {
            imports,
            declarations_before,
            main_function,
            declarations_after,
        })
    }

    /// Probe: does `int main (` start here?
    pub(crate) fn is_main(&mut self) -> bool {
        self.probe(|p| {
            p.eat(TokenKind::Integer)?;
            if p.current.ident() != Some("main") {
                return Ok(false);
            }
            p.eat(TokenKind::Id)?;
            Ok(p.check(TokenKind::LParen))
        })
    }

    /// `using namespace std;`
    fn using_import(&mut self) -> Result<AstNode, ParseError> {
        self.eat(TokenKind::Using)?;
        self.eat(TokenKind::Namespace)?;
        let name = self.variable()?;
        self.eat(TokenKind::Semi)?;
        Ok(name)
    }

    /// `#include <iostream>`; dotted header names such as `stdio.h` are joined
    /// into one identifier.
    fn include_import(&mut self) -> Result<AstNode, ParseError> {
        self.eat(TokenKind::Hash)?;
        self.eat(TokenKind::Include)?;
        self.eat(TokenKind::Less)?;

        let first = self.eat(TokenKind::Id)?;
        let mut header = first.ident().unwrap_or_default().to_string();
        while self.check(TokenKind::Dot) {
            self.eat(TokenKind::Dot)?;
            let part = self.eat(TokenKind::Id)?;
            header.push('.');
            header.push_str(part.ident().unwrap_or_default());
        }

        self.eat(TokenKind::Greater)?;
        Ok(AstNode::Variable {
            token: Token::new(TokenKind::Id, Some(Literal::Ident(header)), first.location),
        })
    }

    /// `int main() { ... }`
    fn main_function(&mut self) -> Result<MainFunction, ParseError> {
        self.eat(TokenKind::Integer)?;
        let name = self.eat(TokenKind::Id)?;
        self.eat(TokenKind::LParen)?;
        self.eat(TokenKind::RParen)?;
        let body = self.compound_statement()?;
        Ok(MainFunction {
            name,
            body: Box::new(body),
        })
    }

    /// Whether the lookahead can open a declaration list.
    pub(crate) fn at_declaration(&self) -> bool {
        self.check(TokenKind::Const) || self.current.kind.is_type_spec()
    }

    /// Parse `type a = 1, b;` into `VarDecl`/`Assign` nodes in source order.
    pub(crate) fn declaration_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let type_node = self.type_spec()?;
        let mut nodes = Vec::new();

        loop {
            self.declaration(&type_node, &mut nodes)?;
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.eat(TokenKind::Comma)?;
        }

        self.eat(TokenKind::Semi)?;
        Ok(nodes)
    }

    /// One declarator; an initializer becomes an `Assign` after the `VarDecl`.
    fn declaration(
        &mut self,
        type_node: &AstNode,
        nodes: &mut Vec<AstNode>,
    ) -> Result<(), ParseError> {
        let var_node = self.variable()?;
        nodes.push(AstNode::VarDecl {
            var_node: Box::new(var_node.clone()),
            type_node: Box::new(type_node.clone()),
        });

        if self.check(TokenKind::Assign) {
            let op = self.eat(TokenKind::Assign)?;
            let right = self.expr()?;
            nodes.push(AstNode::Assign {
                left: Box::new(var_node),
                op,
                right: Box::new(right),
            });
        }

        Ok(())
    }

    /// Parse type: `const`? (`int` | `float` | `double` | `char` | `bool`)
    pub(crate) fn type_spec(&mut self) -> Result<AstNode, ParseError> {
        let is_const = if self.check(TokenKind::Const) {
            self.eat(TokenKind::Const)?;
            true
        } else {
            false
        };

        if !self.current.kind.is_type_spec() {
            return Err(self.unexpected("type specifier"));
        }
        let token = self.advance()?;
        Ok(AstNode::Type { token, is_const })
    }

    pub(crate) fn variable(&mut self) -> Result<AstNode, ParseError> {
        let token = self.eat(TokenKind::Id)?;
        Ok(AstNode::Variable { token })
    }
}
