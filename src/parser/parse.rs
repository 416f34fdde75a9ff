//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! the one-token lookahead, the `eat` primitive, checkpoints for speculative
//! parsing, and the [`Parser::parse`] entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: program layout, imports, `main`, declaration lists
//! - `statements`: statement forms (if, while, for, switch, cout, ...)
//! - `expressions`: the precedence ladder and cast disambiguation
//!
//! # Speculative parsing
//!
//! A few grammar decisions need more than one token of lookahead. They are
//! answered by probes: the parser takes a [`Checkpoint`], runs ordinary
//! `eat` calls, looks at where it ended up, and restores the checkpoint no
//! matter what. A checkpoint is the lexer's `Copy` cursor plus the lookahead
//! token, which is all the state `eat` can change.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::diagnostics::{ParseError, SyntaxError};
use crate::parser::lexer::{Cursor, Lexer};
use crate::parser::token::{Token, TokenKind};

/// Deepest nesting of statements and expressions the parser will follow.
pub(crate) const MAX_DEPTH: usize = 200;

/// Everything a probe can disturb.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    cursor: Cursor,
    current: Token,
}

/// Recursive descent parser for the minicpp subset
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) current: Token,
    depth: usize,
}

impl Parser {
    /// Create a parser and pull the first lookahead token.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parse the whole token stream into a [`Program`].
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let program = self.program()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected(&TokenKind::Eof.to_string()));
        }
        Ok(program)
    }

    // ===== Helper methods =====

    /// Consume the lookahead if it has the expected kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.current.kind == kind {
            let next = self.lexer.next_token()?;
            Ok(std::mem::replace(&mut self.current, next))
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// Consume the lookahead whatever its kind.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        self.eat(self.current.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    /// "Expected X but found Y" at the lookahead token.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        SyntaxError::new(
            format!("Expected {} but found {}", expected, self.current),
            self.current_location(),
        )
        .into()
    }

    /// Run `parse` one nesting level deeper.
    ///
    /// Past [`MAX_DEPTH`] this fails at the lookahead instead of recursing.
    pub(crate) fn nested<T>(
        &mut self,
        what: &str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::new(
                format!("{} nested too deeply", what),
                self.current_location(),
            )
            .into());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.lexer.cursor(),
            current: self.current.clone(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.lexer.restore(checkpoint.cursor);
        self.current = checkpoint.current;
    }

    /// Run `hypothesis` and roll back every token it consumed.
    ///
    /// An error inside the hypothesis, lexical or syntactic, means "no".
    pub(crate) fn probe<F>(&mut self, hypothesis: F) -> bool
    where
        F: FnOnce(&mut Self) -> Result<bool, ParseError>,
    {
        let checkpoint = self.checkpoint();
        let outcome = hypothesis(self).unwrap_or(false);
        self.restore(checkpoint);
        outcome
    }
}
