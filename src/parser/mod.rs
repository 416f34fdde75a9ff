//! minicpp source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token model, keyword and operator tables
//! - [`lexer`]: Tokenization (source text → tokens)
//! - `parse`: The [`Parser`] struct, lookahead and speculative probes
//! - [`ast`]: AST node definitions
//! - [`diagnostics`]: Lexical/syntax errors and caret rendering
//!
//! # Supported subset
//!
//! - Imports: `#include <iostream>`, `using namespace std;`
//! - Types: `int`, `float`, `double`, `char`, `bool`, optionally `const`
//! - One `int main()` with global declarations before and after it
//! - Statements: declarations, assignments (`=` and `+= -= *= /= %= ^=`),
//!   `if`/`else`, `while`, `do`-`while`, `for`, `switch`/`case`/`default`,
//!   `break`, `continue`, `return`, `cout << ...;`
//! - Expressions: arithmetic, logical, bitwise, relational, ternary,
//!   prefix/postfix `++`/`--` and casts in both `(int) x` and `int(x)` form
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
pub mod diagnostics;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;

pub use ast::{AstNode, Program, SourceLocation};
pub use diagnostics::{ParseError, SyntaxError};
pub use lexer::{LexicalError, Lexer};
pub use parse::Parser;
pub use token::{Literal, Token, TokenKind};

/// Lex and parse a whole translation unit.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse()
}
