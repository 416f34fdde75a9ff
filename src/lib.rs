//! # Introduction
//!
//! minicpp is the front end for a small C++-flavoured teaching language: a
//! pull-based lexer and a recursive-descent parser that turn one source file
//! into an abstract syntax tree.  The tree can be printed, or browsed next to
//! the source in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Program → (printer | explorer)
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the AST; errors carry the
//!    line and column they were detected at.
//! 2. [`printer`] — the AST as an indented tree and the token stream grouped
//!    by source line.
//! 3. [`ui`] — ratatui-based explorer; not part of the stable library API.
//!
//! ## Supported subset
//!
//! Imports: `#include <x>`, `using namespace x;`.
//! Types: `int`, `float`, `double`, `char`, `bool`, optionally `const`.
//! Control flow: `if/else`, `while`, `do-while`, `for`, `switch/case/default`,
//! `break`, `continue`, `return`.
//! Output: `cout << a << b;`.

pub mod parser;
pub mod printer;
pub mod ui;
