//! Terminal explorer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — explorer state, keyboard event loop, pane focus, tree/token view
//! - **[`panes`]** — stateless render functions for each visible pane (source,
//!   outline, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it from a parsed
//! [`Program`] and call [`App::run`] to start the event loop.
//!
//! [`Program`]: crate::parser::ast::Program
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
