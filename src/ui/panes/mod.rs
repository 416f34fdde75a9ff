//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with syntax highlighting and the selected position
//! - [`outline`]: The syntax tree or the token stream as a selectable list
//! - [`status`]: Status bar with keybindings and the selection counter
//!
//! Each pane module exports a primary `render_*` function plus whatever state
//! type it needs to keep between frames.

pub mod outline;
pub mod source;
pub mod status;

pub use outline::{render_outline_pane, OutlineEntry};
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
