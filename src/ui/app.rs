//! Explorer state and event loop

use crate::parser::ast::{Program, SourceLocation};
use crate::parser::token::Token;
use crate::printer::TreePrinter;
use crate::ui::panes::{self, OutlineEntry, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp/PageDown
const PAGE: isize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Outline,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Outline,
            FocusedPane::Outline => FocusedPane::Source,
        }
    }
}

/// What the outline pane lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineView {
    Tree,
    Tokens,
}

impl OutlineView {
    pub fn toggle(self) -> Self {
        match self {
            OutlineView::Tree => OutlineView::Tokens,
            OutlineView::Tokens => OutlineView::Tree,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OutlineView::Tree => "Syntax Tree",
            OutlineView::Tokens => "Tokens",
        }
    }

    fn badge(self) -> &'static str {
        match self {
            OutlineView::Tree => "TREE",
            OutlineView::Tokens => "TOKENS",
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being explored
    pub source_code: String,

    pub tree_entries: Vec<OutlineEntry>,
    pub token_entries: Vec<OutlineEntry>,

    pub view: OutlineView,
    pub focused_pane: FocusedPane,

    /// Selection per view, kept when switching between them
    pub tree_state: ListState,
    pub token_state: ListState,

    pub source_scroll: SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create the explorer for an already parsed source file
    pub fn new(source_code: String, program: &Program, tokens: &[Token]) -> Self {
        let tree_entries: Vec<OutlineEntry> = TreePrinter::lines(program)
            .iter()
            .map(OutlineEntry::from)
            .collect();
        let token_entries: Vec<OutlineEntry> = tokens.iter().map(OutlineEntry::from).collect();

        let initial = |entries: &[OutlineEntry]| {
            ListState::default().with_selected((!entries.is_empty()).then_some(0))
        };

        App {
            source_code,
            tree_state: initial(&tree_entries),
            token_state: initial(&token_entries),
            tree_entries,
            token_entries,
            view: OutlineView::Tree,
            focused_pane: FocusedPane::Outline,
            source_scroll: SourceScrollState {
                offset: 0,
                follow_selection: true,
            },
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn entries(&self) -> &[OutlineEntry] {
        match self.view {
            OutlineView::Tree => &self.tree_entries,
            OutlineView::Tokens => &self.token_entries,
        }
    }

    fn state(&self) -> &ListState {
        match self.view {
            OutlineView::Tree => &self.tree_state,
            OutlineView::Tokens => &self.token_state,
        }
    }

    /// Source position of the selected outline row
    pub fn selected_location(&self) -> Option<SourceLocation> {
        let index = self.state().selected()?;
        self.entries().get(index)?.location
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let selected = self.selected_location();
        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            selected,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let (entries, state) = match self.view {
            OutlineView::Tree => (&self.tree_entries, &mut self.tree_state),
            OutlineView::Tokens => (&self.token_entries, &mut self.token_state),
        };
        panes::render_outline_pane(
            frame,
            columns[1],
            self.view.title(),
            entries,
            self.focused_pane == FocusedPane::Outline,
            state,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.view.badge(),
            self.state().selected(),
            self.entries().len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Char('t') => {
                self.view = self.view.toggle();
                self.source_scroll.follow_selection = true;
                self.status_message = format!("Showing {}", self.view.title().to_lowercase());
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_or_scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_or_scroll(1),
            KeyCode::PageUp => self.move_or_scroll(-PAGE),
            KeyCode::PageDown => self.move_or_scroll(PAGE),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.entries().len().saturating_sub(1)),
            _ => {}
        }
    }

    fn move_or_scroll(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Outline => {
                let current = self.state().selected().unwrap_or(0);
                self.select(current.saturating_add_signed(delta));
            }
            FocusedPane::Source => {
                self.source_scroll.follow_selection = false;
                self.source_scroll.offset = self.source_scroll.offset.saturating_add_signed(delta);
            }
        }
    }

    /// Select row `index` (clamped) in the current view and follow it in the source
    fn select(&mut self, index: usize) {
        let len = self.entries().len();
        if len == 0 {
            return;
        }
        let index = index.min(len - 1);
        match self.view {
            OutlineView::Tree => self.tree_state.select(Some(index)),
            OutlineView::Tokens => self.token_state.select(Some(index)),
        }

        self.source_scroll.follow_selection = true;
        self.status_message = match self.selected_location() {
            Some(loc) => format!("Line {}, column {}", loc.line, loc.column),
            None => "No source position".to_string(),
        };
    }
}
