//! Outline pane: the syntax tree or the token stream as a selectable list

use crate::parser::ast::SourceLocation;
use crate::parser::token::Token;
use crate::printer::{token_label, TreeLine};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// One selectable row and the source position it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub label: String,
    pub location: Option<SourceLocation>,
}

impl From<&TreeLine> for OutlineEntry {
    fn from(line: &TreeLine) -> Self {
        OutlineEntry {
            label: line.indented(),
            location: line.location,
        }
    }
}

impl From<&Token> for OutlineEntry {
    fn from(token: &Token) -> Self {
        OutlineEntry {
            label: token_label(token),
            location: Some(token.location),
        }
    }
}

/// Render the outline pane
pub fn render_outline_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    entries: &[OutlineEntry],
    is_focused: bool,
    state: &mut ListState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::styled(
                entry.label.clone(),
                Style::default().fg(DEFAULT_THEME.fg),
            )];
            if let Some(loc) = entry.location {
                spans.push(Span::styled(
                    format!("  {}:{}", loc.line, loc.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, state);
}
