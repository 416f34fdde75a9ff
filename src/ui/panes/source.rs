//! Source code pane rendering with syntax highlighting
//!
//! # Features
//!
//! - Syntax highlighting driven by the lexer's keyword table
//! - The line of the selected tree/token row is highlighted and the character
//!   at its column is drawn reversed
//! - Scrolling follows the selection until the user scrolls by hand
//! - Line numbering
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character scan per line rather than the
//! full lexer, so block comments spanning lines are not coloured.

use crate::parser::ast::SourceLocation;
use crate::parser::token::{self, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for one source line
fn highlight_source_code(line: &str) -> Line<'static> {
    if line.trim_start().starts_with('#') {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(DEFAULT_THEME.directive),
        ));
    }

    let mut spans = Vec::new();
    let mut current_word = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            flush_word(&mut spans, &mut current_word);
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' && !(c == '.' && !current_word.is_empty()) {
            flush_word(&mut spans, &mut current_word);
            let style = match c {
                '{' | '}' | '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String) {
    if !word.is_empty() {
        let style = word_style(word);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn word_style(word: &str) -> Style {
    match token::keyword(word) {
        Some(kind) if kind.is_type_spec() || matches!(kind, TokenKind::Const | TokenKind::Void) => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        Some(TokenKind::True | TokenKind::False) => Style::default().fg(DEFAULT_THEME.number),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        None if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        None => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// The selected line with the character under `column` reversed.
fn selected_line(line: &str, column: usize) -> Line<'static> {
    let base = Style::default()
        .fg(DEFAULT_THEME.fg)
        .bg(DEFAULT_THEME.current_line_bg);
    let idx = column.saturating_sub(1);

    let before: String = line.chars().take(idx).collect();
    let at: String = line
        .chars()
        .nth(idx)
        .map(String::from)
        .unwrap_or_else(|| " ".to_string());
    let after: String = line.chars().skip(idx + 1).collect();

    Line::from(vec![
        Span::styled(before, base),
        Span::styled(
            at,
            base.fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ),
        Span::styled(after, base),
    ])
}

/// Scroll state for the source pane
#[derive(Debug, Clone, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Keep the selected line visible; cleared by manual scrolling.
    pub follow_selection: bool,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    selected: Option<SourceLocation>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if let Some(loc) = selected.filter(|_| scroll_state.follow_selection) {
        let line_idx = loc.line.saturating_sub(1);
        if line_idx < scroll_state.offset {
            scroll_state.offset = line_idx;
        } else if line_idx >= scroll_state.offset + visible_height {
            scroll_state.offset = line_idx + 1 - visible_height;
        }
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let selected_here = selected.filter(|loc| loc.line == line_num);
            let num_style = if selected_here.is_some() {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let content = match selected_here {
                Some(loc) => selected_line(line, loc.column),
                None => highlight_source_code(line),
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlighting_keeps_text() {
        let source = "    if (x <= 1.5) cout << \"a\\\"b\" << 'c'; // done";
        assert_eq!(text(&highlight_source_code(source)), source);
    }

    #[test]
    fn test_word_styles() {
        assert_eq!(word_style("int").fg, Some(DEFAULT_THEME.type_name));
        assert_eq!(word_style("while").fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(word_style("42").fg, Some(DEFAULT_THEME.number));
        assert_eq!(word_style("endl").fg, Some(DEFAULT_THEME.fg));
    }

    #[test]
    fn test_selected_column_is_split_out() {
        let line = selected_line("int x;", 5);
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["int ", "x", ";"]);

        let past_end = selected_line("x", 3);
        assert_eq!(past_end.spans[1].content.as_ref(), " ");
    }
}
