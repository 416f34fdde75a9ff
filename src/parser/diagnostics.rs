//! Front-end error types and their presentation
//!
//! Two kinds of failure exist: a [`LexicalError`] when the scanner cannot
//! classify a character or a quoted literal runs off the end, and a
//! [`SyntaxError`] when the parser's expectation is violated. Both abort the
//! parse; [`ParseError`] carries whichever one happened so `?` can propagate
//! lexer failures through parser code.
//!
//! [`render_diagnostic`] turns an error into the offending source line with a
//! caret under the reported column.

use super::ast::SourceLocation;
use super::lexer::LexicalError;
use std::fmt;

/// Parser expectation violated
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
    pub location: SourceLocation,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Any error that aborts a lex/parse session
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Lexical(LexicalError),
    Syntax(SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lexical(err) => err.location,
            ParseError::Syntax(err) => err.location,
        }
    }

    pub fn line(&self) -> usize {
        self.location().line
    }

    pub fn column(&self) -> usize {
        self.location().column
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Lexical(err) => &err.message,
            ParseError::Syntax(err) => &err.message,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lexical(err) => write!(f, "{}", err),
            ParseError::Syntax(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lexical(err) => Some(err),
            ParseError::Syntax(err) => Some(err),
        }
    }
}

impl From<LexicalError> for ParseError {
    fn from(err: LexicalError) -> Self {
        ParseError::Lexical(err)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

/// Source line, caret line and message for `err`, newline-separated.
///
/// Columns count characters, so tabs before the error column are copied into
/// the caret line to keep it aligned in a terminal.
pub fn render_diagnostic(source: &str, err: &ParseError) -> String {
    let location = err.location();
    let line = source
        .lines()
        .nth(location.line.saturating_sub(1))
        .unwrap_or("");

    let padding: String = line
        .chars()
        .chain(std::iter::repeat(' '))
        .take(location.column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();

    format!("{}\n{}^\n{}", line, padding, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_under_column() {
        let source = "int a;\nint x = ;\n";
        let err = ParseError::from(SyntaxError::new(
            "Expected expression but found ';'",
            SourceLocation::new(2, 9),
        ));

        let rendered = render_diagnostic(source, &err);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "int x = ;");
        assert_eq!(lines[1], "        ^");
        assert_eq!(
            lines[2],
            "Syntax error at line 2, column 9: Expected expression but found ';'"
        );
    }

    #[test]
    fn test_tabs_are_preserved() {
        let source = "\tx = $;";
        let err = ParseError::from(LexicalError {
            message: "Unexpected character: '$'".to_string(),
            location: SourceLocation::new(1, 6),
        });

        let rendered = render_diagnostic(source, &err);
        assert_eq!(rendered.lines().nth(1), Some("\t    ^"));
    }

    #[test]
    fn test_accessors() {
        let err = ParseError::from(SyntaxError::new("boom", SourceLocation::new(3, 4)));
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 4);
        assert_eq!(err.message(), "boom");
        assert!(matches!(err, ParseError::Syntax(_)));
    }
}
