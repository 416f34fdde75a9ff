//! Lexer (tokenizer) for minicpp source code
//!
//! Converts raw source text into [`Token`]s on demand. The parser pulls one
//! token at a time through [`Lexer::next_token`]; whitespace and both comment
//! styles are skipped and never reach it.
//!
//! All mutable scanning state lives in a [`Cursor`], which is `Copy`. The
//! parser snapshots it before a speculative parse and writes it back
//! afterwards, so the source itself is never duplicated.

use super::ast::SourceLocation;
use super::token::{self, Literal, Token, TokenKind};
use std::fmt;

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexicalError {
    fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexical error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexicalError {}

/// Scanning position. `current_char` is `None` exactly when `position` is past
/// the end of input, and `line`/`column` always describe `current_char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    line: usize,
    column: usize,
    current_char: Option<char>,
}

impl Cursor {
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Lexer for minicpp source code
pub struct Lexer {
    input: Vec<char>,
    cursor: Cursor,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Self {
            input,
            cursor: Cursor {
                position: 0,
                line: 1,
                column: 1,
                current_char,
            },
        }
    }

    /// Current scanning position; see [`Lexer::restore`].
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Rewind (or fast-forward) to a position previously taken from [`Lexer::cursor`].
    pub fn restore(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn line(&self) -> usize {
        self.cursor.line
    }

    pub fn column(&self) -> usize {
        self.cursor.column
    }

    /// Drain the lexer into a vector ending with the `EOF` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Produce the next token. Once the input is exhausted every call returns `EOF`.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.cursor.location();
        let Some(ch) = self.cursor.current_char else {
            return Ok(Token::eof(loc));
        };

        if ch.is_alphabetic() || ch == '_' {
            return Ok(self.identifier_or_keyword(loc));
        }
        if ch.is_ascii_digit() {
            return self.number_literal(loc);
        }

        match ch {
            '"' => self.string_literal(loc),
            '\'' => self.char_literal(loc),
            _ => self.symbol(loc),
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        while let Some(ch) = self.cursor.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match token::keyword(&ident) {
            Some(kind) => Token::symbol(kind, loc),
            None => Token::new(TokenKind::Id, Some(Literal::Ident(ident)), loc),
        }
    }

    /// Parse numeric literal: `123`, `1.5`, `1.5E-3`, `2.0f`, `45E12`
    fn number_literal(&mut self, loc: SourceLocation) -> Result<Token, LexicalError> {
        let mut text = String::new();
        self.take_digits(&mut text);

        let mut is_float = false;
        if self.cursor.current_char == Some('.') {
            is_float = true;
            text.push('.');
            self.advance();
            self.take_digits(&mut text);
        }

        if matches!(self.cursor.current_char, Some('e' | 'E')) {
            is_float = true;
            text.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.cursor.current_char {
                text.push(sign);
                self.advance();
            }
            if !self.take_digits(&mut text) {
                return Err(LexicalError::new(
                    format!("Exponent has no digits in numeric literal '{}'", text),
                    loc,
                ));
            }
        }

        if is_float {
            if matches!(self.cursor.current_char, Some('f' | 'F')) {
                self.advance();
            }
            let value = text.parse::<f64>().map_err(|_| {
                LexicalError::new(format!("Invalid float literal: {}", text), loc)
            })?;
            return Ok(Token::new(
                TokenKind::FloatConst,
                Some(Literal::Float(value)),
                loc,
            ));
        }

        let value = text.parse::<i64>().map_err(|_| {
            LexicalError::new(format!("Invalid integer literal: {}", text), loc)
        })?;
        Ok(Token::new(
            TokenKind::IntegerConst,
            Some(Literal::Integer(value)),
            loc,
        ))
    }

    /// Append a run of ASCII digits to `text`; returns whether any were taken.
    fn take_digits(&mut self, text: &mut String) -> bool {
        let start = text.len();
        while let Some(ch) = self.cursor.current_char {
            if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text.len() > start
    }

    /// Parse string literal
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexicalError> {
        self.advance(); // opening quote
        let mut string = String::new();

        while let Some(ch) = self.cursor.current_char {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(Token::new(
                        TokenKind::StringConst,
                        Some(Literal::Str(string)),
                        loc,
                    ));
                }
                '\n' => break,
                '\\' => string.push(self.escape_sequence()?),
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexicalError::new("Unterminated string literal", loc))
    }

    /// Parse character literal: exactly one character or escape between quotes
    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, LexicalError> {
        self.advance(); // opening quote

        let value = match self.cursor.current_char {
            None | Some('\n') => {
                return Err(LexicalError::new("Unterminated character literal", loc));
            }
            Some('\'') => {
                return Err(LexicalError::new("Empty character literal", loc));
            }
            Some('\\') => self.escape_sequence()?,
            Some(ch) => {
                self.advance();
                ch
            }
        };

        if self.cursor.current_char != Some('\'') {
            return Err(LexicalError::new(
                "Expected closing quote in character literal",
                self.cursor.location(),
            ));
        }
        self.advance();

        Ok(Token::new(
            TokenKind::CharConst,
            Some(Literal::Char(value as u32)),
            loc,
        ))
    }

    /// Decode a backslash escape; the cursor sits on the backslash.
    fn escape_sequence(&mut self) -> Result<char, LexicalError> {
        let loc = self.cursor.location();
        self.advance();
        let escaped = self.cursor.current_char.ok_or_else(|| {
            LexicalError::new("Unexpected end of file in escape sequence", loc)
        })?;

        let unescaped = match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            '\\' | '\'' | '"' | '?' => escaped,
            _ => {
                return Err(LexicalError::new(
                    format!("Unknown escape sequence: \\{}", escaped),
                    loc,
                ));
            }
        };
        self.advance();
        Ok(unescaped)
    }

    /// Match the longest fixed-text operator or punctuation mark.
    fn symbol(&mut self, loc: SourceLocation) -> Result<Token, LexicalError> {
        let rest = &self.input[self.cursor.position..];
        let matched = token::SYMBOLS.iter().find(|(text, _)| {
            text.chars().count() <= rest.len() && text.chars().zip(rest).all(|(a, &b)| a == b)
        });

        match matched {
            Some(&(text, kind)) => {
                for _ in text.chars() {
                    self.advance();
                }
                Ok(Token::symbol(kind, loc))
            }
            None => Err(LexicalError::new(
                format!(
                    "Unexpected character: '{}'",
                    self.cursor.current_char.unwrap_or_default()
                ),
                loc,
            )),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexicalError> {
        loop {
            match self.cursor.current_char {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek() == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek() == Some('*') => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.cursor.current_char {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexicalError> {
        let start_loc = self.cursor.location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while self.cursor.current_char.is_some() {
            if self.cursor.current_char == Some('*') && self.peek() == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexicalError::new("Unterminated block comment", start_loc))
    }

    /// Character after the current one
    fn peek(&self) -> Option<char> {
        self.input.get(self.cursor.position + 1).copied()
    }

    /// Step past `current_char`, keeping line and column in sync.
    fn advance(&mut self) {
        let Some(ch) = self.cursor.current_char else {
            return;
        };

        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }
        self.cursor.position += 1;
        self.cursor.current_char = self.input.get(self.cursor.position).copied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(source: &str) -> Token {
        Lexer::new(source).next_token().unwrap()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("int main() { return 0; }"),
            vec![
                TokenKind::Integer,
                TokenKind::Id,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::IntegerConst,
                TokenKind::Semi,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        for (text, kind) in [
            ("int", TokenKind::Integer),
            ("if", TokenKind::If),
            ("cout", TokenKind::Cout),
            ("namespace", TokenKind::Namespace),
            ("true", TokenKind::True),
        ] {
            let token = single(text);
            assert_eq!(token.kind, kind);
            assert_eq!(token.value, Some(Literal::Symbol(text)));
        }

        for name in ["main", "_tmp", "x1", "integer", "endl"] {
            let token = single(name);
            assert_eq!(token.kind, TokenKind::Id);
            assert_eq!(token.ident(), Some(name));
        }
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(single("123").value, Some(Literal::Integer(123)));
        assert_eq!(single("1.5").value, Some(Literal::Float(1.5)));
        assert_eq!(single("1.5E-3").value, Some(Literal::Float(0.0015)));
        assert_eq!(single("2.5f").value, Some(Literal::Float(2.5)));
        assert_eq!(single("45E12").value, Some(Literal::Float(45e12)));
        assert_eq!(single("1.5E-3").kind, TokenKind::FloatConst);
        assert_eq!(single("7").kind, TokenKind::IntegerConst);
    }

    #[test]
    fn test_bad_exponent() {
        let err = Lexer::new("1.0E+").next_token().unwrap_err();
        assert!(err.message.contains("Exponent"));
    }

    #[test]
    fn test_integer_overflow() {
        let err = Lexer::new("99999999999999999999").next_token().unwrap_err();
        assert!(err.message.contains("Invalid integer literal"));
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            kinds("++ -- += -= == != && || << >> <= >= ^= %= < > ="),
            vec![
                TokenKind::IncOp,
                TokenKind::DecOp,
                TokenKind::PlusAssign,
                TokenKind::MinusAssign,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::LogAnd,
                TokenKind::LogOr,
                TokenKind::LeftOp,
                TokenKind::RightOp,
                TokenKind::LeOp,
                TokenKind::GeOp,
                TokenKind::XorAssign,
                TokenKind::ModAssign,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Assign,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("a<=b"),
            vec![TokenKind::Id, TokenKind::LeOp, TokenKind::Id, TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments_are_invisible() {
        let strip = |source: &str| -> Vec<(TokenKind, Option<Literal>)> {
            Lexer::new(source)
                .tokenize()
                .unwrap()
                .into_iter()
                .map(|t| (t.kind, t.value))
                .collect()
        };

        assert_eq!(strip("int // comment\nx"), strip("int x"));
        assert_eq!(strip("int /* block\ncomment */ x"), strip("int x"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("int /* never closed").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_string_literal() {
        let token = single(r#""hello\nworld""#);
        assert_eq!(token.kind, TokenKind::StringConst);
        assert_eq!(token.value, Some(Literal::Str("hello\nworld".to_string())));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"abc").next_token().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_char_literal() {
        let token = single("'a'");
        assert_eq!(token.kind, TokenKind::CharConst);
        assert_eq!(token.value, Some(Literal::Char(97)));
        assert_eq!(single(r"'\''").value, Some(Literal::Char(39)));
        assert_eq!(single(r"'\n'").value, Some(Literal::Char(10)));
    }

    #[test]
    fn test_bad_char_literals() {
        assert!(Lexer::new("''").next_token().is_err());
        assert!(Lexer::new("'ab'").next_token().is_err());
        assert!(Lexer::new("'a").next_token().is_err());
    }

    #[test]
    fn test_unknown_character() {
        let err = Lexer::new("int $x").tokenize().unwrap_err();
        assert_eq!(err.message, "Unexpected character: '$'");
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Id);
        for _ in 0..3 {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.value, None);
        }
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("int x;\n  x = 2;").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 7));
    }

    #[test]
    fn test_cursor_restore_replays_tokens() {
        let mut lexer = Lexer::new("a + b");
        lexer.next_token().unwrap();
        let saved = lexer.cursor();
        let first = lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.restore(saved);
        assert_eq!(lexer.next_token().unwrap(), first);
    }
}
