//! Token model shared by the lexer and the parser
//!
//! A [`Token`] is an immutable `{kind, value, location}` triple. The kind
//! decides which grammar rule applies; the value is the literal payload or
//! fixed spelling; the location only exists for diagnostics and printing.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// Closed set of lexical categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Using,
    Namespace,
    Include,
    Return,
    Cout,
    Integer,
    Float,
    Double,
    Char,
    Bool,
    Const,
    Void,
    True,
    False,
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,

    // Literals and names
    IntegerConst,
    FloatConst,
    CharConst,
    StringConst,
    Id,

    // Braces
    LBrace,
    RBrace,
    LParen,
    RParen,

    // Punctuation
    Hash,
    Semi,
    Colon,
    Comma,
    Dot,
    Question,

    // Arithmetic and bitwise
    Assign,
    Plus,
    Minus,
    Asterisk,
    Divide,
    Mod,
    Xor,
    BitOr,
    BitAnd,
    BitNot,
    IncOp,
    DecOp,
    LeftOp,
    RightOp,

    // Compound assignment
    PlusAssign,
    MinusAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    XorAssign,

    // Comparison and logic
    Less,
    Greater,
    LeOp,
    GeOp,
    Equal,
    NotEqual,
    LogAnd,
    LogOr,
    LogNot,

    Eof,
}

impl TokenKind {
    /// Upper-case category name used by the token dumper (`INTEGER_CONST`, `SEMI`, ...).
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Using => "USING",
            TokenKind::Namespace => "NAMESPACE",
            TokenKind::Include => "INCLUDE",
            TokenKind::Return => "RETURN",
            TokenKind::Cout => "COUT",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::Double => "DOUBLE",
            TokenKind::Char => "CHAR",
            TokenKind::Bool => "BOOL",
            TokenKind::Const => "CONST",
            TokenKind::Void => "VOID",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Switch => "SWITCH",
            TokenKind::Case => "CASE",
            TokenKind::Default => "DEFAULT",
            TokenKind::For => "FOR",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::IntegerConst => "INTEGER_CONST",
            TokenKind::FloatConst => "FLOAT_CONST",
            TokenKind::CharConst => "CHAR_CONST",
            TokenKind::StringConst => "STRING_CONST",
            TokenKind::Id => "ID",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Hash => "HASH",
            TokenKind::Semi => "SEMI",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Question => "QUESTION_MARK",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Mod => "MOD",
            TokenKind::Xor => "XOR_OP",
            TokenKind::BitOr => "OR_OP",
            TokenKind::BitAnd => "AND_OP",
            TokenKind::BitNot => "NOT_OP",
            TokenKind::IncOp => "INC_OP",
            TokenKind::DecOp => "DEC_OP",
            TokenKind::LeftOp => "LEFT_OP",
            TokenKind::RightOp => "RIGHT_OP",
            TokenKind::PlusAssign => "PLUS_ASSIGN",
            TokenKind::MinusAssign => "MINUS_ASSIGN",
            TokenKind::MulAssign => "MUL_ASSIGN",
            TokenKind::DivAssign => "DIVIDE_ASSIGN",
            TokenKind::ModAssign => "MOD_ASSIGN",
            TokenKind::XorAssign => "XOR_ASSIGN",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::LeOp => "LE_OP",
            TokenKind::GeOp => "GE_OP",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::LogAnd => "LOG_AND",
            TokenKind::LogOr => "LOG_OR",
            TokenKind::LogNot => "LOG_NOT",
            TokenKind::Eof => "EOF",
        }
    }

    /// Built-in type keywords accepted by `type_spec`.
    pub fn is_type_spec(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Double
                | TokenKind::Char
                | TokenKind::Bool
        )
    }

    /// Operators accepted between the target and the value of an assignment.
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::MulAssign
                | TokenKind::DivAssign
                | TokenKind::ModAssign
                | TokenKind::XorAssign
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntegerConst => write!(f, "integer constant"),
            TokenKind::FloatConst => write!(f, "float constant"),
            TokenKind::CharConst => write!(f, "char constant"),
            TokenKind::StringConst => write!(f, "string constant"),
            TokenKind::Id => write!(f, "identifier"),
            TokenKind::Eof => write!(f, "end of file"),
            other => match spelling(*other) {
                Some(text) => write!(f, "'{}'", text),
                None => write!(f, "{}", other.name()),
            },
        }
    }
}

/// Payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    /// Ordinal value of a character constant
    Char(u32),
    Str(String),
    Ident(String),
    /// Canonical spelling of a keyword, operator or punctuation mark
    Symbol(&'static str),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::Char(c) => write!(f, "{}", c),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Ident(s) => write!(f, "{}", s),
            Literal::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// A single lexical item.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<Literal>,
    /// Where the first character of the token sits in the source.
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<Literal>, location: SourceLocation) -> Self {
        Self {
            kind,
            value,
            location,
        }
    }

    /// Token whose value is the fixed spelling of its kind.
    pub fn symbol(kind: TokenKind, location: SourceLocation) -> Self {
        Self::new(kind, spelling(kind).map(Literal::Symbol), location)
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, None, location)
    }

    /// Name of an identifier token, `None` for every other kind.
    pub fn ident(&self) -> Option<&str> {
        match &self.value {
            Some(Literal::Ident(name)) => Some(name),
            _ => None,
        }
    }

    /// Source-like text of the token, used when printing operators and types.
    pub fn text(&self) -> String {
        match &self.value {
            Some(value) => value.to_string(),
            None => self.kind.name().to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Id, Some(value)) => write!(f, "identifier '{}'", value),
            (TokenKind::IntegerConst | TokenKind::FloatConst, Some(value)) => {
                write!(f, "{} {}", self.kind, value)
            }
            (TokenKind::CharConst, Some(Literal::Char(c))) => match char::from_u32(*c) {
                Some(ch) if !ch.is_control() => write!(f, "char constant '{}'", ch),
                _ => write!(f, "char constant '\\x{:02x}'", c),
            },
            (TokenKind::StringConst, Some(value)) => write!(f, "string constant {}", value),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Reserved words, built once on first use.
static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    for (text, kind) in [
        ("using", TokenKind::Using),
        ("namespace", TokenKind::Namespace),
        ("include", TokenKind::Include),
        ("return", TokenKind::Return),
        ("cout", TokenKind::Cout),
        ("int", TokenKind::Integer),
        ("float", TokenKind::Float),
        ("double", TokenKind::Double),
        ("char", TokenKind::Char),
        ("bool", TokenKind::Bool),
        ("const", TokenKind::Const),
        ("void", TokenKind::Void),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("switch", TokenKind::Switch),
        ("case", TokenKind::Case),
        ("default", TokenKind::Default),
        ("for", TokenKind::For),
        ("while", TokenKind::While),
        ("do", TokenKind::Do),
        ("break", TokenKind::Break),
        ("continue", TokenKind::Continue),
    ] {
        map.insert(text, kind);
    }
    map
});

/// Look up a reserved word.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

/// Fixed-text operators and punctuation, two-character forms first so the
/// lexer can take the first prefix match as the longest one.
pub const SYMBOLS: &[(&str, TokenKind)] = &[
    ("++", TokenKind::IncOp),
    ("--", TokenKind::DecOp),
    ("+=", TokenKind::PlusAssign),
    ("-=", TokenKind::MinusAssign),
    ("*=", TokenKind::MulAssign),
    ("/=", TokenKind::DivAssign),
    ("%=", TokenKind::ModAssign),
    ("^=", TokenKind::XorAssign),
    ("<<", TokenKind::LeftOp),
    (">>", TokenKind::RightOp),
    ("<=", TokenKind::LeOp),
    (">=", TokenKind::GeOp),
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    ("&&", TokenKind::LogAnd),
    ("||", TokenKind::LogOr),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Asterisk),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Mod),
    ("^", TokenKind::Xor),
    ("|", TokenKind::BitOr),
    ("&", TokenKind::BitAnd),
    ("~", TokenKind::BitNot),
    ("!", TokenKind::LogNot),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("=", TokenKind::Assign),
    ("?", TokenKind::Question),
    (":", TokenKind::Colon),
    (";", TokenKind::Semi),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("#", TokenKind::Hash),
];

/// Fixed spelling of a keyword, operator or punctuation kind.
pub fn spelling(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Using => Some("using"),
        TokenKind::Namespace => Some("namespace"),
        TokenKind::Include => Some("include"),
        TokenKind::Return => Some("return"),
        TokenKind::Cout => Some("cout"),
        TokenKind::Integer => Some("int"),
        TokenKind::Float => Some("float"),
        TokenKind::Double => Some("double"),
        TokenKind::Char => Some("char"),
        TokenKind::Bool => Some("bool"),
        TokenKind::Const => Some("const"),
        TokenKind::Void => Some("void"),
        TokenKind::True => Some("true"),
        TokenKind::False => Some("false"),
        TokenKind::If => Some("if"),
        TokenKind::Else => Some("else"),
        TokenKind::Switch => Some("switch"),
        TokenKind::Case => Some("case"),
        TokenKind::Default => Some("default"),
        TokenKind::For => Some("for"),
        TokenKind::While => Some("while"),
        TokenKind::Do => Some("do"),
        TokenKind::Break => Some("break"),
        TokenKind::Continue => Some("continue"),
        TokenKind::IntegerConst
        | TokenKind::FloatConst
        | TokenKind::CharConst
        | TokenKind::StringConst
        | TokenKind::Id
        | TokenKind::Eof => None,
        other => SYMBOLS
            .iter()
            .find(|(_, kind)| *kind == other)
            .map(|(text, _)| *text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword("int"), Some(TokenKind::Integer));
        assert_eq!(keyword("cout"), Some(TokenKind::Cout));
        assert_eq!(keyword("default"), Some(TokenKind::Default));
        assert_eq!(keyword("main"), None);
        assert_eq!(keyword("endl"), None);
    }

    #[test]
    fn test_two_char_symbols_precede_prefixes() {
        for (i, (text, _)) in SYMBOLS.iter().enumerate() {
            if text.len() == 1 {
                assert!(
                    SYMBOLS[i..].iter().all(|(t, _)| t.len() == 1),
                    "'{}' appears before a two-character operator",
                    text
                );
            }
        }
    }

    #[test]
    fn test_spelling_round_trips_through_tables() {
        for (text, kind) in SYMBOLS {
            assert_eq!(spelling(*kind), Some(*text));
        }
        assert_eq!(spelling(TokenKind::While), Some("while"));
        assert_eq!(spelling(TokenKind::Id), None);
    }

    #[test]
    fn test_display() {
        let loc = SourceLocation::new(1, 1);
        assert_eq!(Token::symbol(TokenKind::Semi, loc).to_string(), "';'");
        assert_eq!(
            Token::new(TokenKind::Id, Some(Literal::Ident("x".into())), loc).to_string(),
            "identifier 'x'"
        );
        assert_eq!(Token::eof(loc).to_string(), "end of file");
    }
}
