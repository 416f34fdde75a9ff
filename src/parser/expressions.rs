//! Expression parsing implementation
//!
//! This module handles parsing of expressions with one method per precedence
//! level, each deferring to the next tighter level for its operands.
//!
//! # Precedence (lowest to highest)
//!
//! | Level          | Operators            | Associativity |
//! |----------------|----------------------|---------------|
//! | ternary        | `?:`                 | right         |
//! | logical or     | `\|\|`               | left          |
//! | logical and    | `&&`                 | left          |
//! | bitwise or     | `\|`                 | left          |
//! | bitwise xor    | `^`                  | left          |
//! | bitwise and    | `&`                  | left          |
//! | equality       | `==` `!=`            | left          |
//! | relational     | `<` `>` `<=` `>=`    | left          |
//! | shift          | `<<` `>>`            | left          |
//! | additive       | `+` `-`              | left          |
//! | multiplicative | `*` `/` `%`          | left          |
//! | cast           | `(type) e`, `type(e)`| right         |
//! | unary          | `++x` `--x` `+ - ! ~ &` | right      |
//! | postfix        | `x++` `x--`          |               |
//! | primary        | literals, names, `( e )` |           |
//!
//! Casts are recognised with two always-restoring probes before falling back
//! to unary parsing, so `(x)` and `(int) x` can share the same opening token.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::diagnostics::ParseError;
use crate::parser::parse::Parser;
use crate::parser::token::{Token, TokenKind};

type Level = fn(&mut Parser) -> Result<AstNode, ParseError>;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn expr(&mut self) -> Result<AstNode, ParseError> {
        self.nested("Expression", Self::ternary)
    }

    /// Parse ternary: condition ? first_expr : second_expr
    fn ternary(&mut self) -> Result<AstNode, ParseError> {
        let condition = self.logical_or()?;

        if !self.check(TokenKind::Question) {
            return Ok(condition);
        }
        self.eat(TokenKind::Question)?;
        let first_expr = self.expr()?;
        self.eat(TokenKind::Colon)?;
        let second_expr = self.nested("Expression", Self::ternary)?;

        Ok(AstNode::TernaryOp {
            condition: Box::new(condition),
            first_expr: Box::new(first_expr),
            second_expr: Box::new(second_expr),
        })
    }

    /// One left-associative binary level: `operand (op operand)*`
    fn binary_level(&mut self, ops: &[TokenKind], operand: Level) -> Result<AstNode, ParseError> {
        let mut left = operand(self)?;

        while ops.contains(&self.current.kind) {
            let op = self.advance()?;
            let right = operand(self)?;
            left = AstNode::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn logical_or(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::LogOr], Self::logical_and)
    }

    fn logical_and(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::LogAnd], Self::bitwise_or)
    }

    fn bitwise_or(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::BitOr], Self::bitwise_xor)
    }

    fn bitwise_xor(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::Xor], Self::bitwise_and)
    }

    fn bitwise_and(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::BitAnd], Self::equality)
    }

    fn equality(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::Equal, TokenKind::NotEqual], Self::relational)
    }

    fn relational(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(
            &[
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::LeOp,
                TokenKind::GeOp,
            ],
            Self::shift,
        )
    }

    fn shift(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::LeftOp, TokenKind::RightOp], Self::additive)
    }

    /// Operand of a shift, which is also one item of a `cout` chain.
    pub(crate) fn shift_operand(&mut self) -> Result<AstNode, ParseError> {
        self.additive()
    }

    fn additive(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(&[TokenKind::Plus, TokenKind::Minus], Self::multiplicative)
    }

    fn multiplicative(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(
            &[TokenKind::Asterisk, TokenKind::Divide, TokenKind::Mod],
            Self::cast_expr,
        )
    }

    /// Probe: `( type_spec )`
    pub(crate) fn check_cast_expression_pre(&mut self) -> bool {
        self.probe(|p| {
            p.eat(TokenKind::LParen)?;
            if !p.current.kind.is_type_spec() {
                return Ok(false);
            }
            p.advance()?;
            Ok(p.check(TokenKind::RParen))
        })
    }

    /// Probe: `type_spec (`
    pub(crate) fn check_cast_expression_post(&mut self) -> bool {
        self.probe(|p| {
            if !p.current.kind.is_type_spec() {
                return Ok(false);
            }
            p.advance()?;
            Ok(p.check(TokenKind::LParen))
        })
    }

    fn cast_expr(&mut self) -> Result<AstNode, ParseError> {
        self.nested("Expression", Self::cast)
    }

    /// Parse cast: `(int) x` or `int(x)`; both become a `UnaryOp` on the type token.
    fn cast(&mut self) -> Result<AstNode, ParseError> {
        if self.check_cast_expression_pre() {
            self.eat(TokenKind::LParen)?;
            let op = self.cast_type()?;
            self.eat(TokenKind::RParen)?;
            let expr = self.cast_expr()?;
            return Ok(AstNode::UnaryOp {
                op,
                expr: Box::new(expr),
            });
        }

        if self.check_cast_expression_post() {
            let op = self.cast_type()?;
            self.eat(TokenKind::LParen)?;
            let expr = self.expr()?;
            self.eat(TokenKind::RParen)?;
            return Ok(AstNode::UnaryOp {
                op,
                expr: Box::new(expr),
            });
        }

        self.unary()
    }

    fn cast_type(&mut self) -> Result<Token, ParseError> {
        if self.current.kind.is_type_spec() {
            self.advance()
        } else {
            Err(self.unexpected("type specifier"))
        }
    }

    /// Parse unary: prefix `++`/`--` bind to a postfix operand, the others to a cast operand
    fn unary(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            TokenKind::IncOp | TokenKind::DecOp => {
                let op = self.advance()?;
                let expr = self.postfix()?;
                Ok(AstNode::PrefixOp {
                    op,
                    expr: Box::new(expr),
                })
            }
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::LogNot
            | TokenKind::BitNot
            | TokenKind::BitAnd => {
                let op = self.advance()?;
                let expr = self.cast_expr()?;
                Ok(AstNode::UnaryOp {
                    op,
                    expr: Box::new(expr),
                })
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> Result<AstNode, ParseError> {
        let node = self.factor()?;

        if matches!(self.current.kind, TokenKind::IncOp | TokenKind::DecOp) {
            let op = self.advance()?;
            return Ok(AstNode::PostfixOp {
                op,
                expr: Box::new(node),
            });
        }

        Ok(node)
    }

    /// Parse primary (literals, variables, parenthesized expressions)
    fn factor(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            TokenKind::LParen => {
                self.eat(TokenKind::LParen)?;
                let expr = self.expr()?;
                self.eat(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Id => self.variable(),
            kind if is_constant(kind) => self.constant(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Numeric, char, string or boolean literal
    pub(crate) fn constant(&mut self) -> Result<AstNode, ParseError> {
        match self.current.kind {
            TokenKind::IntegerConst | TokenKind::FloatConst | TokenKind::CharConst => {
                let token = self.advance()?;
                Ok(AstNode::Num { token })
            }
            TokenKind::StringConst => {
                let token = self.advance()?;
                Ok(AstNode::String { token })
            }
            TokenKind::True | TokenKind::False => {
                let token = self.advance()?;
                Ok(AstNode::Bool { token })
            }
            _ => Err(self.unexpected("constant")),
        }
    }
}

fn is_constant(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::IntegerConst
            | TokenKind::FloatConst
            | TokenKind::CharConst
            | TokenKind::StringConst
            | TokenKind::True
            | TokenKind::False
    )
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::diagnostics::ParseError;
    use crate::parser::parse::Parser;
    use crate::parser::token::TokenKind;

    /// Compact prefix form of an expression, e.g. `(+ 1 (* 2 3))`.
    fn sexpr(node: &AstNode) -> String {
        match node {
            AstNode::BinOp { left, op, right } => {
                format!("({} {} {})", op.text(), sexpr(left), sexpr(right))
            }
            AstNode::UnaryOp { op, expr } if node.is_cast() => {
                format!("(cast {} {})", op.text(), sexpr(expr))
            }
            AstNode::UnaryOp { op, expr } => format!("({} {})", op.text(), sexpr(expr)),
            AstNode::PrefixOp { op, expr } => format!("(pre{} {})", op.text(), sexpr(expr)),
            AstNode::PostfixOp { op, expr } => format!("(post{} {})", op.text(), sexpr(expr)),
            AstNode::TernaryOp {
                condition,
                first_expr,
                second_expr,
            } => format!(
                "(? {} {} {})",
                sexpr(condition),
                sexpr(first_expr),
                sexpr(second_expr)
            ),
            AstNode::Variable { token }
            | AstNode::Num { token }
            | AstNode::String { token }
            | AstNode::Bool { token } => token.text(),
            other => panic!("not an expression: {:?}", other),
        }
    }

    fn parse_expr(source: &str) -> String {
        let mut parser = Parser::new(source).unwrap();
        let node = parser.expr().unwrap();
        assert_eq!(parser.current.kind, TokenKind::Eof, "leftover input in {:?}", source);
        sexpr(&node)
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(parse_expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(parse_expr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(parse_expr("a % b / c"), "(/ (% a b) c)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(parse_expr("a - b - c"), "(- (- a b) c)");
        assert_eq!(parse_expr("a << 1 >> 2"), "(>> (<< a 1) 2)");
    }

    #[test]
    fn test_ternary_is_right_associative() {
        assert_eq!(parse_expr("a ? b : c ? d : e"), "(? a b (? c d e))");
        assert_eq!(parse_expr("a || b ? 1 : 2"), "(? (|| a b) 1 2)");
    }

    #[test]
    fn test_logical_and_bitwise_ladder() {
        assert_eq!(parse_expr("a || b && c"), "(|| a (&& b c))");
        assert_eq!(parse_expr("a && b | c"), "(&& a (| b c))");
        assert_eq!(parse_expr("a | b ^ c"), "(| a (^ b c))");
        assert_eq!(parse_expr("a ^ b & c"), "(^ a (& b c))");
        assert_eq!(parse_expr("a & b == c"), "(& a (== b c))");
    }

    #[test]
    fn test_relational_binds_tighter_than_equality() {
        assert_eq!(parse_expr("a < b == c >= d"), "(== (< a b) (>= c d))");
        assert_eq!(parse_expr("i <= n << 1"), "(<= i (<< n 1))");
    }

    #[test]
    fn test_unary_prefix_postfix() {
        assert_eq!(parse_expr("-a * b"), "(* (- a) b)");
        assert_eq!(parse_expr("!~x"), "(! (~ x))");
        assert_eq!(parse_expr("&x"), "(& x)");
        assert_eq!(parse_expr("++i + j--"), "(+ (pre++ i) (post-- j))");
    }

    #[test]
    fn test_casts() {
        assert_eq!(parse_expr("(int) x"), "(cast int x)");
        assert_eq!(parse_expr("int(b)"), "(cast int b)");
        assert_eq!(parse_expr("double(a + 1) * 2"), "(* (cast double (+ a 1)) 2)");
        assert_eq!(parse_expr("(char)(float) 1"), "(cast char (cast float 1))");
        assert_eq!(parse_expr("(x) + 1"), "(+ x 1)");
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_expr("true"), "true");
        assert_eq!(parse_expr("'c'"), "99");
        assert_eq!(parse_expr("2.5"), "2.5");
        assert_eq!(parse_expr(r#""hi""#), r#""hi""#);
    }

    #[test]
    fn test_cast_probes_are_side_effect_free() {
        let mut parser = Parser::new("(int) x + 1").unwrap();
        for _ in 0..3 {
            assert!(parser.check_cast_expression_pre());
            assert!(!parser.check_cast_expression_post());
        }
        assert_eq!(sexpr(&parser.expr().unwrap()), "(+ (cast int x) 1)");
    }

    #[test]
    fn test_missing_operand() {
        let err = Parser::new("1 +").unwrap().expr().unwrap_err();
        assert_eq!(err.message(), "Expected expression but found end of file");

        let err = Parser::new("(1 + 2").unwrap().expr().unwrap_err();
        assert_eq!(err.message(), "Expected ')' but found end of file");
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let results = std::thread::Builder::new()
            .stack_size(16 * 1024 * 1024)
            .spawn(|| {
                [
                    format!("int x = {}1{};", "(".repeat(1000), ")".repeat(1000)),
                    format!("int x = {}0;", "a ? 1 : ".repeat(1000)),
                    format!("int x = {}1;", "!".repeat(1000)),
                    format!("int x = {}1;", "(int) ".repeat(1000)),
                    format!("int x = {}1{};", "(".repeat(50), ")".repeat(50)),
                ]
                .map(|source| crate::parser::parse(&source))
            })
            .unwrap()
            .join()
            .unwrap();

        let [parens, ternaries, nots, casts, shallow] = results;
        for result in [parens, ternaries, nots, casts] {
            match result {
                Err(ParseError::Syntax(err)) => {
                    assert_eq!(err.message, "Expression nested too deeply");
                    assert_eq!(err.location.line, 1);
                }
                other => panic!("Expected SyntaxError, got {:?}", other),
            }
        }
        assert!(shallow.is_ok());
    }

    #[test]
    fn test_incomplete_ternary() {
        let err = Parser::new("a ? b").unwrap().expr().unwrap_err();
        assert_eq!(err.message(), "Expected ':' but found end of file");
    }
}
