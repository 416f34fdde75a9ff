// End-to-end tests for the lexer and parser public API

use minicpp::parser::ast::{AstNode, Program, SourceLocation};
use minicpp::parser::token::{Literal, Token, TokenKind};
use minicpp::parser::{self, Lexer, ParseError};

fn main_body(program: &Program) -> &[AstNode] {
    let main = program.main_function.as_ref().expect("no main function");
    match main.body.as_ref() {
        AstNode::Compound { children, .. } => children.as_slice(),
        other => panic!("main body is not a Compound: {:?}", other),
    }
}

fn is_num(node: &AstNode, expected: i64) -> bool {
    matches!(node, AstNode::Num { token } if token.value == Some(Literal::Integer(expected)))
}

fn is_bin_op(node: &AstNode, kind: TokenKind) -> Option<(&AstNode, &AstNode)> {
    match node {
        AstNode::BinOp { left, op, right } if op.kind == kind => Some((left.as_ref(), right.as_ref())),
        _ => None,
    }
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn test_keywords_and_identifiers() {
    let tokens = Lexer::new("int if while cout main endl _tmp1")
        .tokenize()
        .unwrap();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Integer,
            TokenKind::If,
            TokenKind::While,
            TokenKind::Cout,
            TokenKind::Id,
            TokenKind::Id,
            TokenKind::Id,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[4].ident(), Some("main"));
    assert_eq!(tokens[6].ident(), Some("_tmp1"));
}

#[test]
fn test_numeric_literals() {
    let tokens = Lexer::new("123 1.5 1.5E-3").tokenize().unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntegerConst);
    assert_eq!(tokens[0].value, Some(Literal::Integer(123)));
    assert_eq!(tokens[1].kind, TokenKind::FloatConst);
    assert_eq!(tokens[1].value, Some(Literal::Float(1.5)));
    assert_eq!(tokens[2].kind, TokenKind::FloatConst);
    assert_eq!(tokens[2].value, Some(Literal::Float(0.0015)));
}

#[test]
fn test_unterminated_string() {
    let err = Lexer::new("\"abc").tokenize().unwrap_err();
    assert_eq!(err.location, SourceLocation::new(1, 1));

    let err = parser::parse("int main() { cout << \"abc").unwrap_err();
    assert!(matches!(err, ParseError::Lexical(_)));
}

#[test]
fn test_comments_are_invisible() {
    let with_comment = Lexer::new("int // comment\nx").tokenize().unwrap();
    let plain = Lexer::new("int x").tokenize().unwrap();
    assert_eq!(kinds(&with_comment), kinds(&plain));
    assert_eq!(with_comment[1].ident(), plain[1].ident());
}

#[test]
fn test_arithmetic_declaration() {
    let program = parser::parse("int main() { int x = 1 + 2 * 3; }").unwrap();
    let body = main_body(&program);
    assert_eq!(body.len(), 2);

    match &body[0] {
        AstNode::VarDecl {
            var_node,
            type_node,
        } => {
            assert_eq!(var_node.variable_name(), Some("x"));
            assert_eq!(type_node.leaf_kind(), Some(TokenKind::Integer));
        }
        other => panic!("Expected VarDecl, got {:?}", other),
    }

    match &body[1] {
        AstNode::Assign { left, op, right } => {
            assert_eq!(left.variable_name(), Some("x"));
            assert_eq!(op.kind, TokenKind::Assign);

            let (one, product) = is_bin_op(right, TokenKind::Plus).expect("Expected BinOp(+)");
            assert!(is_num(one, 1));
            let (two, three) = is_bin_op(product, TokenKind::Asterisk).expect("Expected BinOp(*)");
            assert!(is_num(two, 2));
            assert!(is_num(three, 3));
        }
        other => panic!("Expected Assign, got {:?}", other),
    }
}

#[test]
fn test_if_else() {
    let source = "int main() { if (x == 1) { y = 2; } else { y = 3; } }";
    let program = parser::parse(source).unwrap();
    let body = main_body(&program);
    assert_eq!(body.len(), 1);

    match &body[0] {
        AstNode::ConditionStatement {
            condition,
            if_body,
            else_body,
            ..
        } => {
            let (x, one) = is_bin_op(condition, TokenKind::Equal).expect("Expected BinOp(==)");
            assert_eq!(x.variable_name(), Some("x"));
            assert!(is_num(one, 1));

            assert!(matches!(**if_body, AstNode::Compound { ref children, .. } if children.len() == 1));
            let else_body = else_body.as_ref().expect("else body missing");
            assert!(matches!(**else_body, AstNode::Compound { ref children, .. } if children.len() == 1));
        }
        other => panic!("Expected ConditionStatement, got {:?}", other),
    }
}

#[test]
fn test_missing_expression_points_at_semicolon() {
    let err = parser::parse("int main() {\n    int x = ;\n}").unwrap_err();
    match err {
        ParseError::Syntax(err) => {
            assert_eq!(err.location, SourceLocation::new(2, 13));
            assert_eq!(err.message, "Expected expression but found ';'");
        }
        other => panic!("Expected SyntaxError, got {:?}", other),
    }
}

#[test]
fn test_full_program() {
    let source = r#"
#include <iostream>
using namespace std;

const int LIMIT = 10;

int main() {
    int total = 0, i;
    for (i = 0; i < LIMIT; i++) {
        if (i % 2 == 0) continue;
        total += i;
    }
    do {
        total -= 1;
    } while (total > 20);
    switch (total) {
        case 1: cout << "one" << endl; break;
        default: cout << total << endl;
    }
    char c = total > 5 ? 'y' : 'n';
    return 0;
}

double after;
"#;

    let program = parser::parse(source).unwrap();
    assert_eq!(program.imports.include_nodes.len(), 1);
    assert_eq!(program.imports.using_nodes.len(), 1);
    assert_eq!(program.declarations_before.len(), 2);
    assert_eq!(program.declarations_after.len(), 1);

    let body = main_body(&program);
    let shape: Vec<&str> = body
        .iter()
        .map(|node| match node {
            AstNode::VarDecl { .. } => "decl",
            AstNode::Assign { .. } => "assign",
            AstNode::ForStatement { .. } => "for",
            AstNode::DoWhileStatement { .. } => "do",
            AstNode::SwitchStatement { .. } => "switch",
            AstNode::ReturnStatement { .. } => "return",
            _ => "other",
        })
        .collect();
    assert_eq!(
        shape,
        vec!["decl", "assign", "decl", "for", "do", "switch", "decl", "assign", "return"]
    );
}
