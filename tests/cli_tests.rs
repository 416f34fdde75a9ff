//! Integration tests for the `minicpp` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn parse_reports_summary() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg(fixture("sum.cpp")).assert();
    assert
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Parsed successfully"))
        .stderr(predicate::str::contains("main function present"));
}

#[test]
fn tree_output() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg("--tree").arg(fixture("sum.cpp")).assert();
    assert
        .success()
        .stdout(predicate::str::starts_with("Program\n | Include iostream  (1:11)\n"))
        .stdout(predicate::str::contains(" |  |  | Print  (6:5)\n"))
        .stdout(predicate::str::contains(" |  |  |  | String \"sum: \"  (6:13)\n"))
        .stdout(predicate::str::contains(" |  |  |  | BinOp +  (6:24)\n"))
        .stdout(predicate::str::contains(" |  |  |  | Variable endl  (6:33)\n"))
        .stdout(predicate::str::ends_with(" |  |  | Return  (7:5)\n |  |  |  | Num 0  (7:12)\n"));
}

#[test]
fn tokens_output() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg("--tokens").arg(fixture("sum.cpp")).assert();
    assert
        .success()
        .stdout(predicate::str::starts_with(
            "/1:  HASH, INCLUDE, LESS, ID(iostream), GREATER\n",
        ))
        .stdout(predicate::str::contains(
            "/6:  COUT, LEFT_OP, STRING_CONST(\"sum: \"), LEFT_OP, ID(a), PLUS, ID(b), LEFT_OP, ID(endl), SEMI\n",
        ));
}

#[test]
fn syntax_error_renders_caret() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg("--tree").arg(fixture("missing_expr.cpp")).assert();
    assert
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("    int x = ;"))
        .stderr(predicate::str::contains("            ^"))
        .stderr(predicate::str::contains(
            "Syntax error at line 2, column 13: Expected expression but found ';'",
        ));
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg(fixture("deep_nesting.cpp")).assert();
    assert.failure().code(1).stderr(predicate::str::contains(
        "Syntax error at line 2, column 113: Expression nested too deeply",
    ));
}

#[test]
fn lexical_error_renders_caret() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg(fixture("bad_char.cpp")).assert();
    assert.failure().code(1).stderr(predicate::str::contains(
        "Lexical error at line 2, column 15: Unexpected character: '$'",
    ));
}

#[test]
fn tokens_stop_at_lexical_error() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg("--tokens").arg(fixture("bad_char.cpp")).assert();
    assert
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Unexpected character"));
}

#[test]
fn missing_file() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    let assert = cmd.arg(fixture("does_not_exist.cpp")).assert();
    assert
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn missing_argument() {
    let mut cmd = Command::cargo_bin("minicpp").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}
