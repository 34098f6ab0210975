//! Snapshot tests for error message formatting.
//!
//! Run `cargo insta review` to review changes.

use clojo::{CompileOptions, StartRule};
use insta::assert_snapshot;

fn file_error(path: &str, source: &str) -> String {
    let options = CompileOptions { pretty: false, ..Default::default() };
    clojo::parse(path, source, StartRule::for_path(path), &options).unwrap_err().to_string()
}

fn expr_error(source: &str) -> String {
    clojo::parse("expr.go", source, StartRule::SingleExpression, &CompileOptions::default())
        .unwrap_err()
        .to_string()
}

#[test]
fn unexpected_character() {
    assert_snapshot!(expr_error("a @ b"), @"Lex error: unexpected character '@'");
}

#[test]
fn bad_string_escape_points_at_the_escape() {
    assert_snapshot!(expr_error(r#"f("bad \q escape")"#), @"Lex error: unexpected character 'q'");
}

#[test]
fn bad_char_escape_names_the_escape() {
    assert_snapshot!(expr_error(r"f('\q')"), @"Lex error: unexpected character 'q'");
}

#[test]
fn juxtaposed_expressions() {
    assert_snapshot!(expr_error("x := 1 2"), @"Syntax error: expected newline or ';', found '2'");
}

#[test]
fn unclosed_block() {
    assert_snapshot!(expr_error("if a {b"), @"Syntax error: expected '}', found end of file");
}

#[test]
fn unclosed_call() {
    assert_snapshot!(expr_error("f(a, b"), @"Syntax error: expected ')', found end of file");
}

#[test]
fn type_declaration_without_body_kind() {
    assert_snapshot!(expr_error("type Foo bar"), @"Syntax error: expected 'interface' or 'struct', found 'bar'");
}

#[test]
fn binding_count_mismatch() {
    assert_snapshot!(expr_error("a, b := 1"), @"Syntax error: expected 2 values, found 1 values");
}

#[test]
fn counted_loop_must_start_at_zero() {
    assert_snapshot!(
        expr_error("for i := 1; i < n; i++ {f(i)}"),
        @"Syntax error: expected counted loop 'for i := 0; i < n; i++', found a start value other than 0"
    );
}

#[test]
fn counted_loop_must_increment_the_counter() {
    assert_snapshot!(
        expr_error("for i := 0; i < n; j++ {f(i)}"),
        @"Syntax error: expected counted loop 'for i := 0; i < n; i++', found 'j++'"
    );
}

#[test]
fn select_mixing_channel_families() {
    assert_snapshot!(
        file_error("foo.go", "package foo\nselect {\ncase c <- 0:\ncase c <: 1:\n}"),
        @"Syntax error: expected '<-' like the other cases of this select, found '<:'"
    );
}

#[test]
fn package_name_disagrees_with_file() {
    assert_snapshot!(
        file_error("foo.go", "package bar\nx"),
        @"Syntax error: expected package foo to match the file name, found package bar"
    );
}

#[test]
fn undeclared_package() {
    assert_snapshot!(
        file_error("foo.go", "package foo\nimport(\n\"aaa\"\n\"bbb\"\n)\nhuh.bar"),
        @r#"package "huh" in huh.bar does not appear in imports [aaa, bbb]"#
    );
}

#[test]
fn unused_packages() {
    assert_snapshot!(
        file_error("foo.go", "package foo\nimport(\n\"aaa\"\n\"bbb\"\n)\naaa.xxx"),
        @"Packages imported but never used: [bbb]"
    );
}

#[test]
fn unused_types() {
    assert_snapshot!(
        file_error("foo.go", "package foo\nimport type(\na.Aaa\nb.Bbb\n)\nAaa::xxx"),
        @"Types imported but never used: [Bbb]"
    );
}
