mod common;

use clojo::lexer::lex;
use clojo::parser::ast::Stmt;
use clojo::parser::{Parser, StartRule};
use common::expr;

fn bound_names(src: &str) -> Vec<String> {
    let tokens = lex(src).unwrap();
    let file = Parser::new(&tokens, src).parse_file(StartRule::SingleExpression).unwrap();
    match &file.body[0].node {
        Stmt::Let(bindings) => bindings.iter().flat_map(|b| b.pattern.node.bound_names()).collect(),
        other => panic!("expected a binding, got {other:?}"),
    }
}

#[test]
fn vectors_with_const() {
    assert_eq!(expr("{const([a,b]=ab) f(a,b)}"), "(let [[a b] ab] (f a b))");
    assert_eq!(expr("{const [a,b]=ab; f(a,b)}"), "(let [[a b] ab] (f a b))");
    assert_eq!(expr("{const([x, more...] = indexes) f(x, more)}"), "(let [[x & more] indexes] (f x more))");
    assert_eq!(expr("{const [x, more...] = indexes; f(x, more)}"), "(let [[x & more] indexes] (f x more))");
    assert_eq!(
        expr("{const([x, more..., AS, full] = indexes) f(x, more, full)}"),
        "(let [[x & more :as full] indexes] (f x more full))"
    );
    assert_eq!(
        expr("{const([[a,b],[c,d]] = numbers) f(a, b, c, d)}"),
        "(let [[[a b] [c d]] numbers] (f a b c d))"
    );
}

#[test]
fn vectors_with_short_var() {
    assert_eq!(expr("{[a,b]:=ab; f(a,b)}"), "(let [[a b] ab] (f a b))");
    assert_eq!(expr("{[x, more...] := indexes; f(x, more)}"), "(let [[x & more] indexes] (f x more))");
    assert_eq!(
        expr("{[x, more..., AS, full] := indexes; f(x, more, full)}"),
        "(let [[x & more :as full] indexes] (f x more full))"
    );
    assert_eq!(expr("{[[a,b],[c,d]] := numbers; f(a, b, c, d)}"), "(let [[[a b] [c d]] numbers] (f a b c d))");
}

#[test]
fn dicts_with_const() {
    assert_eq!(
        expr("{const({theX: X, theY: Y} = point) f(theX, theY)}"),
        "(let [{the-x :x, the-y :y} point] (f the-x the-y))"
    );
    assert_eq!(
        expr("{const {theX: X, theY: Y} = point; f(theX, theY)}"),
        "(let [{the-x :x, the-y :y} point] (f the-x the-y))"
    );
    assert_eq!(
        expr(r"{const({name: NAME, {[pages, \isbn10\]: KEYS}: DETAILS} = book) f(name,pages,\isbn10\)}"),
        "(let [{name :name, {[pages isbn10] :keys} :details} book] (f name pages isbn10))"
    );
    assert_eq!(
        expr("{const({name: NAME, [hole1, hole2]: SCORES} = golfer) f(name, hole1, hole2)}"),
        "(let [{name :name, [hole1 hole2] :scores} golfer] (f name hole1 hole2))"
    );
}

#[test]
fn dicts_with_short_var() {
    assert_eq!(
        expr("{{theX: X, theY: Y} := point; f(theX, theY)}"),
        "(let [{the-x :x, the-y :y} point] (f the-x the-y))"
    );
    assert_eq!(
        expr(r"{{name: NAME, {[pages, \isbn10\]: KEYS}: DETAILS} := book; f(name,pages,\isbn10\)}"),
        "(let [{name :name, {[pages isbn10] :keys} :details} book] (f name pages isbn10))"
    );
    assert_eq!(
        expr("{{name: NAME, [hole1, hole2]: SCORES} := golfer; f(name, hole1, hole2)}"),
        "(let [{name :name, [hole1 hole2] :scores} golfer] (f name hole1 hole2))"
    );
}

#[test]
fn function_parameters() {
    assert_eq!(
        expr("func printStatus({name: NAME, [hole1, hole2]: SCORES}) { f(name, hole1, hole2) }"),
        "(defn- print-status [{name :name, [hole1 hole2] :scores}] (f name hole1 hole2))"
    );
    assert_eq!(
        expr("func PrintStatus({name: NAME, [hole1, hole2]: SCORES}) { f(name, hole1, hole2) }"),
        "(defn Print-status [{name :name, [hole1 hole2] :scores}] (f name hole1 hole2))"
    );
    assert_eq!(
        expr(r#"printStatus( {NAME: "Jim", SCORES: [3, 5, 4, 5]} )"#),
        r#"(print-status {:name "Jim", :scores [3 5 4 5]})"#
    );
}

#[test]
fn patterns_report_what_they_bind() {
    assert_eq!(bound_names("[a, b] := ab"), vec!["a", "b"]);
    assert_eq!(bound_names("[x, more..., AS, full] := v"), vec!["x", "more", "full"]);
    assert_eq!(bound_names("{name: NAME, [h1, h2]: SCORES} := g"), vec!["name", "h1", "h2"]);
}

#[test]
fn mismatched_binding_counts() {
    let err = clojo::parse("x.go", "a, b := 1", StartRule::SingleExpression, &Default::default()).unwrap_err();
    assert_eq!(err.kind(), "syntax");
}
