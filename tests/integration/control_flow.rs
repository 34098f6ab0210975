mod common;

use common::{compile_fails, compile_ok, expr};

#[test]
fn if_without_else() {
    assert_eq!(expr("if a {b}"), "(when a b)");
    assert_eq!(expr("if a {b;c}"), "(when a (do b c))");
    assert_eq!(expr("if a {b\nc}"), "(when a (do b c))");
}

#[test]
fn if_with_else() {
    assert_eq!(expr("if a {b}else{c}"), "(if a b c)");
    assert_eq!(expr("if a {  b  }else{ c  }"), "(if a b c)");
    assert_eq!(expr("if a {b;c} else {d;e}"), "(if a (do b c) (do d e))");
}

#[test]
fn else_if_chains() {
    assert_eq!(expr("if a {b} else if c {d} else {e}"), "(if a b (if c d e))");
    assert_eq!(expr("if a {b} else if c {d}"), "(if a b (when c d))");
}

#[test]
fn if_with_initializer() {
    assert_eq!(expr("if a := b; f(a) {c}"), "(let [a b] (when (f a) c))");
}

#[test]
fn if_with_initializer_and_imports() {
    let out = compile_ok(
        "foo.go",
        "package foo\nimport (\n  \"file\"\n  \"log\"\n)\nif err := file.Chmod(0664); err != nil {\n    log.Print(err)\n    err\n}",
    );
    assert!(
        out.ends_with("(let [err (file/Chmod 436)] (when (not= err nil) (do (log/Print err) err)))"),
        "{out}"
    );
}

#[test]
fn record_name_in_condition() {
    assert_eq!(expr("if Done {b}"), "(when Done b)");
}

#[test]
fn range_loops() {
    assert_eq!(expr("for x:=range xs{f(x)}"), "(doseq [x xs] (f x))");
    assert_eq!(expr("for x := range xs {f(x)}"), "(doseq [x xs] (f x))");
    assert_eq!(expr("for [k, v] := range m {f(k, v)}"), "(doseq [[k v] m] (f k v))");
}

#[test]
fn lazy_loops() {
    assert_eq!(expr("for x:= lazy xs{f(x)}"), "(for [x xs] (f x))");
    assert_eq!(expr("for x:= lazy xs if a{f(x)}"), "(for [x xs :when a] (f x))");
    assert_eq!(expr("for [a,b]:= lazy xs{f(a,b)}"), "(for [[a b] xs] (f a b))");
    assert_eq!(expr("for x:=lazy xs if x<0 {f(x)}"), "(for [x xs :when (< x 0)] (f x))");
}

#[test]
fn counted_loops() {
    assert_eq!(expr("for i:= times n {f(i)}"), "(dotimes [i n] (f i))");
    assert_eq!(expr("for i := 0; i<n; i++ {f(i)}"), "(dotimes [i n] (f i))");
    assert_eq!(expr("for i := 0; i < 10; i++ {f(i)}"), "(dotimes [i 10] (f i))");
}

#[test]
fn unsupported_counted_loop_shapes() {
    for src in [
        "for i := 1; i < n; i++ {f(i)}",
        "for i := 0; i > n; i++ {f(i)}",
        "for i := 0; j < n; i++ {f(i)}",
        "for i := 0; i < n; j++ {f(i)}",
        "for i := 0; i < f(n); i++ {f(i)}",
    ] {
        let err = clojo::parse("x.go", src, clojo::StartRule::SingleExpression, &Default::default()).unwrap_err();
        assert_eq!(err.kind(), "syntax", "{src}");
    }
}

#[test]
fn cond_switch() {
    assert_eq!(expr("switch {case a: b; case c: d; default: e}"), "(cond a b c d :else e)");
    assert_eq!(expr("switch {case a: b; case c: d}"), "(cond a b c d)");
    assert_eq!(expr("switch {case a, b: c}"), "(cond (or a b) c)");
}

#[test]
fn type_switch() {
    assert_eq!(
        expr("switch x.(type) {case String: x; case Integer: str(x*x); default: str(x)}"),
        "(cond (instance? String x) x (instance? Integer x) (str (* x x)) :else (str x))"
    );
}

#[test]
fn value_switch() {
    assert_eq!(expr("switch x {case A: b; case C: d; default: e}"), "(case x :a b :c d e)");
    assert_eq!(
        expr("switch x {case P, Q, R: b; case S, T, U: d; default: e}"),
        "(case x (:p :q :r) b (:s :t :u) d e)"
    );
    assert_eq!(expr("switch x {case 1: b}"), "(case x 1 b nil)");
}

#[test]
fn switch_with_initializer() {
    assert_eq!(expr("switch x := bar; x {case A: b; case C: d; default: e}"), "(let [x bar] (case x :a b :c d e))");
    assert_eq!(
        expr("switch x := bar(); x {case P, Q, R: b; case S, T, U: d; default: e}"),
        "(let [x (bar)] (case x (:p :q :r) b (:s :t :u) d e))"
    );
}

#[test]
fn multi_line_switch() {
    let src = "switch {\ncase a:\n  b\n  c\ncase d:\n  e\ndefault:\n  f\n}";
    assert_eq!(expr(src), "(cond a (do b c) d e :else f)");
}

#[test]
fn try_catch() {
    assert_eq!(expr("try{a}catch T e{b}"), "(try a (catch T e b))");
    assert_eq!(expr("try{a}catch T1 e1{b} catch T2 e2{c}"), "(try a (catch T1 e1 b) (catch T2 e2 c))");
    assert_eq!(expr("try{a;b}catch T e{c;d}"), "(try a b (catch T e c d))");
    assert_eq!(expr("try{a}catch T e{b}finally{c}"), "(try a (catch T e b) (finally c))");
    assert_eq!(expr("try { a } catch T e{ b }"), "(try a (catch T e b))");
}

#[test]
fn try_catch_with_imported_types() {
    let out = compile_ok("foo.go", "package foo\nimport type a.{T1, T2}\ntry{a}catch T1 e1{b} catch T2 e2{c}");
    assert_eq!(
        out,
        "(ns foo (:gen-class) (:import (a T1 T2))) (set! *warn-on-reflection* true) (try a (catch T1 e1 b) (catch T2 e2 c))"
    );
}

#[test]
fn tail_recursion() {
    assert_eq!(expr("loop(){a;recur()}"), "(loop [] a (recur))");
    assert_eq!(expr("loop(a=b){c;recur(d)}"), "(loop [a b] c (recur d))");
    assert_eq!(expr("loop(a=b,c=d){e;recur(f,g)}"), "(loop [a b c d] e (recur f g))");
}

#[test]
fn construction_with_imported_type() {
    let out = compile_ok("foo.go", "package foo\nimport type foo.Foo\nnew Foo(a,b,c)");
    assert_eq!(out, "(ns foo (:gen-class) (:import (foo Foo))) (set! *warn-on-reflection* true) (Foo. a b c)");
}

#[test]
fn unclosed_block_is_a_syntax_error() {
    let err = compile_fails("foo.go", "package foo\nif a {b");
    assert_eq!(err.kind(), "syntax");
}
