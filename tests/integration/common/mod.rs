#![allow(dead_code)]

use clojo::diagnostics::CompileError;
use clojo::{CompileOptions, StartRule};

const JVM_HEADER: &str = "(ns foo (:gen-class)) (set! *warn-on-reflection* true)";

pub const JVM_ASYNC_NS: &str =
    "(ns foo (:gen-class) (:require [clojure.core.async :as async :refer [chan go thread <! >! alt! <!! >!! alt!!]]))";

pub const EMBEDDED_ASYNC_NS: &str = "(ns foo (:require-macros [cljs.core.async.macros :as async :refer [go]]) (:require [cljs.core.async :as async :refer [chan <! >! alt!]]))";

fn flat() -> CompileOptions {
    CompileOptions { pretty: false, ..Default::default() }
}

/// Compile a whole file, all forms on one line.
pub fn compile_ok(path: &str, src: &str) -> String {
    match clojo::parse(path, src, StartRule::for_path(path), &flat()) {
        Ok(out) => out,
        Err(e) => panic!("compiling {path} failed: {e}\n--- source ---\n{src}"),
    }
}

pub fn compile_fails(path: &str, src: &str) -> CompileError {
    match clojo::parse(path, src, StartRule::for_path(path), &flat()) {
        Ok(out) => panic!("expected {path} to fail, got: {out}"),
        Err(e) => e,
    }
}

/// Compile a statement sequence with no package clause or imports.
pub fn expr(src: &str) -> String {
    match clojo::parse("expr.go", src, StartRule::SingleExpression, &flat()) {
        Ok(out) => out,
        Err(e) => panic!("compiling {src:?} failed: {e}"),
    }
}

/// `body` compiled as the rest of `foo.go` after `package foo`, compared
/// against the forms that follow the standard header.
pub fn assert_forms(body: &str, expected: &str) {
    let out = compile_ok("foo.go", &format!("package foo\n{body}"));
    assert_eq!(out, format!("{JVM_HEADER} {expected}"), "source: {body:?}");
}

/// Like [`assert_forms`] for code that needs the async library.
pub fn assert_async_forms(body: &str, expected: &str) {
    let out = compile_ok("foo.go", &format!("package foo\n{body}"));
    assert_eq!(out, format!("{JVM_ASYNC_NS} (set! *warn-on-reflection* true) {expected}"), "source: {body:?}");
}
