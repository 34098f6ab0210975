mod common;

use clojo::diagnostics::CompileError;
use common::{compile_fails, compile_ok};

const FULL_SOURCE: &str = r#"
package foo
import(
  b "bar/baz"
  ff "foo/faz/fedudle"
)

var x = b.bbb("blah blah")
func FooBar(iii, jjj) {
  ff.fumanchu(
    {
      OOO: func(m,n) {str(m,n)},
      PPP: func(m,n) {
        str(m,n)
      },
      QQQ: qq
    }
  )
}
"#;

#[test]
fn full_source_file() {
    assert_eq!(
        compile_ok("foo.go", FULL_SOURCE),
        concat!(
            "(ns foo (:gen-class) (:require [bar.baz :as b] [foo.faz.fedudle :as ff]))",
            " (set! *warn-on-reflection* true)",
            r#" (def ^:private x (b/bbb "blah blah"))"#,
            " (defn Foo-bar [iii jjj] (ff/fumanchu {:ooo (fn [m n] (str m n)), :ppp (fn [m n] (str m n)), :qqq qq}))"
        )
    );
}

#[test]
fn full_source_file_with_async() {
    let src = FULL_SOURCE.replace("        str(m,n)\n", "        go str(m,n)\n");
    assert_eq!(
        compile_ok("foo.go", &src),
        concat!(
            "(ns foo (:gen-class) (:require [bar.baz :as b] [foo.faz.fedudle :as ff]",
            " [clojure.core.async :as async :refer [chan go thread <! >! alt! <!! >!! alt!!]]))",
            " (set! *warn-on-reflection* true)",
            r#" (def ^:private x (b/bbb "blah blah"))"#,
            " (defn Foo-bar [iii jjj] (ff/fumanchu {:ooo (fn [m n] (str m n)), :ppp (fn [m n] (go (str m n))), :qqq qq}))"
        )
    );
}

#[test]
fn aliased_import() {
    assert_eq!(
        compile_ok("foo.go", "\npackage foo\nimport(\n  b \"bar\"\n)\nb.xxx\n"),
        "(ns foo (:gen-class) (:require [bar :as b])) (set! *warn-on-reflection* true) b/xxx"
    );
}

#[test]
fn default_alias_is_last_segment() {
    assert_eq!(
        compile_ok("foo.go", "package foo\nimport \"clojure/string\"\nstring.join(\",\", xs)"),
        r#"(ns foo (:gen-class) (:require [clojure.string :as string])) (set! *warn-on-reflection* true) (string/join "," xs)"#
    );
    assert_eq!(
        compile_ok("foo.go", "package foo\nimport \"o\"\no.f(x)"),
        "(ns foo (:gen-class) (:require [o :as o])) (set! *warn-on-reflection* true) (o/f x)"
    );
}

#[test]
fn side_effect_import() {
    assert_eq!(
        compile_ok("foo.go", "\npackage foo\nimport(\n  b \"bar\"\n  _ \"foo\"\n)\nb.xxx\n"),
        "(ns foo (:gen-class) (:require [bar :as b] [foo])) (set! *warn-on-reflection* true) b/xxx"
    );
}

#[test]
fn exclude_core_names() {
    assert_eq!(
        compile_ok("foo.go", "\npackage foo\nexclude ( +, * )\na\n"),
        "(ns foo (:gen-class) (:refer-clojure :exclude [+ *])) (set! *warn-on-reflection* true) a"
    );
}

#[test]
fn host_type_imports() {
    let src = r#"
package java
import type (
  java.util.{HashMap, List}
  java.util.concurrent.atomic.AtomicLong
)

new HashMap({"happy?": true})
new AtomicLong(42)
new List()
"#;
    assert_eq!(
        compile_ok("joy/java.go", src),
        concat!(
            "(ns joy.java (:gen-class) (:import (java.util HashMap List) (java.util.concurrent.atomic AtomicLong)))",
            " (set! *warn-on-reflection* true)",
            r#" (HashMap. {"happy?" true}) (AtomicLong. 42) (List.)"#
        )
    );
}

#[test]
fn typed_var_with_imported_type() {
    assert_eq!(
        compile_ok("foo.go", "package foo\nimport type (\nfoo.FooType\n)\nvar a FooType = 12345"),
        "(ns foo (:gen-class) (:import (foo FooType))) (set! *warn-on-reflection* true) (def ^{:private true, :tag FooType} a 12345)"
    );
}

#[test]
fn qualified_constructor_uses_imported_type() {
    assert_eq!(
        compile_ok("foo.go", "package foo\nimport type (\na.Foo\n)\nnew a.Foo()"),
        "(ns foo (:gen-class) (:import (a Foo))) (set! *warn-on-reflection* true) (a.Foo.)"
    );
}

#[test]
fn embedded_host_member_assignment() {
    assert_eq!(
        compile_ok("foo.gos", "package foo\nmutateSet( js.window->_onload, start)"),
        "(ns foo) (set! (. js/window -onload) start)"
    );
}

#[test]
fn embedded_host_constructor() {
    assert_eq!(compile_ok("foo.gos", "package foo\nnew js.Date()->toISOString"), "(ns foo) (. (js.Date.) toISOString)");
}

#[test]
fn undeclared_package_with_no_imports() {
    let err = compile_fails("foo.go", "package foo\nhuh.bar");
    assert_eq!(err.to_string(), r#"package "huh" in huh.bar does not appear in imports []"#);
}

#[test]
fn undeclared_package_lists_known_aliases() {
    let err = compile_fails("foo.go", "package foo\nimport(\n\"aaa\"\n\"bbb\"\n)\nhuh.bar");
    assert!(matches!(err, CompileError::UndeclaredImport { .. }));
    assert_eq!(err.to_string(), r#"package "huh" in huh.bar does not appear in imports [aaa, bbb]"#);
}

#[test]
fn js_is_not_ambient_on_the_jvm() {
    let err = compile_fails("foo.go", "package foo\njs.alert(1)");
    assert_eq!(err.kind(), "undeclared-import");
}

#[test]
fn unused_package() {
    let err = compile_fails("foo.go", "package foo\nimport \"aaa\"\n1234");
    assert_eq!(err.to_string(), "Packages imported but never used: [aaa]");
}

#[test]
fn unused_packages_are_batched() {
    let err = compile_fails("foo.go", "package foo\nimport(\n\"aaa\"\n\"bbb\"\n)\n1234");
    assert_eq!(err.to_string(), "Packages imported but never used: [aaa, bbb]");
    let err = compile_fails("foo.go", "package foo\nimport(\n\"aaa\"\n\"bbb\"\n)\naaa.xxx");
    assert_eq!(err.to_string(), "Packages imported but never used: [bbb]");
}

#[test]
fn unused_types() {
    let err = compile_fails("foo.go", "package foo\nimport type(\na.Aaa\nb.Bbb\n)\n1234");
    assert_eq!(err.to_string(), "Types imported but never used: [Aaa, Bbb]");
    let err = compile_fails("foo.go", "package foo\nimport type(\na.Aaa\nb.Bbb\n)\nAaa::xxx");
    assert_eq!(err.to_string(), "Types imported but never used: [Bbb]");
}

#[test]
fn unused_packages_reported_before_types() {
    let err = compile_fails("foo.go", "package foo\nimport \"aaa\"\nimport type b.Bbb\n1234");
    assert_eq!(err.kind(), "unused-import");
}
