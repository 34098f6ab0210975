mod common;

use common::{compile_ok, expr};

#[test]
fn precedence() {
    assert_eq!(expr("a || b < c"), "(or a (< b c))");
    assert_eq!(expr("a || b && c"), "(or a (and b c))");
    assert_eq!(expr("a && b || c"), "(or (and a b) c)");
    assert_eq!(expr("a * b - c"), "(- (* a b) c)");
    assert_eq!(expr("c + a * b"), "(+ c (* a b))");
    assert_eq!(expr("a / b + c"), "(+ (/ a b) c)");
    assert_eq!(expr("1<<64 - 1"), "(- (bit-shift-left 1 64) 1)");
}

#[test]
fn left_associativity() {
    assert_eq!(expr("x / y * z"), "(* (/ x y) z)");
    assert_eq!(expr("x * y / z"), "(/ (* x y) z)");
    assert_eq!(expr("x + y - z"), "(- (+ x y) z)");
    assert_eq!(expr("x - y + z"), "(+ (- x y) z)");
}

#[test]
fn operator_spellings() {
    assert_eq!(expr("a == b"), "(= a b)");
    assert_eq!(expr("a != b"), "(not= a b)");
    assert_eq!(expr("a % b"), "(mod a b)");
    assert_eq!(expr("a | b"), "(bit-or a b)");
    assert_eq!(expr("a ^ b"), "(bit-xor a b)");
    assert_eq!(expr("a & b"), "(bit-and a b)");
    assert_eq!(expr("a &^ b"), "(bit-and-not a b)");
    assert_eq!(expr("a >> 2"), "(bit-shift-right a 2)");
    assert_eq!(expr("a <= b"), "(<= a b)");
    assert_eq!(expr("a >= b"), "(>= a b)");
}

#[test]
fn unary_operators() {
    assert_eq!(expr("+a"), "(+ a)");
    assert_eq!(expr("-a"), "(- a)");
    assert_eq!(expr("!a"), "(not a)");
    assert_eq!(expr("^a"), "(bit-not a)");
    assert_eq!(expr("*a"), "@a");
}

#[test]
fn parentheses_group() {
    assert_eq!(expr("(a  or  b)  and  c"), "(and (or a b) c)");
    assert_eq!(expr("22 / (7 + 4)"), "(/ 22 (+ 7 4))");
    assert_eq!(expr("22 / 7"), "(/ 22 7)");
}

#[test]
fn infix_function_calls() {
    assert_eq!(expr("a  b  c"), "(b a c)");
    assert_eq!(expr("a  isIdentical  b"), "(identical? a b)");
    assert_eq!(expr("a or b and c"), "(and (or a b) c)");
    assert_eq!(expr(r#"x str "y""#), r#"(str x "y")"#);
}

#[test]
fn non_alphanumeric_symbols() {
    assert_eq!(expr("foo(a,=>,b)"), "(foo a => b)");
}

#[test]
fn qualified_call_with_arrow_symbol() {
    let out = compile_ok("foo.go", "package foo\nimport \"test\"\ntest.fact(\"interesting\", parse(\"a\"), =>, parsed(\"a\"))");
    assert!(out.ends_with(r#"(test/fact "interesting" (parse "a") => (parsed "a"))"#), "{out}");
}

#[test]
fn calls() {
    assert_eq!(expr("f()"), "(f)");
    assert_eq!(expr("f(x)"), "(f x)");
    assert_eq!(expr("f(x,y,z)"), "(f x y z)");
    assert_eq!(expr("f(a, b, args...)"), "(apply f a b args)");
    assert_eq!(expr("f(...args)"), "(apply f args)");
}

#[test]
fn indexing() {
    assert_eq!(expr("aaa(BBB)"), "(aaa :bbb)");
    assert_eq!(expr("aaa[bbb]"), "(nth aaa bbb)");
    assert_eq!(expr("aaa[BBB]"), "(:bbb aaa)");
    assert_eq!(expr("v(6)"), "(v 6)");
    assert_eq!(expr("v[6]"), "(nth v 6)");
}

#[test]
fn slices() {
    assert_eq!(expr("a[1:]"), "(drop 1 a)");
    assert_eq!(expr("a[:2]"), "(take 2 a)");
    assert_eq!(expr("a[1:3]"), "(take (- 3 1) (drop 1 a))");
    assert_eq!(expr("a[:len(a)/2]"), "(take (/ (count a) 2) a)");
}

#[test]
fn host_method_calls() {
    assert_eq!(expr("foo->bar"), "(. foo bar)");
    assert_eq!(expr("foo->bar(a,b)"), "(. foo (bar a b))");
    assert_eq!(expr("foo->bar()"), "(. foo (bar))");
    assert_eq!(expr(r#""fred"->toUpperCase()"#), r#"(. "fred" (toUpperCase))"#);
    assert_eq!(expr("println(a, e->getMessage())"), "(println a (. e (getMessage)))");
    assert_eq!(expr("foo->_bar"), "(. foo -bar)");
}

#[test]
fn static_members() {
    assert_eq!(expr(r#"System::getProperty("foo")"#), r#"(System/getProperty "foo")"#);
    assert_eq!(expr("Math::PI"), "Math/PI");
}

#[test]
fn method_calls_inside_arithmetic() {
    assert_eq!(expr("999 * f->foo()"), "(* 999 (. f (foo)))");
    assert_eq!(expr("f->foo() / b->bar()"), "(/ (. f (foo)) (. b (bar)))");
    assert_eq!(expr("999 * f->foo() / b->bar()"), "(/ (* 999 (. f (foo))) (. b (bar)))");
    assert_eq!(expr("999 * f->foo"), "(* 999 (. f foo))");
    assert_eq!(expr("f->foo / b->bar"), "(/ (. f foo) (. b bar))");
    assert_eq!(expr("999 * f->foo / b->bar"), "(/ (* 999 (. f foo)) (. b bar))");
}

#[test]
fn construction() {
    assert_eq!(expr("new Foo()"), "(Foo.)");
    assert_eq!(expr("new Foo(a)"), "(Foo. a)");
    assert_eq!(expr("new Foo(a,b,c)"), "(Foo. a b c)");
    assert_eq!(expr("new java.io.File(p)"), "(java.io.File. p)");
}

#[test]
fn record_literal() {
    assert_eq!(expr("Vertex{\n40.68433, -74.39967\n}"), "(Vertex. 40.68433 (- 74.39967))");
}

#[test]
fn assoc_update() {
    assert_eq!(expr("x += {AA: aaa, BB: bbb}"), "(assoc x :aa aaa :bb bbb)");
    assert_eq!(expr("x += {4 AAA 6 8: aaa}"), "(assoc-in x [4 :aaa 6 8] aaa)");
    assert_eq!(expr("x += {AA: 1, 2 BB: 3}"), "(assoc-in (assoc x :aa 1) [2 :bb] 3)");
}

#[test]
fn dissoc_update() {
    assert_eq!(expr("x -= {AA, BB}"), "(dissoc x :aa :bb)");
    assert_eq!(expr("x -= {AA: aaa, BB: bbb}"), "(dissoc x :aa :bb)");
}

#[test]
fn quoting() {
    assert_eq!(expr("quote(foo(a))"), "'(foo a)");
    assert_eq!(expr("syntax foo(a)"), "`(foo a)");
    assert_eq!(
        expr("syntax fred(x, unquote x, lst, unquotes lst, 7, 8, NINE)"),
        "`(fred x ~x lst ~@lst 7 8 :nine)"
    );
}
