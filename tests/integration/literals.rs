mod common;

use common::expr;

#[test]
fn interpreted_strings() {
    assert_eq!(expr(r#""one two""#), r#""one two""#);
    assert_eq!(expr(r#""one \"two\" three""#), r#""one \"two\" three""#);
    assert_eq!(expr(r#""aaa\"aaa""#), r#""aaa\"aaa""#);
    assert_eq!(expr(r#""\n""#), r#""\n""#);
    assert_eq!(expr(r#""aaa//bbb""#), r#""aaa//bbb""#);
}

#[test]
fn raw_strings() {
    assert_eq!(expr("`one two`"), r#""one two""#);
    assert_eq!(expr(r"`foo\bar`"), r#""foo\\bar""#);
    assert_eq!(expr("`\n'\u{8}`"), r#""\n'\b""#);
    assert_eq!(expr("`\"`"), r#""\"""#);
}

#[test]
fn regular_expressions() {
    assert_eq!(expr("/aaa/"), r##"#"aaa""##);
    assert_eq!(expr("/[0-9]+/"), r##"#"[0-9]+""##);
    assert_eq!(expr(r"/aaa\nbbb/"), r##"#"aaa\nbbb""##);
    assert_eq!(expr("/(ox)(?i)$/"), r##"#"(ox)(?i)$""##);
    assert_eq!(expr("/a/"), r##"#"a""##);
    assert_eq!(expr(r"/\s+/"), r##"#"\s+""##);
    assert_eq!(expr(r"/aaa\p{Ll}bbb/"), r##"#"aaa\p{Ll}bbb""##);
}

#[test]
fn regex_delimiters_and_quotes() {
    assert_eq!(expr(r"/aaa\/bbb/"), r##"#"aaa/bbb""##);
    assert_eq!(expr("/aaa'bbb/"), r##"#"aaa'bbb""##);
    assert_eq!(expr(r#"/aaa"bbb/"#), r##"#"aaa\"bbb""##);
}

#[test]
fn regex_argument() {
    assert_eq!(expr(r#"isMatches(/[0-9]+/, "123")"#), r##"(matches? #"[0-9]+" "123")"##);
}

#[test]
fn characters() {
    assert_eq!(expr("'a'"), r"\a");
    assert_eq!(expr("['a', 'b', 'c']"), r"[\a \b \c]");
    assert_eq!(expr(r"'\n'"), r"\newline");
    assert_eq!(expr("' '"), r"\space");
    assert_eq!(expr(r"'\t'"), r"\tab");
    assert_eq!(expr(r"'\b'"), r"\backspace");
    assert_eq!(expr(r"'\r'"), r"\return");
}

#[test]
fn unicode_and_octal_characters() {
    assert_eq!(expr(r"'\uDEAD'"), r"\uDEAD");
    assert_eq!(expr(r"'\ubeef'"), r"\ubeef");
    assert_eq!(expr(r"'\u1234'"), r"\u1234");
    assert_eq!(expr("'é'"), r"\é");
    assert_eq!(expr(r"'\234'"), r"\o234");
}

#[test]
fn hex_integers() {
    assert_eq!(expr("0xff"), "255");
    assert_eq!(expr("0xcafe"), "51966");
    assert_eq!(expr("0xbabe"), "47806");
    assert_eq!(expr("0xFF"), "255");
    assert_eq!(expr("0xCAFE"), "51966");
}

#[test]
fn hex_integers_of_any_width() {
    assert_eq!(expr("0xffffffffffffffffffffffffffffffffff"), "87112285931760246646623899502532662132735N");
    assert_eq!(expr("0x100000000000000000000000000000000 + 1"), "(+ 340282366920938463463374607431768211456N 1)");
}

#[test]
fn octal_and_decimal_integers() {
    assert_eq!(expr("0664"), "436");
    assert_eq!(expr("0"), "0");
    assert_eq!(expr("12345"), "12345");
    assert_eq!(expr("12345678901234567890N"), "12345678901234567890N");
}

#[test]
fn floats() {
    assert_eq!(expr("2.0"), "2.0");
    assert_eq!(expr("2.000"), "2.0");
    assert_eq!(expr("0."), "0.0");
    assert_eq!(expr("72.40"), "72.4");
    assert_eq!(expr("072.40"), "72.4");
    assert_eq!(expr("2.71828"), "2.71828");
    assert_eq!(expr("1.e+0"), "1.0");
    assert_eq!(expr("6.67428e-11"), "6.67428E-11");
    assert_eq!(expr("1E6"), "1000000.0");
    assert_eq!(expr(".25"), ".25");
    assert_eq!(expr(".12345E+5"), ".12345E+5");
}

#[test]
fn big_decimals() {
    assert_eq!(expr("1.5M"), "1.5M");
    assert_eq!(expr("7M"), "7M");
}

#[test]
fn dictionaries() {
    assert_eq!(expr("{}"), "{}");
    assert_eq!(expr("{A:1}"), "{:a 1}");
    assert_eq!(expr("{A:1, B:2}"), "{:a 1, :b 2}");
    assert_eq!(expr("{A:1, B:2,}"), "{:a 1, :b 2}");
    assert_eq!(expr("{\n  A: 1,\n  B: 2,\n}"), "{:a 1, :b 2}");
    assert_eq!(expr(r#"{"x": f(y)}"#), r#"{"x" (f y)}"#);
}

#[test]
fn sets() {
    assert_eq!(expr("set{}"), "#{}");
    assert_eq!(expr("set{A, B}"), "#{:a :b}");
    assert_eq!(expr("set{'A','B','C'}"), r"#{\A \B \C}");
}

#[test]
fn vectors() {
    assert_eq!(expr("[]"), "[]");
    assert_eq!(expr("[a, b, c]"), "[a b c]");
    assert_eq!(expr("[a, b, c,]"), "[a b c]");
    assert_eq!(expr("[]int{7, 2, 8, -9}"), "[7 2 8 (- 9)]");
    assert_eq!(expr("[[1, 2], [3]]"), "[[1 2] [3]]");
}
