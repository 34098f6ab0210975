#![no_main]
use arbitrary::Arbitrary;
use clojo::{CompileOptions, StartRule};
use libfuzzer_sys::fuzz_target;

/// Source fragments the fuzzer strings together. Working at this level keeps
/// most inputs past the lexer so the parser and generator see them.
#[derive(Arbitrary, Debug)]
enum Fragment {
    Ident,
    Label,
    IntLit,
    FloatLit,
    StringLit,
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    ShortVar,
    Send,
    Func,
    If,
    Else,
    For,
    Range,
    Go,
    Select,
    Case,
    Switch,
    Newline,
}

impl Fragment {
    fn text(&self) -> &'static str {
        match self {
            Fragment::Ident => "x",
            Fragment::Label => "KEY",
            Fragment::IntLit => "42",
            Fragment::FloatLit => "3.14",
            Fragment::StringLit => "\"str\"",
            Fragment::Plus => "+",
            Fragment::Minus => "-",
            Fragment::Star => "*",
            Fragment::Slash => "/",
            Fragment::LeftParen => "(",
            Fragment::RightParen => ")",
            Fragment::LeftBrace => "{",
            Fragment::RightBrace => "}",
            Fragment::LeftBracket => "[",
            Fragment::RightBracket => "]",
            Fragment::Comma => ",",
            Fragment::Colon => ":",
            Fragment::ShortVar => ":=",
            Fragment::Send => "<-",
            Fragment::Func => "func",
            Fragment::If => "if",
            Fragment::Else => "else",
            Fragment::For => "for",
            Fragment::Range => "range",
            Fragment::Go => "go",
            Fragment::Select => "select",
            Fragment::Case => "case",
            Fragment::Switch => "switch",
            Fragment::Newline => "\n",
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzSource {
    fragments: Vec<Fragment>,
    embedded: bool,
}

fuzz_target!(|input: FuzzSource| {
    let body: Vec<&str> = input.fragments.iter().map(Fragment::text).collect();
    let (path, rule) = if input.embedded { ("fuzz.gos", StartRule::EmbeddedFile) } else { ("fuzz.go", StartRule::FullFile) };
    let source = format!("package fuzz\n{}", body.join(" "));

    // Must compile or fail cleanly, never panic
    let _ = clojo::parse(path, &source, rule, &CompileOptions::default());
    let _ = clojo::parse(path, &body.join(" "), StartRule::SingleExpression, &CompileOptions::default());
});
