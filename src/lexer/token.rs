use logos::Logos;

use super::literals;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("type")]
    Type,
    #[token("exclude")]
    Exclude,
    #[token("func")]
    Func,
    #[token("var")]
    Var,
    #[token("const")]
    Const,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("range")]
    Range,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("select")]
    Select,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("loop")]
    Loop,
    #[token("go")]
    Go,
    #[token("chan")]
    Chan,
    #[token("new")]
    New,
    #[token("quote")]
    Quote,
    #[token("syntax")]
    Syntax,
    #[token("unquote")]
    Unquote,
    #[token("unquotes")]
    Unquotes,
    #[token("interface")]
    Interface,
    #[token("struct")]
    Struct,
    #[token("implements")]
    Implements,

    // Literals
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| literals::hex_int(lex.slice()))]
    #[regex(r"[0-9]+N?", |lex| literals::decimal_int(lex.slice()))]
    IntLit(String),

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?M?", |lex| literals::float(lex.slice()))]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?M?", |lex| literals::float(lex.slice()))]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+M?", |lex| literals::float(lex.slice()))]
    #[regex(r"[0-9]+M", |lex| literals::float(lex.slice()))]
    FloatLit(String),

    /// Interpreted string; holds the text between the quotes, escapes untouched.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| {
        let s = lex.slice();
        let raw = &s[1..s.len() - 1];
        match literals::first_bad_escape(raw) {
            Some(_) => None,
            None => Some(raw.to_string()),
        }
    })]
    StringLit(String),

    /// Backtick string; holds the raw text between the backticks.
    #[regex(r"`[^`]*`", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    RawStringLit(String),

    /// Character literal, already rendered in target spelling (`\a`, `\newline`, ...).
    #[regex(r"'([^'\\\n]|\\u[0-9a-fA-F]{4}|\\[0-7]{3}|\\[^\n])'", |lex| literals::char_lit(lex.slice()))]
    CharLit(String),

    /// Slash-delimited regular expression, body already rewritten for the target reader.
    /// Never produced by logos: [`super::lex`] scans it by hand after a `/` that
    /// starts an operand.
    RegexLit(String),

    // Identifiers
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    #[regex(r"[\x{2190}-\x{22FF}\x{27C0}-\x{27EF}\x{2980}-\x{2AFF}]+")]
    Ident,

    /// All-uppercase identifier, optionally with `#`/`.` selector segments.
    #[regex(r"[A-Z][A-Z0-9_]*([#.][A-Z][A-Z0-9_]*)*", priority = 5)]
    Label,

    /// `\anything\`: passes through to the output untouched.
    #[regex(r"\\[^\\\n]+\\")]
    EscapedIdent,

    #[regex(r"\$[0-9]+")]
    DollarArg,
    #[token("$*")]
    DollarRest,

    // Operators
    #[token("++")]
    PlusPlus,
    #[token("+")]
    Plus,
    #[token("--")]
    MinusMinus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("=")]
    Eq,
    #[token(":=")]
    ColonEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&")]
    Amp,
    #[token("&^")]
    AmpCaret,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
    #[token("<-")]
    LArrow,
    #[token("<:")]
    LColon,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,

    // Newline (significant for statement termination)
    #[regex(r"\n[\n]*")]
    Newline,

    // Comments (skip)
    #[regex(r"//[^\n]*")]
    Comment,
}

impl Token {
    /// True if this token can be the last token of an operand, which makes a
    /// following `/` a division rather than the start of a regex literal.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::IntLit(_)
                | Token::FloatLit(_)
                | Token::StringLit(_)
                | Token::RawStringLit(_)
                | Token::CharLit(_)
                | Token::RegexLit(_)
                | Token::Ident
                | Token::Label
                | Token::EscapedIdent
                | Token::DollarArg
                | Token::DollarRest
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
                | Token::FatArrow
        )
    }
}

/// Returns true if the given string is a reserved word.
pub fn is_keyword(s: &str) -> bool {
    matches!(s, "package" | "import" | "type" | "exclude" | "func" | "var" | "const"
        | "if" | "else" | "for" | "range" | "switch" | "case" | "default" | "select"
        | "try" | "catch" | "finally" | "loop" | "go" | "chan" | "new" | "quote"
        | "syntax" | "unquote" | "unquotes" | "interface" | "struct" | "implements")
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Package => write!(f, "package"),
            Token::Import => write!(f, "import"),
            Token::Type => write!(f, "type"),
            Token::Exclude => write!(f, "exclude"),
            Token::Func => write!(f, "func"),
            Token::Var => write!(f, "var"),
            Token::Const => write!(f, "const"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::For => write!(f, "for"),
            Token::Range => write!(f, "range"),
            Token::Switch => write!(f, "switch"),
            Token::Case => write!(f, "case"),
            Token::Default => write!(f, "default"),
            Token::Select => write!(f, "select"),
            Token::Try => write!(f, "try"),
            Token::Catch => write!(f, "catch"),
            Token::Finally => write!(f, "finally"),
            Token::Loop => write!(f, "loop"),
            Token::Go => write!(f, "go"),
            Token::Chan => write!(f, "chan"),
            Token::New => write!(f, "new"),
            Token::Quote => write!(f, "quote"),
            Token::Syntax => write!(f, "syntax"),
            Token::Unquote => write!(f, "unquote"),
            Token::Unquotes => write!(f, "unquotes"),
            Token::Interface => write!(f, "interface"),
            Token::Struct => write!(f, "struct"),
            Token::Implements => write!(f, "implements"),
            Token::IntLit(n) => write!(f, "{n}"),
            Token::FloatLit(n) => write!(f, "{n}"),
            Token::StringLit(s) => write!(f, "\"{s}\""),
            Token::RawStringLit(s) => write!(f, "`{s}`"),
            Token::CharLit(c) => write!(f, "character {c}"),
            Token::RegexLit(r) => write!(f, "regex #\"{r}\""),
            Token::Ident => write!(f, "identifier"),
            Token::Label => write!(f, "label"),
            Token::EscapedIdent => write!(f, "escaped identifier"),
            Token::DollarArg => write!(f, "argument reference"),
            Token::DollarRest => write!(f, "$*"),
            Token::PlusPlus => write!(f, "++"),
            Token::Plus => write!(f, "+"),
            Token::MinusMinus => write!(f, "--"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::PlusEq => write!(f, "+="),
            Token::MinusEq => write!(f, "-="),
            Token::Eq => write!(f, "="),
            Token::ColonEq => write!(f, ":="),
            Token::EqEq => write!(f, "=="),
            Token::BangEq => write!(f, "!="),
            Token::Shl => write!(f, "<<"),
            Token::Shr => write!(f, ">>"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::Amp => write!(f, "&"),
            Token::AmpCaret => write!(f, "&^"),
            Token::Pipe => write!(f, "|"),
            Token::Caret => write!(f, "^"),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::Bang => write!(f, "!"),
            Token::LArrow => write!(f, "<-"),
            Token::LColon => write!(f, "<:"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Semi => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::ColonColon => write!(f, "::"),
            Token::Arrow => write!(f, "->"),
            Token::FatArrow => write!(f, "=>"),
            Token::Ellipsis => write!(f, "..."),
            Token::Dot => write!(f, "."),
            Token::Newline => write!(f, "newline"),
            Token::Comment => write!(f, "comment"),
        }
    }
}
