pub mod literals;
pub mod token;
pub use token::{is_keyword, Token};

use logos::Logos;
use crate::span::{Span, Spanned};
use crate::diagnostics::CompileError;

pub fn lex(source: &str) -> Result<Vec<Spanned<Token>>, CompileError> {
    let mut tokens: Vec<Spanned<Token>> = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            // Skip comments
            Ok(Token::Comment) => continue,
            // `/` where an operand starts opens a regex; after an operand it divides.
            Ok(Token::Slash) if !previous_ends_operand(&tokens) => match regex_len(&source[span.end..]) {
                Some(len) => {
                    let body = &source[span.end..span.end + len];
                    lexer.bump(len + 1);
                    tokens.push(Spanned::new(
                        Token::RegexLit(literals::regex_body(body)),
                        Span::new(span.start, span.end + len + 1),
                    ));
                }
                None => tokens.push(Spanned::new(Token::Slash, Span::new(span.start, span.end))),
            },
            Ok(tok) => {
                tokens.push(Spanned::new(tok, Span::new(span.start, span.end)));
            }
            Err(()) => return Err(unexpected(source, span.start, span.end)),
        }
    }

    Ok(tokens)
}

fn previous_ends_operand(tokens: &[Spanned<Token>]) -> bool {
    tokens.last().is_some_and(|t| t.node.ends_operand())
}

/// Byte length of a non-empty regex body up to its closing unescaped `/`,
/// or `None` when the line ends first.
fn regex_len(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '/' if i > 0 => return Some(i),
            '/' | '\n' => return None,
            '\\' => match chars.next() {
                Some((_, '\n')) | None => return None,
                Some(_) => {}
            },
            _ => {}
        }
    }
    None
}

/// Build a LexError pointing at the offending character. For a string or character
/// literal with a bad escape, that is the escape character rather than the opening quote.
fn unexpected(source: &str, start: usize, end: usize) -> CompileError {
    let slice = &source[start..end];
    if let Some(c) = slice.strip_prefix("'\\").and_then(|rest| rest.chars().next()) {
        let at = start + 2;
        return CompileError::lex(c, Span::new(at, at + c.len_utf8()));
    }
    if let Some(raw) = slice.strip_prefix('"') {
        let raw = raw.strip_suffix('"').unwrap_or(raw);
        if let Some((offset, c)) = literals::first_bad_escape(raw) {
            let at = start + 1 + offset;
            return CompileError::lex(c, Span::new(at, at + c.len_utf8()));
        }
    }
    let c = slice.chars().next().unwrap_or('\0');
    CompileError::lex(c, Span::new(start, start + c.len_utf8().max(1)))
}
