use crate::span::{LineIndex, Span};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lex error: unexpected character '{unexpected}'")]
    Lex { unexpected: char, span: Span },

    #[error("Syntax error: expected {expected}, found {found}")]
    Syntax { expected: String, found: String, span: Span },

    #[error("package \"{package}\" in {reference} does not appear in imports [{}]", known.join(", "))]
    UndeclaredImport { package: String, reference: String, known: Vec<String>, span: Span },

    #[error("Packages imported but never used: [{}]", names.join(", "))]
    UnusedImport { names: Vec<String> },

    #[error("Types imported but never used: [{}]", names.join(", "))]
    UnusedTypeImport { names: Vec<String> },

    /// A node reached the generator in a shape it has no rendering for.
    /// Always a compiler defect.
    #[error("internal error: no code generator case for {what}")]
    InternalDispatch { what: String },

    #[error("could not access {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Manifest error: {msg}")]
    Manifest { msg: String, path: PathBuf },
}

impl CompileError {
    pub fn lex(unexpected: char, span: Span) -> Self {
        Self::Lex { unexpected, span }
    }

    pub fn syntax(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Self::Syntax { expected: expected.into(), found: found.into(), span }
    }

    pub fn undeclared(package: impl Into<String>, reference: impl Into<String>, known: Vec<String>, span: Span) -> Self {
        Self::UndeclaredImport { package: package.into(), reference: reference.into(), known, span }
    }

    pub fn internal(what: impl Into<String>) -> Self {
        Self::InternalDispatch { what: what.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn manifest(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Manifest { msg: msg.into(), path }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex { span, .. }
            | CompileError::Syntax { span, .. }
            | CompileError::UndeclaredImport { span, .. } => Some(*span),
            _ => None,
        }
    }

    /// Short machine-friendly name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Lex { .. } => "lex",
            CompileError::Syntax { .. } => "syntax",
            CompileError::UndeclaredImport { .. } => "undeclared-import",
            CompileError::UnusedImport { .. } => "unused-import",
            CompileError::UnusedTypeImport { .. } => "unused-type-import",
            CompileError::InternalDispatch { .. } => "internal",
            CompileError::Io { .. } => "io",
            CompileError::Manifest { .. } => "manifest",
        }
    }
}

/// Render a CompileError with ariadne for nice terminal output.
pub fn render_error(source: &str, filename: &str, err: &CompileError) {
    use ariadne::{Label, Report, ReportKind, Source};

    match err.span() {
        Some(span) => {
            let label = match err {
                CompileError::Lex { unexpected, .. } => format!("unexpected '{unexpected}'"),
                CompileError::Syntax { expected, .. } => format!("expected {expected}"),
                CompileError::UndeclaredImport { package, .. } => format!("'{package}' is not imported"),
                _ => err.to_string(),
            };
            let printed = Report::build(ReportKind::Error, (), span.start)
                .with_message(format!("{} error in {filename}: {err}", err.kind()))
                .with_label(Label::new(span.start..span.end).with_message(label))
                .finish()
                .eprint(Source::from(source));
            if let Err(e) = printed {
                let (line, col) = LineIndex::new(source).line_col(span.start);
                eprintln!("error [{filename}:{line}:{col}]: {err} ({e})");
            }
        }
        None => match err {
            CompileError::Manifest { msg, path } => {
                eprintln!("error[manifest]: {msg}");
                eprintln!("  --> {}", path.display());
            }
            _ => eprintln!("error [{filename}]: {err}"),
        },
    }
}
