pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod imports;
pub mod codegen;
pub mod manifest;
pub mod driver;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use codegen::header::{self, Host};
use codegen::Target;
use diagnostics::CompileError;
use imports::ImportTable;
use parser::ast::SourceFile;
pub use parser::StartRule;

/// Per-file compilation settings. Nothing here changes while a file compiles.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Log the parsed tree as JSON before generating code.
    pub emit_parse_tree: bool,
    /// Lower every channel operation to the cooperative family.
    pub cooperative_mode: bool,
    /// Log the result of every start rule that accepts the input.
    pub dump_ambiguity: bool,
    /// One top-level form per line instead of a single line.
    pub pretty: bool,
    /// Directory the namespace path is computed relative to.
    pub source_root: Option<PathBuf>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { emit_parse_tree: false, cooperative_mode: false, dump_ambiguity: false, pretty: true, source_root: None }
    }
}

/// One start rule that accepted the input, with what it rendered to.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseCandidate {
    pub rule: StartRule,
    pub text: String,
}

/// Compile `source` under `rule` (lex → parse → generate → validate).
pub fn parse(path: &str, source: &str, rule: StartRule, options: &CompileOptions) -> Result<String, CompileError> {
    if options.dump_ambiguity {
        let candidates = explore_parses(path, source, options);
        info!(target: "clojo::ambiguity", path, count = candidates.len(), "accepted parses");
        for candidate in &candidates {
            info!(target: "clojo::ambiguity", rule = candidate.rule.name(), text = %candidate.text, "candidate");
        }
    }
    compile_with_rule(path, source, rule, options)
}

/// Compile with the start rule chosen from the file extension.
pub fn compile_to_string(path: &str, source: &str) -> Result<String, CompileError> {
    parse(path, source, StartRule::for_path(path), &CompileOptions::default())
}

/// Try every start rule and keep the ones that succeed.
pub fn explore_parses(path: &str, source: &str, options: &CompileOptions) -> Vec<ParseCandidate> {
    let quiet = CompileOptions { emit_parse_tree: false, dump_ambiguity: false, ..options.clone() };
    StartRule::ALL
        .iter()
        .filter_map(|&rule| {
            compile_with_rule(path, source, rule, &quiet).ok().map(|text| ParseCandidate { rule, text })
        })
        .collect()
}

pub fn parse_tree_json(file: &SourceFile) -> Result<String, CompileError> {
    serde_json::to_string_pretty(file).map_err(|e| CompileError::internal(format!("parse tree serialization ({e})")))
}

/// `foo.go` → `foo.clj`, `foo.gos` → `foo.cljs`.
pub fn output_path_for(path: &Path) -> Option<PathBuf> {
    match path.extension()?.to_str()? {
        "go" => Some(path.with_extension("clj")),
        "gos" => Some(path.with_extension("cljs")),
        _ => None,
    }
}

fn compile_with_rule(path: &str, source: &str, rule: StartRule, options: &CompileOptions) -> Result<String, CompileError> {
    let tokens = lexer::lex(source)?;
    debug!(path, tokens = tokens.len(), "lexed");

    let file = parser::Parser::new(&tokens, source).parse_file(rule)?;
    debug!(path, rule = rule.name(), forms = file.body.len(), "parsed");
    if options.emit_parse_tree {
        info!(target: "clojo::ast", path, tree = %parse_tree_json(&file)?, "parse tree");
    }

    let host = match rule {
        StartRule::EmbeddedFile => Host::Embedded,
        StartRule::FullFile | StartRule::SingleExpression => Host::Jvm,
    };
    let table = match rule {
        StartRule::SingleExpression => ImportTable::open(),
        StartRule::EmbeddedFile => ImportTable::from_file(&file).with_ambient("js"),
        StartRule::FullFile => ImportTable::from_file(&file),
    };
    // The embedded host has no blocking channel operations.
    let target = Target { host, cooperative: options.cooperative_mode || host == Host::Embedded };

    let generated = codegen::generate(&file.body, target, table)?;
    generated.imports.validate()?;

    let mut forms = match &file.package {
        Some(package) => {
            let namespace =
                header::namespace_for(Path::new(path), &package.node, package.span, options.source_root.as_deref())?;
            let excludes: Vec<String> = file.excludes.iter().map(|e| e.node.clone()).collect();
            header::render(&namespace, host, &generated.imports, &excludes, generated.uses_async)
        }
        None => Vec::new(),
    };
    forms.extend(generated.forms);
    debug!(path, forms = forms.len(), uses_async = generated.uses_async, "generated");

    Ok(forms.join(if options.pretty { "\n" } else { " " }))
}
