//! Batch compilation of source trees. Every file compiles independently, so
//! a batch fans out over the rayon pool and one failure never stops the rest.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::diagnostics::CompileError;
use crate::span::LineIndex;
use crate::{output_path_for, parse, CompileOptions, StartRule};

#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Recompile even when the output is newer than the source.
    pub force: bool,
    /// Return generated text instead of writing output files.
    pub to_stdout: bool,
    /// Warn when output bytes / source bytes falls below this.
    pub min_size_ratio: f64,
    pub options: CompileOptions,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { force: false, to_stdout: false, min_size_ratio: 0.4, options: CompileOptions::default() }
    }
}

#[derive(Debug)]
pub enum FileOutcome {
    Compiled {
        source: PathBuf,
        /// `None` when the text went to stdout instead.
        output: Option<PathBuf>,
        lines: usize,
        text: Option<String>,
    },
    UpToDate {
        source: PathBuf,
    },
    Failed {
        source: PathBuf,
        /// Source text when it could be read, for diagnostics.
        text: Option<String>,
        error: CompileError,
    },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    pub compiled: usize,
    pub up_to_date: usize,
    pub failed: usize,
    pub lines: usize,
    pub elapsed: Duration,
}

fn is_source(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("go" | "gos"))
}

/// Expand directories into the source files beneath them. Explicit file
/// arguments are kept whatever their extension. Hidden directories are skipped.
pub fn discover(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_source(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

/// Output exists and was modified no earlier than the source.
fn is_fresh(source: &Path, output: &Path) -> bool {
    let modified = |p: &Path| std::fs::metadata(p).and_then(|m| m.modified()).ok();
    match (modified(source), modified(output)) {
        (Some(src), Some(out)) => out >= src,
        _ => false,
    }
}

pub fn compile_file(path: &Path, config: &DriverConfig) -> FileOutcome {
    let failed = |text: Option<String>, error: CompileError| {
        let line = text.as_deref().zip(error.span()).map(|(src, span)| LineIndex::new(src).line_col(span.start).0);
        error!(file = %path.display(), kind = error.kind(), line, "{error}");
        FileOutcome::Failed { source: path.to_path_buf(), text, error }
    };

    let output = match output_path_for(path) {
        Some(output) => output,
        None => {
            let err = std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a .go or .gos file");
            return failed(None, CompileError::io(path, err));
        }
    };
    if !config.force && !config.to_stdout && is_fresh(path, &output) {
        info!(file = %path.display(), "up to date");
        return FileOutcome::UpToDate { source: path.to_path_buf() };
    }

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => return failed(None, CompileError::io(path, e)),
    };

    let started = Instant::now();
    let display = path.to_string_lossy();
    let text = match parse(&display, &source, StartRule::for_path(&display), &config.options) {
        Ok(text) => text,
        Err(e) => return failed(Some(source), e),
    };
    let lines = source.lines().count();
    let elapsed = started.elapsed().as_secs_f64();
    let lines_per_sec = if elapsed > 0.0 { (lines as f64 / elapsed) as u64 } else { 0 };

    if config.to_stdout {
        info!(file = %path.display(), lines, lines_per_sec, "compiled");
        return FileOutcome::Compiled { source: path.to_path_buf(), output: None, lines, text: Some(text) };
    }

    if text.is_empty() {
        // Never leave a stale or empty output behind.
        let _ = std::fs::remove_file(&output);
        let err = std::io::Error::new(std::io::ErrorKind::InvalidData, "compiler produced no output");
        return failed(Some(source), CompileError::io(&output, err));
    }

    let written = format!(";; Compiled from {}\n{text}\n", path.display());
    if let Err(e) = std::fs::write(&output, &written) {
        return failed(Some(source), CompileError::io(&output, e));
    }

    let ratio = written.len() as f64 / source.len().max(1) as f64;
    if ratio < config.min_size_ratio {
        warn!(
            file = %path.display(),
            output = %output.display(),
            ratio,
            "output is much smaller than its source"
        );
    }
    info!(file = %path.display(), output = %output.display(), lines, lines_per_sec, "compiled");
    FileOutcome::Compiled { source: path.to_path_buf(), output: Some(output), lines, text: None }
}

/// Compile every file in parallel. Outcomes come back in input order.
pub fn compile_batch(files: &[PathBuf], config: &DriverConfig) -> (Vec<FileOutcome>, BatchSummary) {
    let started = Instant::now();
    let outcomes: Vec<FileOutcome> = files.par_iter().map(|path| compile_file(path, config)).collect();

    let mut summary = BatchSummary::default();
    for outcome in &outcomes {
        match outcome {
            FileOutcome::Compiled { lines, .. } => {
                summary.compiled += 1;
                summary.lines += lines;
            }
            FileOutcome::UpToDate { .. } => summary.up_to_date += 1,
            FileOutcome::Failed { .. } => summary.failed += 1,
        }
    }
    summary.elapsed = started.elapsed();
    info!(
        compiled = summary.compiled,
        up_to_date = summary.up_to_date,
        failed = summary.failed,
        lines = summary.lines,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "batch finished"
    );
    (outcomes, summary)
}
