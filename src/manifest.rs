use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::CompileError;

pub const MANIFEST_FILE: &str = "clojo.toml";

const DEFAULT_MIN_SIZE_RATIO: f64 = 0.4;

// ---- TOML deserialization types ----

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub compile: CompileSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub name: Option<String>,
    /// Relative to the manifest's directory.
    pub source_root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileSection {
    #[serde(default)]
    pub cooperative: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default = "default_min_size_ratio")]
    pub min_size_ratio: f64,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self { cooperative: false, force: false, min_size_ratio: DEFAULT_MIN_SIZE_RATIO }
    }
}

fn default_min_size_ratio() -> f64 {
    DEFAULT_MIN_SIZE_RATIO
}

/// A manifest together with where it was found.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub path: PathBuf,
}

impl LoadedManifest {
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// The configured source root, resolved against the manifest's directory.
    pub fn source_root(&self) -> Option<PathBuf> {
        self.manifest.project.source_root.as_ref().map(|root| self.dir().join(root))
    }
}

/// Walk up from `start_dir` looking for `clojo.toml`, stopping at a
/// repository root.
pub fn find_manifest(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(MANIFEST_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        // .git may be a file (worktrees) or a directory
        if dir.join(".git").exists() {
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}

pub fn load(manifest_path: &Path) -> Result<Manifest, CompileError> {
    let content = std::fs::read_to_string(manifest_path).map_err(|e| {
        CompileError::manifest(format!("{MANIFEST_FILE}: could not read file: {e}"), manifest_path.to_path_buf())
    })?;
    parse_manifest(&content, manifest_path)
}

pub fn parse_manifest(content: &str, manifest_path: &Path) -> Result<Manifest, CompileError> {
    let manifest: Manifest = toml::from_str(content).map_err(|e| {
        CompileError::manifest(format!("{MANIFEST_FILE}: invalid syntax: {e}"), manifest_path.to_path_buf())
    })?;

    if let Some(name) = &manifest.project.name {
        if name.trim().is_empty() {
            return Err(CompileError::manifest(
                format!("{MANIFEST_FILE}: [project] name must not be empty"),
                manifest_path.to_path_buf(),
            ));
        }
    }
    let ratio = manifest.compile.min_size_ratio;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(CompileError::manifest(
            format!("{MANIFEST_FILE}: [compile] min_size_ratio must be between 0 and 1, got {ratio}"),
            manifest_path.to_path_buf(),
        ));
    }
    Ok(manifest)
}

/// Find and load the nearest manifest. `Ok(None)` when there is none.
pub fn discover(start_dir: &Path) -> Result<Option<LoadedManifest>, CompileError> {
    match find_manifest(start_dir) {
        Some(path) => Ok(Some(LoadedManifest { manifest: load(&path)?, path })),
        None => Ok(None),
    }
}
