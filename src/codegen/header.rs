use std::path::{Component, Path};

use crate::diagnostics::CompileError;
use crate::imports::ImportTable;
use crate::span::Span;

use super::names;

/// Runtime the generated namespace is loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Jvm,
    Embedded,
}

const JVM_ASYNC: &str = "[clojure.core.async :as async :refer [chan go thread <! >! alt! <!! >!! alt!!]]";
const EMBEDDED_ASYNC_MACROS: &str = "(:require-macros [cljs.core.async.macros :as async :refer [go]])";
const EMBEDDED_ASYNC: &str = "[cljs.core.async :as async :refer [chan <! >! alt!]]";

/// Namespace for a source file: its directory segments followed by the
/// package name. A package clause naming several segments is used as-is.
/// Either way the last segment must agree with the file name.
pub fn namespace_for(
    path: &Path,
    package: &[String],
    package_span: Span,
    source_root: Option<&Path>,
) -> Result<String, CompileError> {
    let relative = source_root.and_then(|root| path.strip_prefix(root).ok()).unwrap_or(path);
    let stem = file_stem(relative);
    let last = package.last().map(String::as_str).unwrap_or_default();
    if !stem.is_empty() && last != stem {
        return Err(CompileError::syntax(
            format!("package {stem} to match the file name"),
            format!("package {}", package.join("/")),
            package_span,
        ));
    }
    if package.len() > 1 {
        return Ok(package.join("."));
    }
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    segments.push(last.to_string());
    Ok(segments.join("."))
}

fn file_stem(path: &Path) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    for ext in [".gos", ".go"] {
        if let Some(stem) = name.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    name
}

/// The forms that open a generated file: the namespace declaration and,
/// on the JVM host, the reflection-warning switch.
pub fn render(namespace: &str, host: Host, imports: &ImportTable, excludes: &[String], uses_async: bool) -> Vec<String> {
    let mut ns = format!("(ns {namespace}");
    if host == Host::Jvm {
        ns.push_str(" (:gen-class)");
    }
    if host == Host::Embedded && uses_async {
        ns.push(' ');
        ns.push_str(EMBEDDED_ASYNC_MACROS);
    }

    let mut requires: Vec<String> = imports
        .packages()
        .iter()
        .map(|p| match &p.alias {
            Some(alias) => format!("[{} :as {alias}]", p.path),
            None => format!("[{}]", p.path),
        })
        .collect();
    if uses_async {
        requires.push(match host {
            Host::Jvm => JVM_ASYNC.to_string(),
            Host::Embedded => EMBEDDED_ASYNC.to_string(),
        });
    }
    if !requires.is_empty() {
        ns.push_str(&format!(" (:require {})", requires.join(" ")));
    }

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for ty in imports.types() {
        match groups.iter_mut().find(|(package, _)| *package == ty.package) {
            Some((_, names)) => names.push(ty.name.clone()),
            None => groups.push((ty.package.clone(), vec![ty.name.clone()])),
        }
    }
    if !groups.is_empty() {
        let groups: Vec<String> = groups
            .into_iter()
            .map(|(package, names)| format!("({package} {})", names.join(" ")))
            .collect();
        ns.push_str(&format!(" (:import {})", groups.join(" ")));
    }

    if !excludes.is_empty() {
        let excluded: Vec<String> = excludes.iter().map(|e| names::symbol(e)).collect();
        ns.push_str(&format!(" (:refer-clojure :exclude [{}])", excluded.join(" ")));
    }
    ns.push(')');

    match host {
        Host::Jvm => vec![ns, "(set! *warn-on-reflection* true)".to_string()],
        Host::Embedded => vec![ns],
    }
}
