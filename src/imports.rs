//! Per-file record of declared imports and which of them the generated code
//! actually referenced. The generator owns the table while it renders one
//! file and hands it back; [`ImportTable::validate`] then runs over the result.

use crate::diagnostics::CompileError;
use crate::parser::ast::SourceFile;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct PackageImport {
    /// Name used in source, or `None` for `_ "pkg"` imports.
    pub alias: Option<String>,
    pub path: String,
    pub referenced: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostTypeImport {
    pub package: String,
    pub name: String,
    pub referenced: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    packages: Vec<PackageImport>,
    types: Vec<HostTypeImport>,
    /// Aliases that are always in scope without an import (`js` on the embedded host).
    ambient: Vec<String>,
    /// When set, references to unknown packages are not checked at all.
    open: bool,
}

impl ImportTable {
    pub fn from_file(file: &SourceFile) -> Self {
        let packages = file
            .imports
            .iter()
            .map(|spec| PackageImport {
                alias: spec.node.binding_name().map(str::to_string),
                path: spec.node.full_path(),
                referenced: false,
            })
            .collect();
        let types = file
            .type_imports
            .iter()
            .flat_map(|group| {
                let package = group.node.package.join(".");
                group.node.names.iter().map(move |name| HostTypeImport {
                    package: package.clone(),
                    name: name.node.clone(),
                    referenced: false,
                })
            })
            .collect();
        Self { packages, types, ambient: Vec::new(), open: false }
    }

    /// A table that accepts any package reference. Used when there is no
    /// import context to check against.
    pub fn open() -> Self {
        Self { open: true, ..Self::default() }
    }

    pub fn with_ambient(mut self, alias: &str) -> Self {
        self.ambient.push(alias.to_string());
        self
    }

    pub fn packages(&self) -> &[PackageImport] {
        &self.packages
    }

    pub fn types(&self) -> &[HostTypeImport] {
        &self.types
    }

    /// Record a `pkg.member` reference. Fails immediately when `pkg` was never imported.
    pub fn reference_package(&mut self, alias: &str, member: &str, span: Span) -> Result<(), CompileError> {
        if self.ambient.iter().any(|a| a == alias) {
            return Ok(());
        }
        if let Some(import) = self.packages.iter_mut().find(|p| p.alias.as_deref() == Some(alias)) {
            import.referenced = true;
            return Ok(());
        }
        if self.open {
            return Ok(());
        }
        let known = self.packages.iter().filter_map(|p| p.alias.clone()).collect();
        Err(CompileError::undeclared(alias, format!("{alias}.{member}"), known, span))
    }

    /// Record a use of a host type name. Names that were never imported are
    /// assumed to be in scope by default and are not an error.
    pub fn reference_type(&mut self, name: &str) {
        for import in self.types.iter_mut().filter(|t| t.name == name) {
            import.referenced = true;
        }
    }

    /// Record a use of a package-qualified host type such as `a.b.Foo`, which
    /// counts only for an `import type` of `Foo` from package `a.b`.
    pub fn reference_qualified_type(&mut self, path: &str) {
        let Some((package, name)) = path.rsplit_once('.') else {
            return self.reference_type(path);
        };
        for import in self.types.iter_mut().filter(|t| t.package == package && t.name == name) {
            import.referenced = true;
        }
    }

    /// Unused package aliases first, then unused host types, each batched
    /// over the whole file in declaration order.
    pub fn validate(&self) -> Result<(), CompileError> {
        let unused: Vec<String> = self
            .packages
            .iter()
            .filter(|p| !p.referenced)
            .filter_map(|p| p.alias.clone())
            .collect();
        if !unused.is_empty() {
            return Err(CompileError::UnusedImport { names: unused });
        }
        let unused: Vec<String> = self.types.iter().filter(|t| !t.referenced).map(|t| t.name.clone()).collect();
        if !unused.is_empty() {
            return Err(CompileError::UnusedTypeImport { names: unused });
        }
        Ok(())
    }
}
