pub mod ast;

use serde::Serialize;

use crate::diagnostics::CompileError;
use crate::lexer::token::Token;
use crate::span::{Span, Spanned};
use ast::*;

/// Which top-level grammar production to parse the input against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StartRule {
    /// A `.go` file: package clause, imports, then top-level statements.
    FullFile,
    /// A `.gos` file: same grammar, rendered for the embedded (script) host.
    EmbeddedFile,
    /// A bare statement sequence with no package clause or imports.
    SingleExpression,
}

impl StartRule {
    pub const ALL: [StartRule; 3] = [StartRule::FullFile, StartRule::EmbeddedFile, StartRule::SingleExpression];

    pub fn for_path(path: &str) -> Self {
        if path.ends_with(".gos") { StartRule::EmbeddedFile } else { StartRule::FullFile }
    }

    pub fn name(self) -> &'static str {
        match self {
            StartRule::FullFile => "full-file",
            StartRule::EmbeddedFile => "embedded-file",
            StartRule::SingleExpression => "single-expression",
        }
    }
}

pub struct Parser<'a> {
    tokens: &'a [Spanned<Token>],
    source: &'a str,
    pos: usize,
    /// Set while parsing the head of `if`/`for`/`switch`, where `{` opens the body
    /// rather than a record literal or block call.
    restrict_brace: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned<Token>], source: &'a str) -> Self {
        Self { tokens, source, pos: 0, restrict_brace: false }
    }

    fn peek(&self) -> Option<&'a Spanned<Token>> {
        let tokens = self.tokens;
        let mut i = self.pos;
        // Skip newlines when peeking
        while i < tokens.len() {
            if matches!(tokens[i].node, Token::Newline) {
                i += 1;
            } else {
                return Some(&tokens[i]);
            }
        }
        None
    }

    fn peek_raw(&self) -> Option<&'a Spanned<Token>> {
        let tokens = self.tokens;
        tokens.get(self.pos)
    }

    fn peek_raw_at(&self, offset: usize) -> Option<&'a Token> {
        let tokens = self.tokens;
        tokens.get(self.pos + offset).map(|t| &t.node)
    }

    fn advance(&mut self) -> Option<&'a Spanned<Token>> {
        let tokens = self.tokens;
        let tok = tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn skip_newlines(&mut self) {
        while self.pos < self.tokens.len() && matches!(self.tokens[self.pos].node, Token::Newline) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while self.pos < self.tokens.len() && matches!(self.tokens[self.pos].node, Token::Newline | Token::Semi) {
            self.pos += 1;
        }
    }

    fn check(&self, expected: &Token) -> bool {
        self.peek().is_some_and(|t| std::mem::discriminant(&t.node) == std::mem::discriminant(expected))
    }

    fn check_raw(&self, expected: &Token) -> bool {
        self.peek_raw().is_some_and(|t| std::mem::discriminant(&t.node) == std::mem::discriminant(expected))
    }

    /// Consume `expected` (skipping newlines first) if it is next.
    fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.skip_newlines();
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<Span, CompileError> {
        self.skip_newlines();
        match self.tokens.get(self.pos) {
            Some(tok) if std::mem::discriminant(&tok.node) == std::mem::discriminant(expected) => {
                self.pos += 1;
                Ok(tok.span)
            }
            _ => Err(self.error_here(format!("'{expected}'"))),
        }
    }

    /// Identifier, label, or escaped identifier, returned as written.
    fn expect_name(&mut self) -> Result<Spanned<String>, CompileError> {
        self.skip_newlines();
        match self.tokens.get(self.pos) {
            Some(tok) if matches!(tok.node, Token::Ident | Token::Label | Token::EscapedIdent) => {
                let name = self.text(tok.span).to_string();
                self.pos += 1;
                Ok(Spanned::new(name, tok.span))
            }
            _ => Err(self.error_here("identifier")),
        }
    }

    fn expect_ident_text(&mut self, word: &str) -> Result<Span, CompileError> {
        self.skip_newlines();
        match self.tokens.get(self.pos) {
            Some(tok) if matches!(tok.node, Token::Ident) && self.text(tok.span) == word => {
                self.pos += 1;
                Ok(tok.span)
            }
            _ => Err(self.error_here(format!("'{word}'"))),
        }
    }

    fn text(&self, span: Span) -> &'a str {
        &self.source[span.start..span.end]
    }

    fn eof_span(&self) -> Span {
        if let Some(last) = self.tokens.last() {
            Span::new(last.span.end, last.span.end)
        } else {
            Span::dummy()
        }
    }

    fn current_start(&self) -> usize {
        self.peek().map(|t| t.span.start).unwrap_or_else(|| self.eof_span().start)
    }

    fn prev_end(&self) -> usize {
        if self.pos == 0 { 0 } else { self.tokens[self.pos - 1].span.end }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end().max(start))
    }

    fn describe(&self, tok: &Spanned<Token>) -> String {
        match tok.node {
            Token::Ident | Token::Label | Token::EscapedIdent | Token::DollarArg => {
                format!("'{}'", self.text(tok.span))
            }
            Token::Newline => "newline".to_string(),
            _ => format!("'{}'", tok.node),
        }
    }

    fn error_here(&self, expected: impl Into<String>) -> CompileError {
        match self.peek() {
            Some(tok) => CompileError::syntax(expected, self.describe(tok), tok.span),
            None => CompileError::syntax(expected, "end of file", self.eof_span()),
        }
    }

    // ── Compilation unit ─────────────────────────────────────────────

    pub fn parse_file(&mut self, rule: StartRule) -> Result<SourceFile, CompileError> {
        let mut file = SourceFile {
            package: None,
            imports: Vec::new(),
            type_imports: Vec::new(),
            excludes: Vec::new(),
            body: Vec::new(),
        };
        self.skip_separators();

        if rule != StartRule::SingleExpression {
            file.package = Some(self.parse_package()?);
            loop {
                self.skip_separators();
                match self.peek_raw().map(|t| &t.node) {
                    Some(Token::Import) => self.parse_import(&mut file)?,
                    Some(Token::Exclude) => self.parse_exclude(&mut file)?,
                    _ => break,
                }
            }
        }

        file.body = self.parse_stmt_list(|_| false)?;
        if let Some(tok) = self.peek() {
            return Err(CompileError::syntax("statement", self.describe(tok), tok.span));
        }
        Ok(file)
    }

    fn parse_package(&mut self) -> Result<Spanned<Vec<String>>, CompileError> {
        let start = self.expect(&Token::Package)?.start;
        let mut segments = vec![self.expect_name()?.node];
        while matches!(self.peek_raw_at(0), Some(Token::Slash | Token::Dot)) {
            self.advance();
            segments.push(self.expect_name()?.node);
        }
        Ok(Spanned::new(segments, self.span_from(start)))
    }

    fn parse_import(&mut self, file: &mut SourceFile) -> Result<(), CompileError> {
        self.expect(&Token::Import)?;
        let types = self.eat(&Token::Type);
        if self.eat(&Token::LParen) {
            loop {
                self.skip_separators();
                if self.eat(&Token::RParen) {
                    break;
                }
                if types {
                    file.type_imports.push(self.parse_type_import()?);
                } else {
                    file.imports.push(self.parse_import_spec()?);
                }
            }
        } else if types {
            file.type_imports.push(self.parse_type_import()?);
        } else {
            file.imports.push(self.parse_import_spec()?);
        }
        Ok(())
    }

    fn parse_import_spec(&mut self) -> Result<Spanned<ImportSpec>, CompileError> {
        let start = self.current_start();
        let kind = if self.check(&Token::Ident) {
            let alias = self.expect_name()?;
            if alias.node == "_" { ImportKind::SideEffect } else { ImportKind::Aliased(alias.node) }
        } else {
            ImportKind::Default
        };
        self.skip_newlines();
        let path = match self.peek_raw() {
            Some(Spanned { node: Token::StringLit(s), .. }) => s.clone(),
            _ => return Err(self.error_here("import path string")),
        };
        self.advance();
        let path = path.split(['/', '.']).filter(|s| !s.is_empty()).map(str::to_string).collect();
        Ok(Spanned::new(ImportSpec { path, kind }, self.span_from(start)))
    }

    fn parse_type_import(&mut self) -> Result<Spanned<TypeImport>, CompileError> {
        let start = self.current_start();
        let mut segments = vec![self.expect_name()?];
        let mut names = Vec::new();
        while self.check_raw(&Token::Dot) {
            self.advance();
            if self.eat(&Token::LBrace) {
                loop {
                    self.skip_newlines();
                    if self.eat(&Token::RBrace) {
                        break;
                    }
                    names.push(self.expect_name()?);
                    if !self.eat(&Token::Comma) {
                        self.expect(&Token::RBrace)?;
                        break;
                    }
                }
                break;
            }
            segments.push(self.expect_name()?);
        }
        if names.is_empty() {
            match segments.pop() {
                Some(last) if !segments.is_empty() => names.push(last),
                _ => return Err(CompileError::syntax("qualified type name", "bare name", self.span_from(start))),
            }
        }
        let package = segments.into_iter().map(|s| s.node).collect();
        Ok(Spanned::new(TypeImport { package, names }, self.span_from(start)))
    }

    fn parse_exclude(&mut self, file: &mut SourceFile) -> Result<(), CompileError> {
        self.expect(&Token::Exclude)?;
        let grouped = self.eat(&Token::LParen);
        loop {
            self.skip_newlines();
            if grouped && self.eat(&Token::RParen) {
                break;
            }
            let Some(tok) = self.advance() else {
                return Err(self.error_here("excluded name"));
            };
            file.excludes.push(Spanned::new(self.text(tok.span).to_string(), tok.span));
            if !grouped {
                break;
            }
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen)?;
                break;
            }
        }
        Ok(())
    }

    // ── Statements ───────────────────────────────────────────────────

    fn parse_stmt_list(&mut self, stop: fn(&Token) -> bool) -> Result<Block, CompileError> {
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            match self.peek_raw() {
                None => break,
                Some(tok) if matches!(tok.node, Token::RBrace) || stop(&tok.node) => break,
                _ => stmts.push(self.parse_stmt()?),
            }
            // Two statements on one line need a `;` between them.
            match self.peek_raw() {
                None => {}
                Some(tok) if matches!(tok.node, Token::Newline | Token::Semi | Token::RBrace) || stop(&tok.node) => {}
                Some(_) => return Err(self.error_here("newline or ';'")),
            }
        }
        Ok(stmts)
    }

    fn parse_block(&mut self) -> Result<Block, CompileError> {
        self.expect(&Token::LBrace)?;
        let saved = self.restrict_brace;
        self.restrict_brace = false;
        let body = self.parse_stmt_list(|_| false);
        self.restrict_brace = saved;
        let body = body?;
        self.expect(&Token::RBrace)?;
        Ok(body)
    }

    fn parse_stmt(&mut self) -> Result<Spanned<Stmt>, CompileError> {
        self.skip_newlines();
        let start = self.current_start();
        let Some(tok) = self.peek() else {
            return Err(self.error_here("statement"));
        };
        let stmt = match tok.node {
            Token::Var => Stmt::Var(self.parse_var()?),
            Token::Const => self.parse_const()?,
            Token::Type => self.parse_type_decl()?,
            Token::Implements => Stmt::Implements(self.parse_implements()?),
            Token::Func if self.func_decl_ahead() => Stmt::Func(self.parse_func_decl()?),
            Token::LBracket | Token::LBrace if self.destructure_ahead() => Stmt::Let(self.parse_short_bindings()?),
            Token::Ident | Token::EscapedIdent if self.short_var_ahead() => Stmt::Let(self.parse_short_bindings()?),
            _ => Stmt::Expr(self.parse_expr()?.node),
        };
        Ok(Spanned::new(stmt, self.span_from(start)))
    }

    fn func_decl_ahead(&self) -> bool {
        !matches!(self.peek_raw_at(1), Some(Token::LParen | Token::LBrace) | None)
    }

    /// `a := ...` or `a, b := ...`
    fn short_var_ahead(&self) -> bool {
        let mut i = self.pos;
        loop {
            match self.tokens.get(i).map(|t| &t.node) {
                Some(Token::Ident | Token::EscapedIdent) => i += 1,
                _ => return false,
            }
            match self.tokens.get(i).map(|t| &t.node) {
                Some(Token::Comma) => i += 1,
                Some(Token::ColonEq) => return true,
                _ => return false,
            }
        }
    }

    /// `[a, b] := ...` or `{a: A} := ...`
    fn destructure_ahead(&self) -> bool {
        match self.matching_close(self.pos) {
            Some(close) => matches!(self.tokens.get(close + 1).map(|t| &t.node), Some(Token::ColonEq)),
            None => false,
        }
    }

    /// Index of the bracket closing the one at `open`.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, tok) in self.tokens.iter().enumerate().skip(open) {
            match tok.node {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// A `{` opens a dict when a `:` appears directly inside it.
    fn dict_ahead(&self) -> bool {
        let mut depth = 0usize;
        for tok in &self.tokens[self.pos..] {
            match tok.node {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return false;
                    }
                }
                Token::Colon if depth == 1 => return true,
                _ => {}
            }
        }
        false
    }

    fn parse_short_bindings(&mut self) -> Result<Vec<Binding>, CompileError> {
        let start = self.current_start();
        let mut patterns = vec![self.parse_pattern()?];
        while self.eat(&Token::Comma) {
            patterns.push(self.parse_pattern()?);
        }
        self.expect(&Token::ColonEq)?;
        let mut values = vec![self.parse_expr()?];
        while self.check_raw(&Token::Comma) {
            self.advance();
            values.push(self.parse_expr()?);
        }
        if patterns.len() != values.len() {
            return Err(CompileError::syntax(
                format!("{} values", patterns.len()),
                format!("{} values", values.len()),
                self.span_from(start),
            ));
        }
        Ok(patterns
            .into_iter()
            .zip(values)
            .map(|(pattern, value)| Binding { pattern, ty: None, value })
            .collect())
    }

    fn parse_pattern(&mut self) -> Result<Spanned<Pattern>, CompileError> {
        self.skip_newlines();
        let start = self.current_start();
        let pattern = if self.eat(&Token::LBracket) {
            let mut items = Vec::new();
            let mut rest = None;
            let mut whole = None;
            loop {
                self.skip_newlines();
                if self.eat(&Token::RBracket) {
                    break;
                }
                if self.check(&Token::Label) && self.peek().is_some_and(|t| self.text(t.span) == "AS") {
                    self.skip_newlines();
                    self.advance();
                    self.eat(&Token::Comma);
                    whole = Some(self.expect_name()?);
                } else {
                    let item = self.parse_pattern()?;
                    if self.eat(&Token::Ellipsis) {
                        rest = Some(Box::new(item));
                    } else {
                        items.push(item);
                    }
                }
                if !self.eat(&Token::Comma) {
                    self.expect(&Token::RBracket)?;
                    break;
                }
            }
            Pattern::Vector { items, rest, whole }
        } else if self.eat(&Token::LBrace) {
            let mut entries = Vec::new();
            loop {
                self.skip_newlines();
                if self.eat(&Token::RBrace) {
                    break;
                }
                let inner = self.parse_pattern()?;
                self.expect(&Token::Colon)?;
                let key = self.expect_name()?;
                entries.push((inner, key));
                if !self.eat(&Token::Comma) {
                    self.expect(&Token::RBrace)?;
                    break;
                }
            }
            Pattern::Map(entries)
        } else {
            Pattern::Name(self.expect_name()?.node)
        };
        Ok(Spanned::new(pattern, self.span_from(start)))
    }

    fn parse_var(&mut self) -> Result<Vec<VarDecl>, CompileError> {
        self.expect(&Token::Var)?;
        if self.eat(&Token::LParen) {
            let mut decls = Vec::new();
            loop {
                self.skip_separators();
                if self.eat(&Token::RParen) {
                    return Ok(decls);
                }
                decls.extend(self.parse_var_spec()?);
            }
        }
        self.parse_var_spec()
    }

    fn parse_var_spec(&mut self) -> Result<Vec<VarDecl>, CompileError> {
        let start = self.current_start();
        let mut names = vec![self.expect_name()?];
        while self.eat(&Token::Comma) {
            names.push(self.expect_name()?);
        }
        let ty = if self.check(&Token::Eq) { None } else { Some(self.parse_type()?) };
        self.expect(&Token::Eq)?;
        let mut values = vec![self.parse_expr()?];
        while self.check_raw(&Token::Comma) {
            self.advance();
            values.push(self.parse_expr()?);
        }
        if names.len() != values.len() {
            return Err(CompileError::syntax(
                format!("{} values", names.len()),
                format!("{} values", values.len()),
                self.span_from(start),
            ));
        }
        Ok(names
            .into_iter()
            .zip(values)
            .map(|(name, value)| VarDecl { name, ty: ty.clone(), value })
            .collect())
    }

    /// `const a = 1`, `const ( a = 1; b = 2 )`, or `const ( ... ) { body }`.
    fn parse_const(&mut self) -> Result<Stmt, CompileError> {
        self.expect(&Token::Const)?;
        if !self.eat(&Token::LParen) {
            return Ok(Stmt::Let(vec![self.parse_const_binding()?]));
        }
        let mut bindings = Vec::new();
        loop {
            self.skip_separators();
            if self.eat(&Token::RParen) {
                break;
            }
            bindings.push(self.parse_const_binding()?);
            if self.check_raw(&Token::Comma) {
                self.advance();
            }
        }
        if self.check_raw(&Token::LBrace) {
            let body = self.parse_block()?;
            return Ok(Stmt::Expr(Expr::Scoped { bindings, body }));
        }
        Ok(Stmt::Let(bindings))
    }

    fn parse_const_binding(&mut self) -> Result<Binding, CompileError> {
        let pattern = self.parse_pattern()?;
        let ty = if self.check(&Token::Eq) { None } else { Some(self.parse_type()?) };
        self.expect(&Token::Eq)?;
        let value = self.parse_expr()?;
        Ok(Binding { pattern, ty, value })
    }

    fn parse_type(&mut self) -> Result<Spanned<TypeRef>, CompileError> {
        self.skip_newlines();
        let start = self.current_start();
        // pointer markers carry no meaning in the target
        while self.eat(&Token::Star) {}
        let ty = if self.eat(&Token::LBracket) {
            self.expect(&Token::RBracket)?;
            TypeRef::Slice(Box::new(self.parse_type()?.node))
        } else if self.eat(&Token::Chan) {
            if matches!(self.peek_raw_at(0), Some(Token::Ident | Token::Label | Token::LBracket)) {
                TypeRef::Chan(Some(Box::new(self.parse_type()?.node)))
            } else {
                TypeRef::Chan(None)
            }
        } else {
            TypeRef::Named(self.parse_dotted_name()?.node)
        };
        Ok(Spanned::new(ty, self.span_from(start)))
    }

    /// `Foo` or `java.io.File`
    fn parse_dotted_name(&mut self) -> Result<Spanned<String>, CompileError> {
        let first = self.expect_name()?;
        let mut name = first.node;
        while self.check_raw(&Token::Dot) && matches!(self.peek_raw_at(1), Some(Token::Ident | Token::Label)) {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_name()?.node);
        }
        Ok(Spanned::new(name, self.span_from(first.span.start)))
    }

    fn parse_type_decl(&mut self) -> Result<Stmt, CompileError> {
        self.expect(&Token::Type)?;
        let name = self.expect_name()?;
        if self.eat(&Token::Interface) {
            self.expect(&Token::LBrace)?;
            let mut methods = Vec::new();
            loop {
                self.skip_separators();
                if self.eat(&Token::RBrace) {
                    break;
                }
                let method = self.expect_name()?;
                let params = self.parse_params()?;
                let ret = if matches!(self.peek_raw_at(0), Some(Token::Newline | Token::Semi | Token::RBrace) | None) {
                    None
                } else {
                    Some(self.parse_type()?)
                };
                methods.push(MethodSig { name: method, params, ret });
            }
            return Ok(Stmt::Interface(InterfaceDecl { name, methods }));
        }
        if self.eat(&Token::Struct) {
            self.expect(&Token::LBrace)?;
            let mut fields = Vec::new();
            loop {
                self.skip_separators();
                if self.eat(&Token::RBrace) {
                    break;
                }
                let mut names = vec![self.expect_name()?];
                while self.check_raw(&Token::Comma) {
                    self.advance();
                    names.push(self.expect_name()?);
                }
                let ty = if matches!(self.peek_raw_at(0), Some(Token::Newline | Token::Semi | Token::RBrace) | None) {
                    None
                } else {
                    Some(self.parse_type()?)
                };
                fields.extend(names.into_iter().map(|name| Field { name, ty: ty.clone() }));
            }
            return Ok(Stmt::Struct(StructDecl { name, fields }));
        }
        Err(self.error_here("'interface' or 'struct'"))
    }

    /// `(a, b int, c FooType, rest...)`: a type hints only the name it follows,
    /// so `a` stays untyped.
    fn parse_params(&mut self) -> Result<Params, CompileError> {
        self.expect(&Token::LParen)?;
        let mut entries: Vec<(Param, bool)> = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&Token::RParen) {
                break;
            }
            let pattern = self.parse_pattern()?;
            let variadic = self.eat(&Token::Ellipsis);
            let ty = if self.check(&Token::Comma) || self.check(&Token::RParen) {
                None
            } else {
                Some(self.parse_type()?)
            };
            entries.push((Param { pattern, ty }, variadic));
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen)?;
                break;
            }
        }

        let mut params = Params::default();
        let count = entries.len();
        for (i, (param, variadic)) in entries.into_iter().enumerate() {
            if variadic {
                if i + 1 != count {
                    return Err(CompileError::syntax(
                        "variadic parameter last",
                        "parameter after '...'",
                        param.pattern.span,
                    ));
                }
                params.variadic = Some(param);
            } else {
                params.fixed.push(param);
            }
        }
        Ok(params)
    }

    fn parse_func_part(&mut self) -> Result<FuncPart, CompileError> {
        let params = self.parse_params()?;
        if self.check(&Token::LBrace) {
            let body = self.parse_block()?;
            return Ok(FuncPart::Untyped { params, body });
        }
        let ret = self.parse_type()?;
        let body = self.parse_block()?;
        Ok(FuncPart::Typed { params, ret, body })
    }

    /// One or more arities: `(a) {b}(c, d) {e}`.
    fn parse_func_parts(&mut self) -> Result<Vec<FuncPart>, CompileError> {
        let mut parts = vec![self.parse_func_part()?];
        while self.check_raw(&Token::LParen) {
            parts.push(self.parse_func_part()?);
        }
        Ok(parts)
    }

    fn parse_func_decl(&mut self) -> Result<FuncDecl, CompileError> {
        self.expect(&Token::Func)?;
        self.skip_newlines();
        let name = match self.peek_raw() {
            Some(tok) if is_operator_name(&tok.node) => {
                let name = Spanned::new(self.text(tok.span).to_string(), tok.span);
                self.advance();
                name
            }
            _ => self.expect_name()?,
        };
        let parts = self.parse_func_parts()?;
        Ok(FuncDecl { name, parts })
    }

    fn parse_implements(&mut self) -> Result<ImplementsDecl, CompileError> {
        self.expect(&Token::Implements)?;
        let protocol = self.parse_dotted_name()?;
        self.expect(&Token::Func)?;
        self.expect(&Token::LParen)?;
        let target = self.parse_dotted_name()?;
        self.expect(&Token::RParen)?;

        let mut methods = Vec::new();
        if self.eat(&Token::LParen) {
            loop {
                self.skip_separators();
                if self.eat(&Token::RParen) {
                    break;
                }
                let name = self.expect_name()?;
                let part = self.parse_func_part()?;
                methods.push(MethodImpl { name, part });
            }
        } else {
            let name = self.expect_name()?;
            let part = self.parse_func_part()?;
            methods.push(MethodImpl { name, part });
        }
        Ok(ImplementsDecl { protocol, target, methods })
    }

    // ── Expressions ──────────────────────────────────────────────────

    pub fn parse_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.skip_newlines();
        let start = self.current_start();
        let mut lhs = self.parse_binary(1)?;

        // `a f b`: an identifier between two operands on one line calls it
        while self.infix_call_ahead() {
            let func = self.parse_name_ref()?;
            let rhs = self.parse_binary(1)?;
            lhs = Spanned::new(
                Expr::InfixCall { func: Box::new(func), lhs: Box::new(lhs), rhs: Box::new(rhs) },
                self.span_from(start),
            );
        }

        let Some(tok) = self.peek_raw() else { return Ok(lhs) };
        let expr = match tok.node {
            Token::LArrow | Token::LColon => {
                let family = if matches!(tok.node, Token::LArrow) { ChanFamily::Blocking } else { ChanFamily::Cooperative };
                self.advance();
                let value = self.parse_expr()?;
                Expr::Send { family, chan: Box::new(lhs), value: Box::new(value) }
            }
            Token::PlusEq => {
                self.advance();
                let entries = self.parse_update_entries()?;
                Expr::Assoc { target: Box::new(lhs), entries }
            }
            Token::MinusEq => {
                self.advance();
                let keys = self.parse_dissoc_keys()?;
                Expr::Dissoc { target: Box::new(lhs), keys }
            }
            _ => return Ok(lhs),
        };
        Ok(Spanned::new(expr, self.span_from(start)))
    }

    fn infix_call_ahead(&self) -> bool {
        if !matches!(self.peek_raw_at(0), Some(Token::Ident | Token::EscapedIdent)) {
            return false;
        }
        // skip over a qualified `pkg.name`
        let mut i = 1;
        while matches!(self.peek_raw_at(i), Some(Token::Dot)) && matches!(self.peek_raw_at(i + 1), Some(Token::Ident)) {
            i += 2;
        }
        self.peek_raw_at(i).is_some_and(starts_operand)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_start();
        let mut lhs = self.parse_unary()?;
        loop {
            let Some(op) = self.peek_raw().and_then(|t| binary_op(&t.node)) else { break };
            if op.precedence() < min_prec {
                break;
            }
            self.advance();
            self.skip_newlines();
            let rhs = self.parse_binary(op.precedence() + 1)?;
            lhs = Spanned::new(Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, self.span_from(start));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.skip_newlines();
        let start = self.current_start();
        let op = match self.peek_raw().map(|t| &t.node) {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Bang) => UnaryOp::Not,
            Some(Token::Caret) => UnaryOp::BitNot,
            Some(Token::Star) => UnaryOp::Deref,
            Some(Token::LArrow | Token::LColon) => {
                let family = if self.check_raw(&Token::LArrow) { ChanFamily::Blocking } else { ChanFamily::Cooperative };
                self.advance();
                let chan = self.parse_unary()?;
                return Ok(Spanned::new(Expr::Receive { family, chan: Box::new(chan) }, self.span_from(start)));
            }
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Spanned::new(Expr::Unary { op, operand: Box::new(operand) }, self.span_from(start)))
    }

    fn parse_postfix(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_start();
        let mut expr = self.parse_primary()?;
        loop {
            let Some(tok) = self.peek_raw() else { break };
            let next = match tok.node {
                Token::LParen => {
                    let (args, rest) = self.parse_call_args()?;
                    match rest {
                        Some(rest) => Expr::SpreadCall { func: Box::new(expr), args, rest: Box::new(rest) },
                        None => Expr::Call { func: Box::new(expr), args },
                    }
                }
                Token::LBracket => self.parse_index(expr)?,
                Token::Arrow => {
                    self.advance();
                    let member = self.expect_name()?.node;
                    if self.check_raw(&Token::LParen) {
                        let (args, rest) = self.parse_call_args()?;
                        if let Some(rest) = rest {
                            return Err(CompileError::syntax("method argument", "'...'", rest.span));
                        }
                        Expr::MethodCall { target: Box::new(expr), method: member, args }
                    } else {
                        Expr::Field { target: Box::new(expr), member }
                    }
                }
                Token::LBrace if !self.restrict_brace => match &expr.node {
                    Expr::Name(name) if name.chars().next().is_some_and(char::is_uppercase) => {
                        let ty = Spanned::new(name.clone(), expr.span);
                        let fields = self.parse_expr_list(&Token::LBrace, &Token::RBrace)?;
                        Expr::Record { ty, fields }
                    }
                    Expr::Name(name) if name.chars().next().is_some_and(char::is_lowercase) => {
                        let name = Spanned::new(name.clone(), expr.span);
                        let body = self.parse_block()?;
                        Expr::BlockCall { name, body }
                    }
                    _ => break,
                },
                _ => break,
            };
            expr = Spanned::new(next, self.span_from(start));
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> Result<(Vec<Spanned<Expr>>, Option<Spanned<Expr>>), CompileError> {
        self.expect(&Token::LParen)?;
        let saved = self.restrict_brace;
        self.restrict_brace = false;
        let mut args = Vec::new();
        let mut rest = None;
        let result = loop {
            self.skip_newlines();
            if self.eat(&Token::RParen) {
                break Ok(());
            }
            if rest.is_some() {
                break Err(self.error_here("')' after spread argument"));
            }
            if self.eat(&Token::Ellipsis) {
                rest = Some(self.parse_expr()?);
            } else {
                let arg = self.parse_expr()?;
                if self.eat(&Token::Ellipsis) {
                    rest = Some(arg);
                } else {
                    args.push(arg);
                }
            }
            if !self.eat(&Token::Comma) {
                break self.expect(&Token::RParen).map(|_| ());
            }
        };
        self.restrict_brace = saved;
        result?;
        Ok((args, rest))
    }

    fn parse_index(&mut self, target: Spanned<Expr>) -> Result<Expr, CompileError> {
        self.expect(&Token::LBracket)?;
        let saved = self.restrict_brace;
        self.restrict_brace = false;
        let target = Box::new(target);
        let expr = if self.eat(&Token::Colon) {
            let to = self.parse_expr()?;
            Expr::SliceTo { target, to: Box::new(to) }
        } else {
            let first = self.parse_expr()?;
            if self.eat(&Token::Colon) {
                if self.check(&Token::RBracket) {
                    Expr::SliceFrom { target, from: Box::new(first) }
                } else {
                    let to = self.parse_expr()?;
                    Expr::SliceRange { target, from: Box::new(first), to: Box::new(to) }
                }
            } else {
                Expr::Index { target, index: Box::new(first) }
            }
        };
        self.restrict_brace = saved;
        self.expect(&Token::RBracket)?;
        Ok(expr)
    }

    /// Comma-separated expressions between `open` and `close`, trailing comma allowed.
    fn parse_expr_list(&mut self, open: &Token, close: &Token) -> Result<Vec<Spanned<Expr>>, CompileError> {
        self.expect(open)?;
        let saved = self.restrict_brace;
        self.restrict_brace = false;
        let mut items = Vec::new();
        let result = loop {
            self.skip_newlines();
            if self.eat(close) {
                break Ok(());
            }
            match self.parse_expr() {
                Ok(item) => items.push(item),
                Err(e) => break Err(e),
            }
            if !self.eat(&Token::Comma) {
                break self.expect(close).map(|_| ());
            }
        };
        self.restrict_brace = saved;
        result?;
        Ok(items)
    }

    /// `Name`, `pkg.member`, or `Class::member`.
    fn parse_name_ref(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let first = self.expect_name()?;
        let start = first.span.start;
        let mut segments = vec![first];
        while self.check_raw(&Token::Dot) && matches!(self.peek_raw_at(1), Some(Token::Ident | Token::Label)) {
            self.advance();
            segments.push(self.expect_name()?);
        }
        let expr = if self.check_raw(&Token::ColonColon) {
            self.advance();
            let member = self.expect_name()?.node;
            let class_name = segments.iter().map(|s| s.node.as_str()).collect::<Vec<_>>().join(".");
            Expr::Static { class: Spanned::new(class_name, self.span_from(start)), member }
        } else if segments.len() == 1 {
            Expr::Name(segments.remove(0).node)
        } else {
            let package = segments.remove(0);
            let member = segments.iter().map(|s| s.node.as_str()).collect::<Vec<_>>().join(".");
            Expr::Qualified { package, member }
        };
        Ok(Spanned::new(expr, self.span_from(start)))
    }

    fn parse_primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.skip_newlines();
        let Some(tok) = self.peek_raw().cloned() else {
            return Err(self.error_here("expression"));
        };
        let start = tok.span.start;
        let simple = match &tok.node {
            Token::IntLit(n) => Some(Expr::Int(n.clone())),
            Token::FloatLit(n) => Some(Expr::Float(n.clone())),
            Token::StringLit(s) => Some(Expr::Str(s.clone())),
            Token::RawStringLit(s) => Some(Expr::RawStr(s.clone())),
            Token::CharLit(c) => Some(Expr::Char(c.clone())),
            Token::RegexLit(r) => Some(Expr::Regex(r.clone())),
            Token::DollarArg | Token::DollarRest => Some(Expr::ArgRef(self.text(tok.span).to_string())),
            Token::FatArrow => Some(Expr::Name("=>".to_string())),
            Token::EscapedIdent => Some(Expr::Name(self.text(tok.span).to_string())),
            _ => None,
        };
        if let Some(expr) = simple {
            self.advance();
            return Ok(Spanned::new(expr, tok.span));
        }

        let expr = match tok.node {
            Token::Ident if self.text(tok.span) == "set" && matches!(self.peek_raw_at(1), Some(Token::LBrace)) => {
                self.advance();
                Expr::Set(self.parse_expr_list(&Token::LBrace, &Token::RBrace)?)
            }
            Token::Ident
                if self.text(tok.span) == "make"
                    && matches!(self.peek_raw_at(1), Some(Token::LParen))
                    && matches!(self.peek_raw_at(2), Some(Token::Chan)) =>
            {
                self.parse_make_chan()?
            }
            Token::Ident | Token::Label => return self.parse_name_ref(),
            Token::LParen => {
                self.advance();
                let saved = self.restrict_brace;
                self.restrict_brace = false;
                let inner = self.parse_expr();
                self.restrict_brace = saved;
                let inner = inner?;
                self.expect(&Token::RParen)?;
                inner.node
            }
            Token::LBracket => self.parse_vector()?,
            Token::LBrace => {
                if matches!(self.peek_raw_at(1), Some(Token::RBrace)) {
                    self.advance();
                    self.advance();
                    Expr::Dict(Vec::new())
                } else if self.dict_ahead() {
                    self.parse_dict()?
                } else {
                    Expr::Block(self.parse_block()?)
                }
            }
            Token::Func => {
                self.advance();
                if self.check_raw(&Token::LBrace) {
                    Expr::ShortFunc(self.parse_block()?)
                } else {
                    Expr::Func(self.parse_func_parts()?)
                }
            }
            Token::If => self.parse_if()?,
            Token::For => self.parse_for()?,
            Token::Switch => self.parse_switch()?,
            Token::Select => self.parse_select()?,
            Token::Try => self.parse_try()?,
            Token::Loop => self.parse_loop()?,
            Token::Go => {
                self.advance();
                let body = if self.check_raw(&Token::LBrace) {
                    let block_start = self.current_start();
                    let block = self.parse_block()?;
                    Spanned::new(Expr::Block(block), self.span_from(block_start))
                } else {
                    self.parse_unary()?
                };
                Expr::Go(Box::new(body))
            }
            Token::New => {
                self.advance();
                let class = self.parse_dotted_name()?;
                let args = self.parse_expr_list(&Token::LParen, &Token::RParen)?;
                Expr::New { class, args }
            }
            Token::Quote | Token::Syntax | Token::Unquote | Token::Unquotes => {
                self.advance();
                let operand = Box::new(self.parse_unary()?);
                match tok.node {
                    Token::Quote => Expr::Quote(operand),
                    Token::Syntax => Expr::SyntaxQuote(operand),
                    Token::Unquote => Expr::Unquote(operand),
                    _ => Expr::UnquoteSplicing(operand),
                }
            }
            _ => return Err(self.error_here("expression")),
        };
        Ok(Spanned::new(expr, self.span_from(start)))
    }

    fn parse_make_chan(&mut self) -> Result<Expr, CompileError> {
        self.advance();
        self.expect(&Token::LParen)?;
        self.expect(&Token::Chan)?;
        if !self.check(&Token::Comma) && !self.check(&Token::RParen) {
            self.parse_type()?;
        }
        let capacity = if self.eat(&Token::Comma) { Some(Box::new(self.parse_expr()?)) } else { None };
        self.expect(&Token::RParen)?;
        Ok(Expr::MakeChan { capacity })
    }

    /// `[a, b]` or `[]T{a, b}`
    fn parse_vector(&mut self) -> Result<Expr, CompileError> {
        if matches!(self.peek_raw_at(1), Some(Token::RBracket)) {
            self.advance();
            self.advance();
            if matches!(self.peek_raw_at(0), Some(Token::Ident | Token::Label | Token::LBracket | Token::Star)) {
                self.parse_type()?;
                return Ok(Expr::Vector(self.parse_expr_list(&Token::LBrace, &Token::RBrace)?));
            }
            return Ok(Expr::Vector(Vec::new()));
        }
        Ok(Expr::Vector(self.parse_expr_list(&Token::LBracket, &Token::RBracket)?))
    }

    fn parse_dict(&mut self) -> Result<Expr, CompileError> {
        self.expect(&Token::LBrace)?;
        let saved = self.restrict_brace;
        self.restrict_brace = false;
        let mut entries = Vec::new();
        let result = loop {
            self.skip_newlines();
            if self.eat(&Token::RBrace) {
                break Ok(());
            }
            let entry = self.parse_expr().and_then(|key| {
                self.expect(&Token::Colon)?;
                Ok((key, self.parse_expr()?))
            });
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => break Err(e),
            }
            if !self.eat(&Token::Comma) {
                break self.expect(&Token::RBrace).map(|_| ());
            }
        };
        self.restrict_brace = saved;
        result?;
        Ok(Expr::Dict(entries))
    }

    /// `{K: v, 4 K2: w}`: several keys before the colon name a nested path.
    fn parse_update_entries(&mut self) -> Result<Vec<UpdateEntry>, CompileError> {
        self.expect(&Token::LBrace)?;
        let mut entries = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&Token::RBrace) {
                break;
            }
            let mut path = Vec::new();
            while !self.check(&Token::Colon) {
                path.push(self.parse_unary()?);
            }
            self.expect(&Token::Colon)?;
            let value = self.parse_expr()?;
            entries.push(UpdateEntry { path, value });
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RBrace)?;
                break;
            }
        }
        Ok(entries)
    }

    /// `{K1, K2}`; a `: value` after a key is accepted and ignored.
    fn parse_dissoc_keys(&mut self) -> Result<Vec<Spanned<Expr>>, CompileError> {
        self.expect(&Token::LBrace)?;
        let mut keys = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&Token::RBrace) {
                break;
            }
            keys.push(self.parse_unary()?);
            if self.eat(&Token::Colon) {
                self.parse_expr()?;
            }
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RBrace)?;
                break;
            }
        }
        Ok(keys)
    }

    // ── Control forms ────────────────────────────────────────────────

    /// Parse `f` with `{` reserved for the body that follows.
    fn restricted<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, CompileError>) -> Result<T, CompileError> {
        let saved = self.restrict_brace;
        self.restrict_brace = true;
        let result = f(self);
        self.restrict_brace = saved;
        result
    }

    /// Optional `a := b;` before an `if` or `switch` head.
    fn parse_head_bindings(&mut self) -> Result<Option<Vec<Binding>>, CompileError> {
        if !self.short_var_ahead() {
            return Ok(None);
        }
        let bindings = self.restricted(Self::parse_short_bindings)?;
        self.expect(&Token::Semi)?;
        Ok(Some(bindings))
    }

    fn parse_if(&mut self) -> Result<Expr, CompileError> {
        let start = self.expect(&Token::If)?.start;
        self.skip_newlines();
        let init = self.parse_head_bindings()?;
        let cond = Box::new(self.restricted(Self::parse_expr)?);
        let then = self.parse_block()?;

        let expr = if self.check(&Token::Else) {
            self.skip_newlines();
            self.advance();
            let else_start = self.current_start();
            let otherwise = if self.check(&Token::If) {
                self.parse_if()?
            } else {
                Expr::Block(self.parse_block()?)
            };
            Expr::IfElse { cond, then, otherwise: Box::new(Spanned::new(otherwise, self.span_from(else_start))) }
        } else {
            Expr::If { cond, then }
        };

        Ok(match init {
            Some(bindings) => Expr::Scoped { bindings, body: vec![Spanned::new(Stmt::Expr(expr), self.span_from(start))] },
            None => expr,
        })
    }

    fn parse_for(&mut self) -> Result<Expr, CompileError> {
        let start = self.expect(&Token::For)?.start;
        let pattern = self.parse_pattern()?;
        self.expect(&Token::ColonEq)?;

        if self.eat(&Token::Range) {
            let seq = Box::new(self.restricted(Self::parse_expr)?);
            let body = self.parse_block()?;
            return Ok(Expr::ForRange { pattern, seq, body });
        }
        let word = match self.peek() {
            Some(tok) if matches!(tok.node, Token::Ident) => self.text(tok.span),
            _ => "",
        };
        match word {
            "lazy" => {
                self.expect_ident_text("lazy")?;
                let seq = Box::new(self.restricted(Self::parse_expr)?);
                if self.eat(&Token::If) {
                    let guard = Box::new(self.restricted(Self::parse_expr)?);
                    let body = self.parse_block()?;
                    return Ok(Expr::ForLazyWhen { pattern, seq, guard, body });
                }
                let body = self.parse_block()?;
                Ok(Expr::ForLazy { pattern, seq, body })
            }
            "times" => {
                self.expect_ident_text("times")?;
                let Pattern::Name(name) = pattern.node else {
                    return Err(CompileError::syntax("loop counter name", "destructuring pattern", pattern.span));
                };
                let count = Box::new(self.restricted(Self::parse_expr)?);
                let body = self.parse_block()?;
                Ok(Expr::ForTimes { name: Spanned::new(name, pattern.span), count, body })
            }
            _ => self.parse_counted_for(start, pattern),
        }
    }

    /// `for i := 0; i < n; i++ { ... }`. Any other three-clause shape is rejected.
    fn parse_counted_for(&mut self, start: usize, pattern: Spanned<Pattern>) -> Result<Expr, CompileError> {
        const SHAPE: &str = "counted loop 'for i := 0; i < n; i++'";
        let init = self.restricted(Self::parse_expr)?;
        self.expect(&Token::Semi)?;
        let cond = self.restricted(Self::parse_expr)?;
        self.expect(&Token::Semi)?;
        let post = self.expect_name()?;
        self.expect(&Token::PlusPlus)?;
        let head = self.span_from(start);

        let Pattern::Name(counter) = pattern.node else {
            return Err(CompileError::syntax(SHAPE, "destructuring pattern", head));
        };
        if !matches!(&init.node, Expr::Int(n) if n == "0") {
            return Err(CompileError::syntax(SHAPE, "a start value other than 0", init.span));
        }
        let bound = match cond.node {
            Expr::Binary { op: BinOp::Lt, lhs, rhs } if matches!(&lhs.node, Expr::Name(n) if *n == counter) => rhs,
            _ => return Err(CompileError::syntax(SHAPE, "a condition other than 'i < n'", cond.span)),
        };
        match &bound.node {
            Expr::Name(n) if *n != counter => {}
            Expr::Int(_) => {}
            _ => return Err(CompileError::syntax(SHAPE, "a bound that is not a name or number", bound.span)),
        }
        if post.node != counter {
            return Err(CompileError::syntax(SHAPE, format!("'{}++'", post.node), post.span));
        }
        let body = self.parse_block()?;
        Ok(Expr::ForTimes { name: Spanned::new(counter, pattern.span), count: bound, body })
    }

    fn type_switch_ahead(&self) -> bool {
        matches!(self.peek_raw_at(0), Some(Token::Ident))
            && matches!(self.peek_raw_at(1), Some(Token::Dot))
            && matches!(self.peek_raw_at(2), Some(Token::LParen))
            && matches!(self.peek_raw_at(3), Some(Token::Type))
            && matches!(self.peek_raw_at(4), Some(Token::RParen))
    }

    fn parse_switch(&mut self) -> Result<Expr, CompileError> {
        let start = self.expect(&Token::Switch)?.start;
        self.skip_newlines();
        let pre = self.parse_head_bindings()?;
        self.skip_newlines();

        enum Head {
            Cond,
            Value(Spanned<Expr>),
            Type(Spanned<Expr>),
        }
        let head = if self.check_raw(&Token::LBrace) {
            Head::Cond
        } else if self.type_switch_ahead() {
            let subject = self.expect_name()?;
            for _ in 0..4 {
                self.advance();
            }
            Head::Type(Spanned::new(Expr::Name(subject.node), subject.span))
        } else {
            Head::Value(self.restricted(Self::parse_expr)?)
        };

        self.expect(&Token::LBrace)?;
        let mut labels: Vec<(Vec<Spanned<Expr>>, Block)> = Vec::new();
        let mut types: Vec<(Vec<Spanned<String>>, Block)> = Vec::new();
        let mut default = None;
        loop {
            self.skip_separators();
            if self.eat(&Token::RBrace) {
                break;
            }
            if self.eat(&Token::Default) {
                self.expect(&Token::Colon)?;
                default = Some(self.parse_stmt_list(is_clause_start)?);
                continue;
            }
            self.expect(&Token::Case)?;
            if matches!(head, Head::Type(_)) {
                let mut names = vec![self.parse_dotted_name()?];
                while self.eat(&Token::Comma) {
                    names.push(self.parse_dotted_name()?);
                }
                self.expect(&Token::Colon)?;
                types.push((names, self.parse_stmt_list(is_clause_start)?));
            } else {
                let mut exprs = vec![self.parse_expr()?];
                while self.eat(&Token::Comma) {
                    exprs.push(self.parse_expr()?);
                }
                self.expect(&Token::Colon)?;
                labels.push((exprs, self.parse_stmt_list(is_clause_start)?));
            }
        }

        let expr = match head {
            Head::Cond => {
                let mut clauses = Vec::new();
                for (mut exprs, body) in labels {
                    let first = exprs.remove(0);
                    let test = exprs.into_iter().fold(first, |acc, next| {
                        let span = acc.span.to(next.span);
                        Spanned::new(Expr::Binary { op: BinOp::Or, lhs: Box::new(acc), rhs: Box::new(next) }, span)
                    });
                    clauses.push((test, body));
                }
                Expr::Cond { clauses, default }
            }
            Head::Value(subject) => Expr::Case { subject: Box::new(subject), clauses: labels, default },
            Head::Type(subject) => Expr::TypeSwitch { subject: Box::new(subject), clauses: types, default },
        };
        Ok(match pre {
            Some(bindings) => Expr::Scoped { bindings, body: vec![Spanned::new(Stmt::Expr(expr), self.span_from(start))] },
            None => expr,
        })
    }

    fn parse_select(&mut self) -> Result<Expr, CompileError> {
        self.expect(&Token::Select)?;
        self.expect(&Token::LBrace)?;
        let mut family: Option<(ChanFamily, Span)> = None;
        let mut cases = Vec::new();
        let mut default = None;
        loop {
            self.skip_separators();
            if self.eat(&Token::RBrace) {
                break;
            }
            if self.eat(&Token::Default) {
                self.expect(&Token::Colon)?;
                default = Some(self.parse_stmt_list(is_clause_start)?);
                continue;
            }
            self.expect(&Token::Case)?;
            self.skip_newlines();
            let case = if matches!(self.peek_raw_at(0), Some(Token::Ident)) && matches!(self.peek_raw_at(1), Some(Token::Eq)) {
                let binding = self.expect_name()?;
                self.expect(&Token::Eq)?;
                self.expect_chan_op(&mut family)?;
                let chan = self.parse_expr()?;
                self.expect(&Token::Colon)?;
                SelectCase::ReceiveBind { binding, chan, body: self.parse_stmt_list(is_clause_start)? }
            } else if self.check_raw(&Token::LArrow) || self.check_raw(&Token::LColon) {
                self.expect_chan_op(&mut family)?;
                let chan = self.parse_expr()?;
                self.expect(&Token::Colon)?;
                SelectCase::Receive { chan, body: self.parse_stmt_list(is_clause_start)? }
            } else {
                let chan = self.parse_binary(1)?;
                self.expect_chan_op(&mut family)?;
                let value = self.parse_expr()?;
                self.expect(&Token::Colon)?;
                SelectCase::Send { chan, value, body: self.parse_stmt_list(is_clause_start)? }
            };
            cases.push(case);
        }
        Ok(Expr::Select { family: family.map(|(f, _)| f), cases, default })
    }

    /// Consume `<-` or `<:` and check it agrees with the rest of the select.
    fn expect_chan_op(&mut self, family: &mut Option<(ChanFamily, Span)>) -> Result<ChanFamily, CompileError> {
        self.skip_newlines();
        let (found, span) = match self.peek_raw() {
            Some(tok) if matches!(tok.node, Token::LArrow) => (ChanFamily::Blocking, tok.span),
            Some(tok) if matches!(tok.node, Token::LColon) => (ChanFamily::Cooperative, tok.span),
            _ => return Err(self.error_here("'<-' or '<:'")),
        };
        self.advance();
        match family {
            Some((first, _)) if *first != found => {
                let (expected, got) = match first {
                    ChanFamily::Blocking => ("'<-'", "'<:'"),
                    ChanFamily::Cooperative => ("'<:'", "'<-'"),
                };
                Err(CompileError::syntax(format!("{expected} like the other cases of this select"), got, span))
            }
            Some(_) => Ok(found),
            None => {
                *family = Some((found, span));
                Ok(found)
            }
        }
    }

    fn parse_try(&mut self) -> Result<Expr, CompileError> {
        self.expect(&Token::Try)?;
        let body = self.parse_block()?;
        let mut catches = Vec::new();
        while self.eat(&Token::Catch) {
            let ty = self.parse_dotted_name()?;
            let binding = self.expect_name()?;
            let body = self.parse_block()?;
            catches.push(Catch { ty, binding, body });
        }
        let finally = if self.eat(&Token::Finally) { Some(self.parse_block()?) } else { None };
        Ok(Expr::Try { body, catches, finally })
    }

    fn parse_loop(&mut self) -> Result<Expr, CompileError> {
        self.expect(&Token::Loop)?;
        self.expect(&Token::LParen)?;
        let mut bindings = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&Token::RParen) {
                break;
            }
            let name = self.expect_name()?;
            self.expect(&Token::Eq)?;
            bindings.push((name, self.parse_expr()?));
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen)?;
                break;
            }
        }
        let body = self.parse_block()?;
        Ok(Expr::Loop { bindings, body })
    }
}

fn is_clause_start(tok: &Token) -> bool {
    matches!(tok, Token::Case | Token::Default)
}

fn binary_op(tok: &Token) -> Option<BinOp> {
    Some(match tok {
        Token::PipePipe => BinOp::Or,
        Token::AmpAmp => BinOp::And,
        Token::EqEq => BinOp::Eq,
        Token::BangEq => BinOp::Neq,
        Token::Lt => BinOp::Lt,
        Token::LtEq => BinOp::LtEq,
        Token::Gt => BinOp::Gt,
        Token::GtEq => BinOp::GtEq,
        Token::Plus => BinOp::Add,
        Token::Minus => BinOp::Sub,
        Token::Pipe => BinOp::BitOr,
        Token::Caret => BinOp::BitXor,
        Token::Star => BinOp::Mul,
        Token::Slash => BinOp::Div,
        Token::Percent => BinOp::Mod,
        Token::Shl => BinOp::Shl,
        Token::Shr => BinOp::Shr,
        Token::Amp => BinOp::BitAnd,
        Token::AmpCaret => BinOp::BitAndNot,
        _ => return None,
    })
}

/// Tokens that may name a function declared with `func`.
fn is_operator_name(tok: &Token) -> bool {
    binary_op(tok).is_some() || matches!(tok, Token::Bang)
}

/// Tokens that can begin the right operand of an infix call.
fn starts_operand(tok: &Token) -> bool {
    matches!(
        tok,
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
            | Token::FatArrow
            | Token::LParen
            | Token::LBracket
            | Token::Func
            | Token::New
            | Token::Quote
            | Token::Syntax
            | Token::Unquote
            | Token::Unquotes
            | Token::Minus
            | Token::Plus
            | Token::Bang
            | Token::Caret
            | Token::Star
            | Token::LArrow
            | Token::LColon
    )
}
