pub mod header;
pub mod literals;
pub mod names;

use crate::diagnostics::CompileError;
use crate::imports::ImportTable;
use crate::parser::ast::*;
use crate::span::Spanned;

pub use header::Host;

/// What the generated code runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub host: Host,
    /// Lower every channel operation to the lightweight-process forms.
    pub cooperative: bool,
}

/// Output of one generation pass. The import table comes back with its
/// reference flags set, ready for [`ImportTable::validate`].
#[derive(Debug)]
pub struct Generated {
    pub forms: Vec<String>,
    pub imports: ImportTable,
    pub uses_async: bool,
}

pub fn generate(body: &[Spanned<Stmt>], target: Target, imports: ImportTable) -> Result<Generated, CompileError> {
    let mut generator = Generator { target, imports, uses_async: false, arg_refs: 0 };
    let forms = generator.stmts(body)?;
    Ok(Generated { forms, imports: generator.imports, uses_async: generator.uses_async })
}

struct Generator {
    target: Target,
    imports: ImportTable,
    uses_async: bool,
    /// `$n` references seen since entering the innermost `func{...}`.
    arg_refs: usize,
}

fn sexp(parts: Vec<String>) -> String {
    format!("({})", parts.join(" "))
}

impl Generator {
    // ── Statement sequences ─────────────────────────────────────────

    /// Render a statement sequence. A run of bindings opens one `let` whose
    /// body is everything after it.
    fn stmts(&mut self, stmts: &[Spanned<Stmt>]) -> Result<Vec<String>, CompileError> {
        let mut forms = Vec::new();
        let mut i = 0;
        while i < stmts.len() {
            if matches!(stmts[i].node, Stmt::Let(_)) {
                let mut bindings = Vec::new();
                while let Some(Spanned { node: Stmt::Let(run), .. }) = stmts.get(i) {
                    for binding in run {
                        bindings.push(self.binding(binding)?);
                    }
                    i += 1;
                }
                let mut parts = vec!["let".to_string(), format!("[{}]", bindings.join(" "))];
                parts.extend(self.stmts(&stmts[i..])?);
                forms.push(sexp(parts));
                return Ok(forms);
            }
            forms.extend(self.stmt(&stmts[i])?);
            i += 1;
        }
        Ok(forms)
    }

    /// A block used as a single expression.
    fn block(&mut self, block: &Block) -> Result<String, CompileError> {
        let mut forms = self.stmts(block)?;
        Ok(match forms.len() {
            0 => "nil".to_string(),
            1 => forms.remove(0),
            _ => {
                forms.insert(0, "do".to_string());
                sexp(forms)
            }
        })
    }

    /// `head` followed by the block's forms spliced in.
    fn spliced(&mut self, head: Vec<String>, block: &Block) -> Result<String, CompileError> {
        let mut parts = head;
        parts.extend(self.stmts(block)?);
        Ok(sexp(parts))
    }

    fn stmt(&mut self, stmt: &Spanned<Stmt>) -> Result<Vec<String>, CompileError> {
        match &stmt.node {
            Stmt::Expr(e) => Ok(vec![self.expr(e)?]),
            Stmt::Let(_) => Err(CompileError::internal("binding outside a statement sequence")),
            Stmt::Var(decls) => decls.iter().map(|d| self.def(d)).collect(),
            Stmt::Func(f) => Ok(vec![self.defn(f)?]),
            Stmt::Interface(i) => Ok(vec![self.protocol(i)?]),
            Stmt::Struct(s) => Ok(vec![self.record(s)?]),
            Stmt::Implements(i) => Ok(vec![self.extend_type(i)?]),
        }
    }

    fn binding(&mut self, binding: &Binding) -> Result<String, CompileError> {
        let pattern = self.hinted_pattern(&binding.pattern.node, binding.ty.as_ref());
        let value = self.sub(&binding.value)?;
        Ok(format!("{pattern} {value}"))
    }

    // ── Declarations ────────────────────────────────────────────────

    fn def(&mut self, decl: &VarDecl) -> Result<String, CompileError> {
        let name = names::symbol(&decl.name.node);
        let hint = decl.ty.as_ref().and_then(|t| self.type_hint(&t.node));
        let meta = match (names::is_private(&decl.name.node), hint) {
            (true, None) => "^:private ".to_string(),
            (true, Some(tag)) => format!("^{{:private true, :tag {tag}}} "),
            (false, None) => String::new(),
            (false, Some(tag)) => format!("^{tag} "),
        };
        let value = self.sub(&decl.value)?;
        Ok(format!("(def {meta}{name} {value})"))
    }

    fn defn(&mut self, func: &FuncDecl) -> Result<String, CompileError> {
        let head = if names::is_private(&func.name.node) { "defn-" } else { "defn" };
        let name = names::symbol(&func.name.node);
        let arities = self.arities(&func.parts)?;
        Ok(format!("({head} {name} {arities})"))
    }

    /// `[a] body` for one arity, `([a] b) ([a b] c)` for several.
    fn arities(&mut self, parts: &[FuncPart]) -> Result<String, CompileError> {
        if let [only] = parts {
            return self.arity(only, false);
        }
        let mut rendered = Vec::with_capacity(parts.len());
        for part in parts {
            rendered.push(format!("({})", self.arity(part, false)?));
        }
        Ok(rendered.join(" "))
    }

    fn arity(&mut self, part: &FuncPart, with_this: bool) -> Result<String, CompileError> {
        let (params, ret, body) = match part {
            FuncPart::Untyped { params, body } => (params, None, body),
            FuncPart::Typed { params, ret, body } => (params, Some(ret), body),
        };
        let mut out = String::new();
        if let Some(tag) = ret.and_then(|r| self.type_hint(&r.node)) {
            out.push_str(&format!("^{tag} "));
        }
        out.push_str(&self.params(params, with_this));
        out.push(' ');
        out.push_str(&self.block(body)?);
        Ok(out)
    }

    fn params(&mut self, params: &Params, with_this: bool) -> String {
        let mut rendered = Vec::new();
        if with_this {
            rendered.push("this".to_string());
        }
        for param in &params.fixed {
            rendered.push(self.hinted_pattern(&param.pattern.node, param.ty.as_ref()));
        }
        if let Some(rest) = &params.variadic {
            rendered.push("&".to_string());
            rendered.push(self.hinted_pattern(&rest.pattern.node, rest.ty.as_ref()));
        }
        format!("[{}]", rendered.join(" "))
    }

    /// Protocol signatures hint parameters with the type name as written.
    fn signature_params(&mut self, params: &Params) -> String {
        let mut rendered = vec!["this".to_string()];
        let variadic = params.variadic.iter().map(|p| (p, true));
        for (param, rest) in params.fixed.iter().map(|p| (p, false)).chain(variadic) {
            if rest {
                rendered.push("&".to_string());
            }
            match param.ty.as_ref() {
                Some(Spanned { node: TypeRef::Named(name), .. }) => {
                    if primitive(name).is_none() {
                        self.imports.reference_type(name);
                    }
                    rendered.push(format!("^{name} {}", pattern_form(&param.pattern.node)));
                }
                ty => rendered.push(self.hinted_pattern(&param.pattern.node, ty)),
            }
        }
        format!("[{}]", rendered.join(" "))
    }

    fn protocol(&mut self, decl: &InterfaceDecl) -> Result<String, CompileError> {
        let mut parts = vec!["defprotocol".to_string(), decl.name.node.clone()];
        for method in &decl.methods {
            let name = names::symbol(&method.name.node);
            let params = self.signature_params(&method.params);
            let sig = match method.ret.as_ref().and_then(|r| self.type_hint(&r.node)) {
                Some(tag) => format!("(^{tag} {name} {params})"),
                None => format!("({name} {params})"),
            };
            parts.push(sig);
        }
        Ok(sexp(parts))
    }

    fn record(&mut self, decl: &StructDecl) -> Result<String, CompileError> {
        let fields: Vec<String> = decl
            .fields
            .iter()
            .map(|f| {
                let name = names::symbol(&f.name.node);
                match f.ty.as_ref().and_then(|t| self.type_hint(&t.node)) {
                    Some(tag) => format!("^{tag} {name}"),
                    None => name,
                }
            })
            .collect();
        let head = format!("(defrecord {} [{}]", decl.name.node, fields.join(" "));
        if decl.fields.is_empty() {
            return Ok(format!("{head})"));
        }
        let shown: Vec<String> = decl.fields.iter().map(|f| names::symbol(&f.name.node)).collect();
        Ok(format!(
            "{head} Object (toString [this] (str \"{{\" {} \"}}\")))",
            shown.join(" \" \" ")
        ))
    }

    fn extend_type(&mut self, decl: &ImplementsDecl) -> Result<String, CompileError> {
        self.imports.reference_type(&decl.protocol.node);
        self.imports.reference_type(&decl.target.node);
        let mut parts = vec!["extend-type".to_string(), decl.target.node.clone(), decl.protocol.node.clone()];
        for method in &decl.methods {
            let name = names::symbol(&method.name.node);
            let arity = self.arity(&method.part, true)?;
            // A return hint belongs before the method name.
            let rendered = match arity.strip_prefix('^').and_then(|rest| rest.split_once(' ')) {
                Some((tag, rest)) => format!("(^{tag} {name} {rest})"),
                None => format!("({name} {arity})"),
            };
            parts.push(rendered);
        }
        Ok(sexp(parts))
    }

    // ── Types and patterns ──────────────────────────────────────────

    fn type_hint(&mut self, ty: &TypeRef) -> Option<String> {
        match ty {
            TypeRef::Named(name) => Some(match primitive(name) {
                Some(prim) => prim.to_string(),
                None => {
                    self.imports.reference_type(name);
                    name.clone()
                }
            }),
            TypeRef::Slice(inner) => Some(match inner.as_ref() {
                TypeRef::Named(name) => match primitive(name).and_then(primitive_array) {
                    Some(array) => array.to_string(),
                    None => {
                        self.imports.reference_type(name);
                        "objects".to_string()
                    }
                },
                _ => "objects".to_string(),
            }),
            TypeRef::Chan(_) => None,
        }
    }

    fn hinted_pattern(&mut self, pattern: &Pattern, ty: Option<&Spanned<TypeRef>>) -> String {
        let rendered = pattern_form(pattern);
        match ty.and_then(|t| self.type_hint(&t.node)) {
            Some(tag) => format!("^{tag} {rendered}"),
            None => rendered,
        }
    }

    // ── Expressions ─────────────────────────────────────────────────

    fn sub(&mut self, e: &Spanned<Expr>) -> Result<String, CompileError> {
        self.expr(&e.node)
    }

    fn subs(&mut self, items: &[Spanned<Expr>]) -> Result<Vec<String>, CompileError> {
        items.iter().map(|e| self.sub(e)).collect()
    }

    fn call(&mut self, head: String, args: &[Spanned<Expr>]) -> Result<String, CompileError> {
        let mut parts = vec![head];
        parts.extend(self.subs(args)?);
        Ok(sexp(parts))
    }

    fn family(&self, written: ChanFamily) -> ChanFamily {
        if self.target.cooperative { ChanFamily::Cooperative } else { written }
    }

    fn expr(&mut self, e: &Expr) -> Result<String, CompileError> {
        Ok(match e {
            Expr::Name(raw) => {
                if raw.chars().next().is_some_and(char::is_uppercase) && !names::is_label(raw) {
                    self.imports.reference_type(raw);
                }
                names::symbol(raw)
            }
            Expr::ArgRef(raw) => {
                self.arg_refs += 1;
                names::symbol(raw)
            }
            Expr::Qualified { package, member } => {
                self.imports.reference_package(&package.node, member, package.span)?;
                let member = if self.target.host == Host::Embedded && package.node == "js" {
                    member.clone()
                } else {
                    member.split('.').map(names::symbol).collect::<Vec<_>>().join(".")
                };
                format!("{}/{member}", package.node)
            }
            Expr::Static { class, member } => {
                self.imports.reference_type(&class.node);
                format!("{}/{}", class.node, names::member(member))
            }
            Expr::Int(n) | Expr::Float(n) => n.clone(),
            Expr::Str(s) => literals::interpreted_string(s),
            Expr::RawStr(s) => literals::raw_string(s),
            Expr::Char(c) => c.clone(),
            Expr::Regex(r) => literals::regex(r),
            Expr::Vector(items) => format!("[{}]", self.subs(items)?.join(" ")),
            Expr::Dict(entries) => {
                let mut rendered = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    rendered.push(format!("{} {}", self.sub(key)?, self.sub(value)?));
                }
                format!("{{{}}}", rendered.join(", "))
            }
            Expr::Set(items) => format!("#{{{}}}", self.subs(items)?.join(" ")),
            Expr::Record { ty, fields } => {
                self.imports.reference_type(&ty.node);
                self.call(format!("{}.", ty.node), fields)?
            }
            Expr::Binary { op, lhs, rhs } => {
                sexp(vec![op.target_name().to_string(), self.sub(lhs)?, self.sub(rhs)?])
            }
            Expr::Unary { op, operand } => {
                let operand = self.sub(operand)?;
                match op {
                    UnaryOp::Plus => format!("(+ {operand})"),
                    UnaryOp::Neg => format!("(- {operand})"),
                    UnaryOp::Not => format!("(not {operand})"),
                    UnaryOp::BitNot => format!("(bit-not {operand})"),
                    UnaryOp::Deref => format!("@{operand}"),
                }
            }
            Expr::InfixCall { func, lhs, rhs } => {
                let lhs = self.sub(lhs)?;
                let func = self.sub(func)?;
                let rhs = self.sub(rhs)?;
                sexp(vec![func, lhs, rhs])
            }
            Expr::Call { func, args } => {
                let head = self.sub(func)?;
                self.call(head, args)?
            }
            Expr::SpreadCall { func, args, rest } => {
                let mut parts = vec!["apply".to_string(), self.sub(func)?];
                parts.extend(self.subs(args)?);
                parts.push(self.sub(rest)?);
                sexp(parts)
            }
            Expr::Index { target, index } => {
                let target = self.sub(target)?;
                match &index.node {
                    Expr::Name(raw) if names::is_label(raw) => format!("({} {target})", names::label(raw)),
                    _ => format!("(nth {target} {})", self.sub(index)?),
                }
            }
            Expr::SliceFrom { target, from } => {
                let target = self.sub(target)?;
                format!("(drop {} {target})", self.sub(from)?)
            }
            Expr::SliceTo { target, to } => {
                let target = self.sub(target)?;
                format!("(take {} {target})", self.sub(to)?)
            }
            Expr::SliceRange { target, from, to } => {
                let target = self.sub(target)?;
                let from = self.sub(from)?;
                let to = self.sub(to)?;
                format!("(take (- {to} {from}) (drop {from} {target}))")
            }
            Expr::Field { target, member } => format!("(. {} {})", self.sub(target)?, names::member(member)),
            Expr::MethodCall { target, method, args } => {
                let target = self.sub(target)?;
                let call = self.call(names::member(method), args)?;
                format!("(. {target} {call})")
            }
            Expr::New { class, args } => {
                self.imports.reference_qualified_type(&class.node);
                self.call(format!("{}.", class.node), args)?
            }
            Expr::Func(parts) => format!("(fn {})", self.arities(parts)?),
            Expr::ShortFunc(body) => self.short_func(body)?,
            Expr::Block(body) => self.block(body)?,
            Expr::BlockCall { name, body } => self.spliced(vec![names::symbol(&name.node)], body)?,
            Expr::Scoped { bindings, body } => {
                let mut rendered = Vec::with_capacity(bindings.len());
                for binding in bindings {
                    rendered.push(self.binding(binding)?);
                }
                self.spliced(vec!["let".to_string(), format!("[{}]", rendered.join(" "))], body)?
            }
            Expr::If { cond, then } => {
                let cond = self.sub(cond)?;
                format!("(when {cond} {})", self.block(then)?)
            }
            Expr::IfElse { cond, then, otherwise } => {
                let cond = self.sub(cond)?;
                let then = self.block(then)?;
                format!("(if {cond} {then} {})", self.sub(otherwise)?)
            }
            Expr::ForRange { pattern, seq, body } => self.comprehension("doseq", pattern, seq, None, body)?,
            Expr::ForLazy { pattern, seq, body } => self.comprehension("for", pattern, seq, None, body)?,
            Expr::ForLazyWhen { pattern, seq, guard, body } => {
                self.comprehension("for", pattern, seq, Some(guard.as_ref()), body)?
            }
            Expr::ForTimes { name, count, body } => {
                let count = self.sub(count)?;
                format!("(dotimes [{} {count}] {})", names::symbol(&name.node), self.block(body)?)
            }
            Expr::Cond { clauses, default } => {
                let mut parts = vec!["cond".to_string()];
                for (test, body) in clauses {
                    parts.push(self.sub(test)?);
                    parts.push(self.block(body)?);
                }
                if let Some(body) = default {
                    parts.push(":else".to_string());
                    parts.push(self.block(body)?);
                }
                sexp(parts)
            }
            Expr::Case { subject, clauses, default } => {
                let mut parts = vec!["case".to_string(), self.sub(subject)?];
                for (labels, body) in clauses {
                    let mut rendered = self.subs(labels)?;
                    parts.push(if rendered.len() == 1 { rendered.remove(0) } else { sexp(rendered) });
                    parts.push(self.block(body)?);
                }
                parts.push(match default {
                    Some(body) => self.block(body)?,
                    None => "nil".to_string(),
                });
                sexp(parts)
            }
            Expr::TypeSwitch { subject, clauses, default } => {
                let subject = self.sub(subject)?;
                let mut parts = vec!["cond".to_string()];
                for (types, body) in clauses {
                    let mut tests: Vec<String> = types
                        .iter()
                        .map(|t| {
                            self.imports.reference_type(&t.node);
                            format!("(instance? {} {subject})", t.node)
                        })
                        .collect();
                    parts.push(if tests.len() == 1 {
                        tests.remove(0)
                    } else {
                        tests.insert(0, "or".to_string());
                        sexp(tests)
                    });
                    parts.push(self.block(body)?);
                }
                if let Some(body) = default {
                    parts.push(":else".to_string());
                    parts.push(self.block(body)?);
                }
                sexp(parts)
            }
            Expr::Select { family, cases, default } => self.select(*family, cases, default.as_ref())?,
            Expr::Try { body, catches, finally } => {
                let mut parts = vec!["try".to_string()];
                parts.extend(self.stmts(body)?);
                for catch in catches {
                    self.imports.reference_type(&catch.ty.node);
                    let head = vec!["catch".to_string(), catch.ty.node.clone(), names::symbol(&catch.binding.node)];
                    parts.push(self.spliced(head, &catch.body)?);
                }
                if let Some(body) = finally {
                    parts.push(self.spliced(vec!["finally".to_string()], body)?);
                }
                sexp(parts)
            }
            Expr::Loop { bindings, body } => {
                let mut rendered = Vec::with_capacity(bindings.len() * 2);
                for (name, value) in bindings {
                    rendered.push(names::symbol(&name.node));
                    rendered.push(self.sub(value)?);
                }
                self.spliced(vec!["loop".to_string(), format!("[{}]", rendered.join(" "))], body)?
            }
            Expr::Go(inner) => {
                self.uses_async = true;
                match &inner.node {
                    Expr::Block(body) if body.is_empty() => "(go nil)".to_string(),
                    Expr::Block(body) => self.spliced(vec!["go".to_string()], body)?,
                    _ => format!("(go {})", self.sub(inner)?),
                }
            }
            Expr::Receive { family, chan } => {
                self.uses_async = true;
                let op = match self.family(*family) {
                    ChanFamily::Blocking => "<!!",
                    ChanFamily::Cooperative => "<!",
                };
                format!("({op} {})", self.sub(chan)?)
            }
            Expr::Send { family, chan, value } => {
                self.uses_async = true;
                let op = match self.family(*family) {
                    ChanFamily::Blocking => ">!!",
                    ChanFamily::Cooperative => ">!",
                };
                let chan = self.sub(chan)?;
                format!("({op} {chan} {})", self.sub(value)?)
            }
            Expr::MakeChan { capacity } => {
                self.uses_async = true;
                match capacity {
                    Some(n) => format!("(chan {})", self.sub(n)?),
                    None => "(chan)".to_string(),
                }
            }
            Expr::Quote(inner) => format!("'{}", self.sub(inner)?),
            Expr::SyntaxQuote(inner) => format!("`{}", self.sub(inner)?),
            Expr::Unquote(inner) => format!("~{}", self.sub(inner)?),
            Expr::UnquoteSplicing(inner) => format!("~@{}", self.sub(inner)?),
            Expr::Assoc { target, entries } => self.assoc(target, entries)?,
            Expr::Dissoc { target, keys } => {
                let mut parts = vec!["dissoc".to_string(), self.sub(target)?];
                parts.extend(self.subs(keys)?);
                sexp(parts)
            }
        })
    }

    fn comprehension(
        &mut self,
        head: &str,
        pattern: &Spanned<Pattern>,
        seq: &Spanned<Expr>,
        guard: Option<&Spanned<Expr>>,
        body: &Block,
    ) -> Result<String, CompileError> {
        let mut bindings = format!("{} {}", pattern_form(&pattern.node), self.sub(seq)?);
        if let Some(guard) = guard {
            bindings.push_str(&format!(" :when {}", self.sub(guard)?));
        }
        Ok(format!("({head} [{bindings}] {})", self.block(body)?))
    }

    /// `func{...}`: anonymous-function shorthand when the body is a call form.
    fn short_func(&mut self, body: &Block) -> Result<String, CompileError> {
        let outer = std::mem::replace(&mut self.arg_refs, 0);
        let rendered = self.block(body);
        let used_args = self.arg_refs > 0;
        self.arg_refs = outer;
        let rendered = rendered?;
        Ok(if rendered.starts_with('(') {
            format!("#{rendered}")
        } else if used_args {
            format!("#(identity {rendered})")
        } else {
            format!("(fn [] {rendered})")
        })
    }

    fn assoc(&mut self, target: &Spanned<Expr>, entries: &[UpdateEntry]) -> Result<String, CompileError> {
        let mut acc = self.sub(target)?;
        if entries.is_empty() {
            return Ok(acc);
        }
        if entries.iter().all(|e| e.path.len() == 1) {
            let mut parts = vec!["assoc".to_string(), acc];
            for entry in entries {
                parts.extend(self.subs(&entry.path)?);
                parts.push(self.sub(&entry.value)?);
            }
            return Ok(sexp(parts));
        }
        for entry in entries {
            let path = self.subs(&entry.path)?;
            let value = self.sub(&entry.value)?;
            acc = if path.len() == 1 {
                format!("(assoc {acc} {} {value})", path[0])
            } else {
                format!("(assoc-in {acc} [{}] {value})", path.join(" "))
            };
        }
        Ok(acc)
    }

    fn select(&mut self, family: Option<ChanFamily>, cases: &[SelectCase], default: Option<&Block>) -> Result<String, CompileError> {
        self.uses_async = true;
        let head = match self.family(family.unwrap_or(ChanFamily::Blocking)) {
            ChanFamily::Blocking => "alt!!",
            ChanFamily::Cooperative => "alt!",
        };
        let mut parts = vec![head.to_string()];
        for case in cases {
            match case {
                SelectCase::Send { chan, value, body } => {
                    let chan = self.sub(chan)?;
                    let value = self.sub(value)?;
                    parts.push(format!("[[{chan} {value}]]"));
                    parts.push(self.clause_body(body)?);
                }
                SelectCase::Receive { chan, body } => {
                    parts.push(self.sub(chan)?);
                    parts.push(self.clause_body(body)?);
                }
                SelectCase::ReceiveBind { binding, chan, body } => {
                    parts.push(self.sub(chan)?);
                    let head = vec![format!("[{}]", names::symbol(&binding.node))];
                    parts.push(if body.is_empty() { format!("({} nil)", head[0]) } else { self.spliced(head, body)? });
                }
            }
        }
        if let Some(body) = default {
            parts.push(":default".to_string());
            parts.push(self.clause_body(body)?);
        }
        Ok(sexp(parts))
    }

    /// Select clause bodies are always a `do` form, or `nil` when empty.
    fn clause_body(&mut self, body: &Block) -> Result<String, CompileError> {
        if body.is_empty() {
            return Ok("nil".to_string());
        }
        self.spliced(vec!["do".to_string()], body)
    }
}

fn pattern_form(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Name(raw) => names::symbol(raw),
        Pattern::Vector { items, rest, whole } => {
            let mut parts: Vec<String> = items.iter().map(|p| pattern_form(&p.node)).collect();
            if let Some(rest) = rest {
                parts.push("&".to_string());
                parts.push(pattern_form(&rest.node));
            }
            if let Some(whole) = whole {
                parts.push(":as".to_string());
                parts.push(names::symbol(&whole.node));
            }
            format!("[{}]", parts.join(" "))
        }
        Pattern::Map(entries) => {
            let parts: Vec<String> = entries
                .iter()
                .map(|(p, key)| format!("{} {}", pattern_form(&p.node), names::symbol(&key.node)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn primitive(name: &str) -> Option<&'static str> {
    Some(match name {
        "int" | "int64" | "long" => "long",
        "int32" => "int",
        "int16" | "short" => "short",
        "int8" | "byte" | "uint8" => "byte",
        "float64" | "double" => "double",
        "float32" | "float" => "float",
        "bool" | "boolean" => "boolean",
        "rune" | "char" => "char",
        "string" => "String",
        _ => return None,
    })
}

fn primitive_array(prim: &str) -> Option<&'static str> {
    Some(match prim {
        "long" => "longs",
        "int" => "ints",
        "short" => "shorts",
        "byte" => "bytes",
        "double" => "doubles",
        "float" => "floats",
        "boolean" => "booleans",
        "char" => "chars",
        _ => return None,
    })
}
