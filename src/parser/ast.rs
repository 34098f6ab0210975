use serde::Serialize;

use crate::span::Spanned;

/// One parsed compilation unit. `package` is absent only for the
/// single-expression start rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFile {
    pub package: Option<Spanned<Vec<String>>>,
    pub imports: Vec<Spanned<ImportSpec>>,
    pub type_imports: Vec<Spanned<TypeImport>>,
    pub excludes: Vec<Spanned<String>>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpec {
    pub path: Vec<String>,
    pub kind: ImportKind,
}

impl ImportSpec {
    /// The name the file uses to refer to this package, if any.
    pub fn binding_name(&self) -> Option<&str> {
        match &self.kind {
            ImportKind::Aliased(alias) => Some(alias),
            ImportKind::Default => self.path.last().map(String::as_str),
            ImportKind::SideEffect => None,
        }
    }

    pub fn full_path(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ImportKind {
    /// `b "bar/baz"`
    Aliased(String),
    /// `"bar/baz"`, bound to the last path segment
    Default,
    /// `_ "foo"`
    SideEffect,
}

/// `import type ( java.util.{HashMap, List} )`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeImport {
    pub package: Vec<String>,
    pub names: Vec<Spanned<String>>,
}

pub type Block = Vec<Spanned<Stmt>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Expr(Expr),
    /// `a := v` / `const a = v` / `const ( ... )`: scopes over the rest of the enclosing sequence.
    Let(Vec<Binding>),
    /// `var a T = v`
    Var(Vec<VarDecl>),
    Func(FuncDecl),
    Interface(InterfaceDecl),
    Struct(StructDecl),
    Implements(ImplementsDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub pattern: Spanned<Pattern>,
    pub ty: Option<Spanned<TypeRef>>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub name: Spanned<String>,
    pub ty: Option<Spanned<TypeRef>>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncDecl {
    pub name: Spanned<String>,
    pub parts: Vec<FuncPart>,
}

/// One parameter-list/body pair. The declared return type is a separate
/// constructor because it moves to the head of the rendered arity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FuncPart {
    Untyped { params: Params, body: Block },
    Typed { params: Params, ret: Spanned<TypeRef>, body: Block },
}

impl FuncPart {
    pub fn params(&self) -> &Params {
        match self {
            FuncPart::Untyped { params, .. } | FuncPart::Typed { params, .. } => params,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Params {
    pub fixed: Vec<Param>,
    pub variadic: Option<Param>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub pattern: Spanned<Pattern>,
    pub ty: Option<Spanned<TypeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDecl {
    pub name: Spanned<String>,
    pub methods: Vec<MethodSig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSig {
    pub name: Spanned<String>,
    pub params: Params,
    pub ret: Option<Spanned<TypeRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDecl {
    pub name: Spanned<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: Spanned<String>,
    pub ty: Option<Spanned<TypeRef>>,
}

/// `implements Ia func (Ty) ( f(a) {b}; g() {c} )`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementsDecl {
    pub protocol: Spanned<String>,
    pub target: Spanned<String>,
    pub methods: Vec<MethodImpl>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodImpl {
    pub name: Spanned<String>,
    pub part: FuncPart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeRef {
    /// `FooType`, `int`, `java.io.File`
    Named(String),
    /// `[]T`
    Slice(Box<TypeRef>),
    /// `chan T`
    Chan(Option<Box<TypeRef>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Pattern {
    Name(String),
    /// `[x, more..., AS, full]`
    Vector {
        items: Vec<Spanned<Pattern>>,
        rest: Option<Box<Spanned<Pattern>>>,
        whole: Option<Spanned<String>>,
    },
    /// `{theX: X, {[a, b]: KEYS}: DETAILS}`: each entry binds a pattern to a label.
    Map(Vec<(Spanned<Pattern>, Spanned<String>)>),
}

impl Pattern {
    /// Every name this pattern binds, in source order.
    pub fn bound_names(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names(&self, out: &mut Vec<String>) {
        match self {
            Pattern::Name(n) => out.push(n.clone()),
            Pattern::Vector { items, rest, whole } => {
                for item in items {
                    item.node.collect_names(out);
                }
                if let Some(rest) = rest {
                    rest.node.collect_names(out);
                }
                if let Some(whole) = whole {
                    out.push(whole.node.clone());
                }
            }
            Pattern::Map(entries) => {
                for (pattern, _) in entries {
                    pattern.node.collect_names(out);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    BitOr,
    BitXor,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    BitAnd,
    BitAndNot,
}

impl BinOp {
    /// Tier 1 (loosest) through 5; unary operators form the sixth.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Eq | BinOp::Neq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq => 3,
            BinOp::Add | BinOp::Sub | BinOp::BitOr | BinOp::BitXor => 4,
            BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Shl | BinOp::Shr | BinOp::BitAnd | BinOp::BitAndNot => 5,
        }
    }

    /// Name of the target function implementing this operator.
    pub fn target_name(self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "=",
            BinOp::Neq => "not=",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::BitOr => "bit-or",
            BinOp::BitXor => "bit-xor",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "mod",
            BinOp::Shl => "bit-shift-left",
            BinOp::Shr => "bit-shift-right",
            BinOp::BitAnd => "bit-and",
            BinOp::BitAndNot => "bit-and-not",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BitNot,
    Deref,
}

/// Which family of channel primitives an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChanFamily {
    /// `<-`: parks the calling thread
    Blocking,
    /// `<:`: parks the lightweight process only
    Cooperative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectCase {
    Send { chan: Spanned<Expr>, value: Spanned<Expr>, body: Block },
    Receive { chan: Spanned<Expr>, body: Block },
    ReceiveBind { binding: Spanned<String>, chan: Spanned<Expr>, body: Block },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catch {
    pub ty: Spanned<String>,
    pub binding: Spanned<String>,
    pub body: Block,
}

/// One `keys...: value` entry of `x += {...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateEntry {
    pub path: Vec<Spanned<Expr>>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Identifier, label, or escaped identifier, exactly as written.
    Name(String),
    /// `$1`, `$*`
    ArgRef(String),
    /// `alias.member`
    Qualified { package: Spanned<String>, member: String },
    /// `Type::member`
    Static { class: Spanned<String>, member: String },
    Int(String),
    Float(String),
    /// Interpreted string, escapes still as written.
    Str(String),
    RawStr(String),
    Char(String),
    Regex(String),
    Vector(Vec<Spanned<Expr>>),
    Dict(Vec<(Spanned<Expr>, Spanned<Expr>)>),
    Set(Vec<Spanned<Expr>>),
    /// `Vertex{1, 2}`
    Record { ty: Spanned<String>, fields: Vec<Spanned<Expr>> },
    Binary { op: BinOp, lhs: Box<Spanned<Expr>>, rhs: Box<Spanned<Expr>> },
    Unary { op: UnaryOp, operand: Box<Spanned<Expr>> },
    /// `a f b`
    InfixCall { func: Box<Spanned<Expr>>, lhs: Box<Spanned<Expr>>, rhs: Box<Spanned<Expr>> },
    Call { func: Box<Spanned<Expr>>, args: Vec<Spanned<Expr>> },
    /// `f(a, ...rest)`
    SpreadCall { func: Box<Spanned<Expr>>, args: Vec<Spanned<Expr>>, rest: Box<Spanned<Expr>> },
    Index { target: Box<Spanned<Expr>>, index: Box<Spanned<Expr>> },
    SliceFrom { target: Box<Spanned<Expr>>, from: Box<Spanned<Expr>> },
    SliceTo { target: Box<Spanned<Expr>>, to: Box<Spanned<Expr>> },
    SliceRange { target: Box<Spanned<Expr>>, from: Box<Spanned<Expr>>, to: Box<Spanned<Expr>> },
    /// `obj->field`
    Field { target: Box<Spanned<Expr>>, member: String },
    /// `obj->method(args)`
    MethodCall { target: Box<Spanned<Expr>>, method: String, args: Vec<Spanned<Expr>> },
    New { class: Spanned<String>, args: Vec<Spanned<Expr>> },
    Func(Vec<FuncPart>),
    /// `func{ ... }`
    ShortFunc(Block),
    Block(Block),
    /// `dosync{ ... }`
    BlockCall { name: Spanned<String>, body: Block },
    /// Bindings scoped over a body: `if a := b; c {}`, `switch x := y; x {}`, `const (...) {}`.
    Scoped { bindings: Vec<Binding>, body: Block },
    If { cond: Box<Spanned<Expr>>, then: Block },
    IfElse { cond: Box<Spanned<Expr>>, then: Block, otherwise: Box<Spanned<Expr>> },
    ForRange { pattern: Spanned<Pattern>, seq: Box<Spanned<Expr>>, body: Block },
    ForLazy { pattern: Spanned<Pattern>, seq: Box<Spanned<Expr>>, body: Block },
    ForLazyWhen { pattern: Spanned<Pattern>, seq: Box<Spanned<Expr>>, guard: Box<Spanned<Expr>>, body: Block },
    ForTimes { name: Spanned<String>, count: Box<Spanned<Expr>>, body: Block },
    /// Subject-less `switch`.
    Cond { clauses: Vec<(Spanned<Expr>, Block)>, default: Option<Block> },
    /// `switch x { case A, B: ... }`
    Case { subject: Box<Spanned<Expr>>, clauses: Vec<(Vec<Spanned<Expr>>, Block)>, default: Option<Block> },
    /// `switch x.(type) { case String: ... }`
    TypeSwitch { subject: Box<Spanned<Expr>>, clauses: Vec<(Vec<Spanned<String>>, Block)>, default: Option<Block> },
    /// `family` is None when no case names a channel operation.
    Select { family: Option<ChanFamily>, cases: Vec<SelectCase>, default: Option<Block> },
    Try { body: Block, catches: Vec<Catch>, finally: Option<Block> },
    Loop { bindings: Vec<(Spanned<String>, Spanned<Expr>)>, body: Block },
    Go(Box<Spanned<Expr>>),
    Receive { family: ChanFamily, chan: Box<Spanned<Expr>> },
    Send { family: ChanFamily, chan: Box<Spanned<Expr>>, value: Box<Spanned<Expr>> },
    MakeChan { capacity: Option<Box<Spanned<Expr>>> },
    Quote(Box<Spanned<Expr>>),
    SyntaxQuote(Box<Spanned<Expr>>),
    Unquote(Box<Spanned<Expr>>),
    UnquoteSplicing(Box<Spanned<Expr>>),
    /// `x += {K: v}`
    Assoc { target: Box<Spanned<Expr>>, entries: Vec<UpdateEntry> },
    /// `x -= {K, ...}`
    Dissoc { target: Box<Spanned<Expr>>, keys: Vec<Spanned<Expr>> },
}
