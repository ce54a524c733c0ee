//! Syntax model for Go source files.
//!
//! The model is declaration-oriented: every package-level declaration is
//! represented, type expressions and initializer expressions are fully
//! structured, and function bodies are recorded only by position.
//!
//! # Node kinds
//!
//! - [`File`]: package clause, imports, declarations, comments
//! - [`Decl`]: `import`/`const`/`var`/`type` groups ([`GenDecl`]) and functions ([`FuncDecl`])
//! - [`Spec`]: one entry of a declaration group
//! - [`Expr`]: types and values
//! - [`Field`]: one entry of a struct field list or parameter list

use std::fmt;

/// A 1-based line/column position in a source file. Columns count bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single `//` or `/* */` comment, text kept verbatim including its markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub pos: Pos,
    pub end_line: u32,
}

/// An identifier with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub pos: Pos,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// A run of adjacent comments with no blank line between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Line of the first comment.
    pub fn start_line(&self) -> u32 {
        self.list.first().map_or(0, |c| c.pos.line)
    }

    /// Line on which the last comment ends.
    pub fn end_line(&self) -> u32 {
        self.list.last().map_or(0, |c| c.end_line)
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: Ident,
    pub decls: Vec<Decl>,
    pub comments: Vec<CommentGroup>,
}

impl File {
    /// All import specs across every import declaration, in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls
            .iter()
            .filter_map(|decl| match decl {
                Decl::Gen(gen_decl) if gen_decl.keyword == DeclKeyword::Import => {
                    Some(gen_decl.specs.iter())
                }
                _ => None,
            })
            .flatten()
            .filter_map(|spec| match spec {
                Spec::Import(import) => Some(import),
                _ => None,
            })
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

/// Keyword introducing a [`GenDecl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKeyword {
    Import,
    Const,
    Type,
    Var,
}

/// `import`, `const`, `type` or `var` declaration, grouped or not.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    pub pos: Pos,
    pub doc: Option<CommentGroup>,
    pub specs: Vec<Spec>,
}

/// One entry of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `name "path"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit package name, `_` or `.`.
    pub name: Option<Ident>,

    /// Import path with quotes removed.
    pub path: String,
    pub pos: Pos,
}

/// `a, b T = x, y` in a `const` or `var` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

/// `Name[T any] Type` or `Name = Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Vec<Field>,
    pub is_alias: bool,
    pub ty: Expr,
}

/// A function or method declaration. Bodies are not parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    pub receiver: Option<Vec<Field>>,
    pub has_body: bool,
}

/// A field in a struct, parameter list or type parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Empty for embedded fields and unnamed parameters.
    pub names: Vec<Ident>,
    pub ty: Expr,

    /// Raw tag literal including its quotes.
    pub tag: Option<BasicLit>,
    pub doc: Option<CommentGroup>,
    pub comment: Option<CommentGroup>,
}

/// Kinds of basic literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// A literal with its source text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub pos: Pos,
}

/// Channel direction in a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// `Type{elements}`; `ty` is `None` when elided inside an outer literal.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    pub ty: Option<Box<Expr>>,
    pub elements: Vec<Expr>,
    pub pos: Pos,
}

/// Types and value expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    CompositeLit(CompositeLit),

    /// `func(...) ... { ... }`, body skipped.
    FuncLit(Box<FuncType>),
    Paren(Box<Expr>),

    /// `x.sel`, also qualified type names like `time.Duration`.
    Selector {
        x: Box<Expr>,
        sel: Ident,
    },

    /// `x[i]` or a generic instantiation `List[int, string]`.
    Index {
        x: Box<Expr>,
        indices: Vec<Expr>,
    },

    /// `x[lo:hi:max]`
    Slice {
        x: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
    },

    /// `x.(T)`; `ty` is `None` for `x.(type)`.
    TypeAssert {
        x: Box<Expr>,
        ty: Option<Box<Expr>>,
    },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
    },

    /// `*x`, either a pointer type or a dereference.
    Star(Box<Expr>),
    Unary {
        op: String,
        x: Box<Expr>,
    },
    Binary {
        op: String,
        x: Box<Expr>,
        y: Box<Expr>,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },

    /// `[]T` when `len` is `None`, `[N]T` or `[...]T` otherwise.
    ArrayType {
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
    },

    /// `...` in an array length or `...T` in a variadic parameter.
    Ellipsis(Option<Box<Expr>>),
    StructType(StructType),
    InterfaceType {
        pos: Pos,
    },
    FuncType(Box<FuncType>),
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ChanType {
        dir: ChanDir,
        value: Box<Expr>,
    },
}

/// `struct { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub fields: Vec<Field>,
    pub pos: Pos,
}

/// `func(params) results`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
    pub pos: Pos,
}
