//! AST consumed by the assembler. A grammar-driven parser (out of scope for
//! this crate) is expected to build this tree directly; nothing here reads
//! or validates concrete syntax.
//!
//! Each node is wrapped in [`Stmt`] so that position metadata can ride along
//! for diagnostics without the lowering pass ever consulting it, the way
//! `calyx_utils::WithPos` attaches a `GPosIdx` to IR nodes.

use fsmc_utils::Span;

/// One statement in the DSL, together with its (optional) source span.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub span: Option<Span>,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt { span: None, kind }
    }

    pub fn with_span(kind: StmtKind, span: Span) -> Self {
        Stmt {
            span: Some(span),
            kind,
        }
    }
}

/// An `IF`/`ELSE IF`/`ELSE` arm. `condition == ""` marks the `ELSE` arm,
/// which must be the last case if present — lowering rejects any other
/// arrangement as a malformed AST.
#[derive(Debug, Clone)]
pub struct Case {
    pub condition: String,
    pub body: Stmt,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    /// An ordinary statement; `code` is its source text without the
    /// trailing `;`.
    Line(String),
    /// A pre-formed line emitted verbatim, with no added `;`.
    Ordinary(String),
    Block(Vec<Stmt>),
    If(Vec<Case>),
    While {
        condition: String,
        body: Box<Stmt>,
    },
    DoWhile {
        condition: String,
        body: Box<Stmt>,
    },
    For {
        init: Box<Stmt>,
        condition: String,
        update: Box<Stmt>,
        body: Box<Stmt>,
    },
    Declaration {
        ty: String,
        name: String,
        is_global: bool,
    },
    DeclarationInit {
        ty: String,
        name: String,
        expr: String,
        is_global: bool,
    },
    /// `ms == ""` means `YIELD`; otherwise a timed wait.
    Wait(String),
    WaitUnless(String),
    Break,
    Continue,
    Return,
}

/// The root of a lowered unit: a named function body.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: String,
    pub body: Stmt,
}

impl Program {
    pub fn new(name: impl Into<String>, body: Stmt) -> Self {
        Program {
            name: name.into(),
            body,
        }
    }
}
