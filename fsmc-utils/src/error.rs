use std::fmt;

/// Failures that can arise while assembling or emitting an FSM.
///
/// Mirrors the flat, structural error style of `calyx_utils::Error`: one
/// variant per distinct failure shape, no wrapped source errors, since every
/// failure here originates inside this compiler rather than from I/O or a
/// downstream library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The AST violated a shape the lowering pass assumes a well-formed
    /// parser would never produce (e.g. an `ELSE` case that is not last).
    #[error("malformed AST: {0}")]
    MalformedAst(String),

    /// Lowering produced a graph with no reachable node that has zero
    /// outgoing transitions. Program-root wiring is designed to make this
    /// unreachable; seeing it means a bug in the lowering rules themselves.
    #[error("lowered FSM has no terminal node")]
    MissingTerminal,
}

/// Convenience alias used throughout the compiler, named the way
/// `calyx_utils::CalyxResult` names its own alias.
pub type FsmcResult<T> = Result<T, Error>;

impl Error {
    pub fn malformed_ast<S: Into<String>>(msg: S) -> Self {
        Error::MalformedAst(msg.into())
    }
}

/// A position span for diagnostics. Carried on AST nodes but never
/// interpreted by the assembler itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: u32,
    pub len: u32,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.offset, self.offset + self.len)
    }
}
