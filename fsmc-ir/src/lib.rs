//! The intermediate representations this compiler moves between: the AST
//! handed in by an (external) parser, and the FSM graph the assembler
//! builds from it.
//!
//! Module layout mirrors `calyx_ir`'s `lib.rs`: a handful of focused
//! submodules, each re-exported flat at the crate root rather than nested.

mod ast;
mod fsm;

pub use ast::{Case, Program, Stmt, StmtKind};
pub use fsm::{Fsm, GlobalVar, Node, NodeId, Transition};
