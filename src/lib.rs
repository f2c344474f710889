//! `fsmc` — lowers a small cooperative-scheduling DSL into a portable
//! C/C++ state-dispatch function.
//!
//! This crate is the thin root over the `fsmc-*` workspace members, the
//! same shape `calyx`'s root crate takes over `calyx-ir`/`calyx-opt`/
//! `calyx-backend`/`calyx-utils`: re-export the public surface each member
//! defines, add no logic of its own. Concrete DSL parsing is out of
//! scope — callers construct a [`Program`] directly (or via an external
//! grammar crate) and hand it to [`assemble`].
//!
//! ```
//! use fsmc::{assemble, emit_code, ir::{Program, Stmt, StmtKind}, EmitOptions};
//!
//! let program = Program::new(
//!     "blink",
//!     Stmt::new(StmtKind::Block(vec![
//!         Stmt::new(StmtKind::Line("led_on()".to_string())),
//!         Stmt::new(StmtKind::Wait("100".to_string())),
//!         Stmt::new(StmtKind::Line("led_off()".to_string())),
//!     ])),
//! );
//!
//! let fsm = assemble(&program, 4).unwrap();
//! let code = emit_code(&fsm, EmitOptions::default());
//! assert!(code.contains("void blink()"));
//! ```

pub use fsmc_backend::{emit_code, emit_dot, emit_dot_debug, emit_mermaid, emit_mermaid_debug, EmitOptions};
pub use fsmc_opt::assemble;
pub use fsmc_utils::{Error, FsmcResult};

/// The AST and FSM graph types, re-exported under one name for callers who
/// construct a [`ir::Program`] by hand.
pub mod ir {
    pub use fsmc_ir::*;
}
