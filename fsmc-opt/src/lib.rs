//! Lowers DSL ASTs into FSM graphs and optimizes them to a fix-point.
//!
//! Module layout follows `calyx_opt`: an `analysis`-flavored `traversal`
//! module of read-only graph queries, a `passes` module of independent
//! rewrite strategies, and a thin pipeline driver tying them together
//! behind one public entry point, [`assemble`].

mod lowering;
mod passes;
mod pipeline;
mod templates;
pub mod traversal;

pub use lowering::lower_program;
pub use pipeline::optimize;

use fsmc_ir::{Fsm, Program};
use fsmc_utils::{Error, FsmcResult};

/// Lowers `program` to a raw FSM and optimizes it to `level` (clamped to
/// `0..=5`). Fails only if the AST itself is malformed, or — which the
/// program-root wiring is designed to make unreachable — the lowered graph
/// has no terminal node.
pub fn assemble(program: &Program, level: u8) -> FsmcResult<Fsm> {
    let mut fsm = lowering::lower_program(program)?;

    optimize(&mut fsm, fsm.start, level);

    if traversal::terminal(&fsm, fsm.start).is_none() {
        return Err(Error::MissingTerminal);
    }

    Ok(fsm)
}
