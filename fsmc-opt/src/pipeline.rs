//! The level-driven optimizer pipeline, grounded on `assembler.py`'s
//! `optimize_fsm` driver and, for the shape of a staged, named pipeline
//! over a fixed set of registered passes, on `calyx_opt`'s
//! `PassManager::default_passes`/`register_alias!` (here there is only one
//! pipeline — a prefix of `STRATEGIES` — rather than named aliases, since
//! this compiler has no use for alternate named flows).

use crate::passes::STRATEGIES;
use fsmc_ir::{Fsm, NodeId};

/// Number of strategies defined; levels above this are clamped.
const MAX_LEVEL: u8 = STRATEGIES.len() as u8;

/// Runs strategies `1..=level` (clamped to `[0, 5]`) to a global fix-point:
/// whenever any strategy changes the graph, the scan restarts from
/// strategy 1. Terminates because every strategy strictly decreases a
/// well-founded measure (node or edge count) and none of them ever
/// allocates a new node.
pub fn optimize(fsm: &mut Fsm, start: NodeId, level: u8) {
    let level = level.min(MAX_LEVEL);
    if level == 0 {
        return;
    }

    let mut changed = true;
    while changed {
        changed = false;
        for strategy in &STRATEGIES[..level as usize] {
            while strategy(fsm, start) {
                changed = true;
            }
        }
    }
}
