//! State-ID assignment shared by the C emitter and both visualizers, so a
//! DOT diagram, a Mermaid diagram, and the emitted code always agree on how
//! a given FSM is numbered.
//!
//! `start` is always `0`, the terminal is always `1`, everything else
//! starts at `10` — the gap between `1` and `10` is a deliberate reserved
//! range, not an accident, and implementations must preserve it.

use fsmc_ir::{Fsm, NodeId};
use fsmc_opt::traversal::{forward_reachable, terminal};
use std::collections::HashMap;

pub const START_ID: u32 = 0;
pub const TERMINAL_ID: u32 = 1;
pub const FIRST_USER_ID: u32 = 10;

/// Maps every reachable node to its emitted integer ID, and returns the
/// nodes ordered by that ID (the order the emitter renders states in).
pub fn assign_ids(fsm: &Fsm, start: NodeId) -> (HashMap<NodeId, u32>, Vec<(NodeId, u32)>) {
    let reachable = forward_reachable(fsm, start);
    let terminal_id = terminal(fsm, start);

    let mut ids = HashMap::with_capacity(reachable.len());
    let mut counter = FIRST_USER_ID;

    for &node in &reachable {
        let id = if node == start {
            START_ID
        } else if Some(node) == terminal_id {
            TERMINAL_ID
        } else {
            let id = counter;
            counter += 1;
            id
        };
        ids.insert(node, id);
    }

    let mut ordered: Vec<(NodeId, u32)> = ids.iter().map(|(&n, &i)| (n, i)).collect();
    ordered.sort_by_key(|&(_, id)| id);

    (ids, ordered)
}
