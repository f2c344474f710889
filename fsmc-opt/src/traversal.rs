//! Graph queries shared by the optimizer and the backend.
//!
//! None of these mutate the FSM and none cache anything on it — each call
//! allocates its own working set, so they are safe to call repeatedly in the
//! middle of a rewrite fix-point. Grounded on the assembler's own
//! `traverse_fsm` / `trace_back_transition` / `get_ending_node_of_fsm` /
//! `check_wait_statement_usage` helpers.

use fsmc_ir::{Fsm, NodeId};
use std::collections::{HashSet, VecDeque};

/// All nodes reachable from `start`, visited breadth-first.
pub fn forward_reachable(fsm: &Fsm, start: NodeId) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    let mut order = Vec::new();

    seen.insert(start);
    queue.push_back(start);

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for transition in &fsm.node(id).transitions {
            if seen.insert(transition.target) {
                queue.push_back(transition.target);
            }
        }
    }

    order
}

/// A transition in the reachable graph, identified by its source node and
/// index into that node's `transitions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRef {
    pub source: NodeId,
    pub index: usize,
}

/// Every transition in the graph reachable from `start` whose target is
/// `target`. Order is unspecified, matching the reference implementation's
/// "the order is random" note.
pub fn incoming(fsm: &Fsm, start: NodeId, target: NodeId) -> Vec<TransitionRef> {
    let mut refs = Vec::new();
    for node_id in forward_reachable(fsm, start) {
        for (index, transition) in fsm.node(node_id).transitions.iter().enumerate() {
            if transition.target == target {
                refs.push(TransitionRef {
                    source: node_id,
                    index,
                });
            }
        }
    }
    refs
}

/// The unique reachable node with no outgoing transitions, if any.
/// Invariant 3.3(1) guarantees at most one such node exists in a correctly
/// lowered FSM.
pub fn terminal(fsm: &Fsm, start: NodeId) -> Option<NodeId> {
    forward_reachable(fsm, start)
        .into_iter()
        .find(|&id| fsm.node(id).transitions.is_empty())
}

/// The sentinel every `WAIT(ms)` entry condition begins with. `uses_wait`
/// must be checked before optimization runs, since rewrites may merge code
/// blocks but never relocate an `entry_condition` between nodes.
const IS_TIME_PASSED_SENTINEL: &str = "__IS_TIME_PASSED(";

/// True iff any reachable node's entry condition is a `WAIT(ms)` gate.
pub fn uses_wait(fsm: &Fsm, start: NodeId) -> bool {
    forward_reachable(fsm, start)
        .into_iter()
        .any(|id| fsm.node(id).entry_condition.starts_with(IS_TIME_PASSED_SENTINEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_ir::{Node, Transition};

    #[test]
    fn forward_reachable_follows_a_cycle_without_looping_forever() {
        let mut fsm = Fsm::empty("f");
        let a = fsm.alloc(Node::new());
        let b = fsm.alloc(Node::new());
        fsm.node_mut(a).push_transition(Transition::unconditional(b));
        fsm.node_mut(b).push_transition(Transition::unconditional(a));

        let reached = forward_reachable(&fsm, a);
        assert_eq!(reached.len(), 2);
        assert!(reached.contains(&a));
        assert!(reached.contains(&b));
    }

    #[test]
    fn terminal_finds_the_sink() {
        let mut fsm = Fsm::empty("f");
        let a = fsm.alloc(Node::new());
        let b = fsm.alloc(Node::new());
        fsm.node_mut(a).push_transition(Transition::unconditional(b));
        assert_eq!(terminal(&fsm, a), Some(b));
    }

    #[test]
    fn uses_wait_detects_the_sentinel_entry_condition() {
        let mut fsm = Fsm::empty("f");
        let a = fsm.alloc(Node::with_entry_condition("__IS_TIME_PASSED(f, 100)"));
        assert!(uses_wait(&fsm, a));

        let mut fsm2 = Fsm::empty("f");
        let b = fsm2.alloc(Node::new());
        assert!(!uses_wait(&fsm2, b));
    }
}
