//! S2 — bypass a chained empty state.
//!
//! An empty, unconditionally-forwarding node with exactly one incoming
//! edge is pure indirection once its successor has no entry gate; redirect
//! the incoming edge straight to the successor and let the node go
//! unreferenced.

use crate::traversal::incoming;
use fsmc_ir::{Fsm, NodeId};
use std::collections::{HashSet, VecDeque};

pub fn run(fsm: &mut Fsm, start: NodeId) -> bool {
    let mut changed_overall = false;
    while step(fsm, start) {
        changed_overall = true;
    }
    changed_overall
}

fn step(fsm: &mut Fsm, start: NodeId) -> bool {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);

    while let Some(cur) = queue.pop_front() {
        let transitions_len = fsm.node(cur).transitions.len();
        if transitions_len == 0 {
            continue;
        } else if transitions_len == 1 {
            let transition = fsm.node(cur).transitions[0].clone();
            let next = transition.target;
            debug_assert!(transition.code_block.is_empty());

            let candidate = fsm.node(cur).collapsible
                && fsm.node(cur).code_block.is_empty()
                && transition.is_unconditional()
                && fsm.node(next).entry_condition.is_empty();

            if candidate {
                let back = incoming(fsm, start, cur);
                if back.len() == 1 {
                    let r = back[0];
                    fsm.node_mut(r.source).transitions[r.index].target = next;
                    log::debug!("S2 bypassed chained empty node {cur:?}");
                    return true;
                }
            }

            if seen.insert(next) {
                queue.push_back(next);
            }
        } else {
            for transition in &fsm.node(cur).transitions {
                if seen.insert(transition.target) {
                    queue.push_back(transition.target);
                }
            }
        }
    }

    false
}
