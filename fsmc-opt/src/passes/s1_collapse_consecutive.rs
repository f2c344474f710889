//! S1 — collapse consecutive states.
//!
//! `A -> B` collapses into a single node when `A` has exactly one,
//! unconditional outgoing edge and `B` is collapsible: `B`'s code is
//! appended onto `A`'s and `A` inherits `B`'s transitions outright.

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

            if transition.is_unconditional() && fsm.node(next).collapsible {
                let next_code = fsm.node(next).code_block.clone();
                let next_transitions = fsm.node(next).transitions.clone();
                let cur_node = fsm.node_mut(cur);
                if cur_node.code_block.is_empty() {
                    cur_node.code_block = next_code;
                } else if !next_code.is_empty() {
                    cur_node.code_block.extend(next_code);
                }
                cur_node.transitions = next_transitions;
                log::debug!("S1 collapsed consecutive states into node {cur:?}");
                return true;
            } else if seen.insert(next) {
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
