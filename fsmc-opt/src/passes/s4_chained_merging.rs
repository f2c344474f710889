//! S4 — chained merging through a transparent junction.
//!
//! A node that does nothing but forward unconditionally into a node with
//! no entry gate is a transparent junction; every such junction is merged
//! away. If the junction has incoming edges, they are retargeted past it.
//! If it has none — i.e. it *is* the start node — the successor's shape is
//! copied into it instead, so the FSM's externally-visible start-node
//! identity survives the merge.
//!
//! This is the only strategy that may fold away a node marked
//! `collapsible = false`; the entry-condition-emptiness precondition on
//! both sides keeps behavior unchanged regardless.

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

            let candidate = fsm.node(cur).code_block.is_empty()
                && fsm.node(cur).entry_condition.is_empty()
                && transition.is_unconditional()
                && !fsm.node(next).transitions.is_empty()
                && fsm.node(next).entry_condition.is_empty();

            if candidate {
                let back = incoming(fsm, start, cur);
                if back.is_empty() {
                    // `cur` is the start node: absorb `next`'s shape.
                    let next_transitions = fsm.node(next).transitions.clone();
                    let next_collapsible = fsm.node(next).collapsible;
                    let next_code = fsm.node(next).code_block.clone();

                    let cur_node = fsm.node_mut(cur);
                    cur_node.transitions = next_transitions;
                    cur_node.collapsible = next_collapsible;
                    cur_node.code_block = next_code;

                    let next_back = incoming(fsm, start, next);
                    for r in next_back {
                        fsm.node_mut(r.source).transitions[r.index].target = cur;
                    }
                } else {
                    for r in back {
                        fsm.node_mut(r.source).transitions[r.index].target = next;
                    }
                }
                log::debug!("S4 merged transparent junction at node {cur:?}");
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
