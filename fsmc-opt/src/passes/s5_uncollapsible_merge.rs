//! S5 — opportunistic merge across nodes labelled uncollapsible.
//!
//! Same rewrite as S1, but instead of trusting the `collapsible` bit it
//! recomputes a stronger "truly collapsible" predicate straight from the
//! graph shape: a single, unconditional incoming edge, no entry gate, at
//! least one outgoing edge, and not the start node. This is aimed at the
//! less-optimized structure `BREAK`/`CONTINUE`/`RETURN` leave behind, and
//! is explicitly the most aggressive strategy — only enabled at the
//! highest optimization level.
//!
//! The predicate only inspects the incoming edge it finds, not every edge
//! in the graph that might alias the same target through an intervening
//! condition; in principle this could, in a shape none of the reference
//! scenarios exhibit, elide a condition check that a different incoming
//! path relied on. Implemented exactly as specified rather than tightened.

use crate::traversal::incoming;
use fsmc_ir::{Fsm, NodeId};
use std::collections::{HashSet, VecDeque};

fn is_truly_collapsible(fsm: &Fsm, start: NodeId, node: NodeId) -> bool {
    if node == start {
        return false;
    }
    let back = incoming(fsm, start, node);
    back.len() == 1
        && fsm.node(back[0].source).transitions[back[0].index].is_unconditional()
        && fsm.node(node).entry_condition.is_empty()
        && !fsm.node(node).transitions.is_empty()
}

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

            if transition.is_unconditional() && is_truly_collapsible(fsm, start, next) {
                let next_code = fsm.node(next).code_block.clone();
                let next_transitions = fsm.node(next).transitions.clone();
                let cur_node = fsm.node_mut(cur);
                if cur_node.code_block.is_empty() {
                    cur_node.code_block = next_code;
                } else if !next_code.is_empty() {
                    cur_node.code_block.extend(next_code);
                }
                cur_node.transitions = next_transitions;
                log::debug!("S5 merged uncollapsible node {cur:?}");
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
