//! S3 — flatten a chained branching node ("else-if" chains).
//!
//! When a node's trailing "else" edge leads to another, empty, collapsible
//! branching node, splice that successor's transitions directly onto the
//! predecessor's transition list in place of the single else edge. This is
//! what turns `IF (a) {...} ELSE IF (b) {...}` into one flat decision node.

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
            let next = fsm.node(cur).transitions[0].target;
            if seen.insert(next) {
                queue.push_back(next);
            }
        } else {
            let last = fsm.node(cur).transitions[transitions_len - 1].clone();
            if last.is_unconditional() {
                let next = last.target;
                let candidate = fsm.node(next).code_block.is_empty()
                    && fsm.node(next).entry_condition.is_empty()
                    && fsm.node(next).transitions.len() >= 2
                    && fsm.node(next).collapsible;

                if candidate {
                    let next_transitions = fsm.node(next).transitions.clone();
                    let cur_node = fsm.node_mut(cur);
                    cur_node.transitions.pop();
                    cur_node.transitions.extend(next_transitions);
                    log::debug!("S3 flattened chained branching at node {cur:?}");
                    return true;
                }
            }

            for transition in &fsm.node(cur).transitions {
                if seen.insert(transition.target) {
                    queue.push_back(transition.target);
                }
            }
        }
    }

    false
}
