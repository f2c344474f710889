//! Graphviz DOT visualization, grounded on `code_gen.py`'s
//! `fsm_to_graphviz_dot`. Shares `assign_ids` with the emitter so a DOT
//! diagram's state numbers always agree with the emitted code.

use crate::ids::assign_ids;
use fsmc_ir::{Fsm, NodeId};
use std::collections::HashMap;

fn escape(code: &str) -> String {
    code.replace('"', "''").replace('\\', "\\\\")
}

fn state_label(id: u32) -> String {
    format!("s{id}")
}

fn state_shape(fsm: &Fsm, node_id: NodeId, debug: bool) -> &'static str {
    if node_id == fsm.start {
        "Msquare"
    } else if debug && fsm.node(node_id).collapsible {
        "ellipse"
    } else {
        "rect"
    }
}

/// Renders `fsm` as a DOT digraph. In `debug` mode, collapsible and
/// non-collapsible states are drawn with different shapes.
pub fn render(fsm: &Fsm, debug: bool) -> String {
    let (ids, ordered) = assign_ids(fsm, fsm.start);
    let mut out = String::from("digraph {\n");

    for &(node_id, _) in &ordered {
        let node = fsm.node(node_id);
        let shape = state_shape(fsm, node_id, debug);
        let label = if node.entry_condition.is_empty() {
            if node.code_block.is_empty() {
                "_".to_string()
            } else {
                node.code_block
                    .iter()
                    .map(|l| escape(l))
                    .collect::<Vec<_>>()
                    .join("\\n")
            }
        } else if node.code_block.is_empty() {
            format!("ENTRY: {}", escape(&node.entry_condition))
        } else {
            format!(
                "ENTRY: {}\\n{}",
                escape(&node.entry_condition),
                node.code_block
                    .iter()
                    .map(|l| escape(l))
                    .collect::<Vec<_>>()
                    .join("\\n")
            )
        };
        out.push_str(&format!(
            "   {} [shape={}, label=\"{}\"];\n",
            state_label(ids[&node_id]),
            shape,
            label
        ));
    }

    out.push('\n');
    for &(node_id, _) in &ordered {
        let node = fsm.node(node_id);
        for transition in &node.transitions {
            out.push_str(&render_edge(&ids, node_id, transition));
        }
    }

    if !fsm.globals.is_empty() {
        out.push_str("\n    global_vars [shape=rect, label=\"Global Variables\\n");
        for g in &fsm.globals {
            out.push_str(&format!("{} {};\\n", g.ty, g.name));
        }
        out.push_str("\"]\n");
    }

    out.push('}');
    out
}

fn render_edge(
    ids: &HashMap<NodeId, u32>,
    source: NodeId,
    transition: &fsmc_ir::Transition,
) -> String {
    let src = state_label(ids[&source]);
    let dst = state_label(ids[&transition.target]);

    if transition.condition.is_empty() {
        if transition.code_block.is_empty() {
            format!("   {src} -> {dst};\n")
        } else {
            let lines = transition
                .code_block
                .iter()
                .map(|l| escape(l))
                .collect::<Vec<_>>()
                .join("\\n");
            format!("   {src} -> {dst} [label=\"-----\\n{lines}\"];\n")
        }
    } else if transition.code_block.is_empty() {
        format!(
            "   {src} -> {dst} [label=\"{}\"];\n",
            escape(&transition.condition)
        )
    } else {
        let lines = transition
            .code_block
            .iter()
            .map(|l| escape(l))
            .collect::<Vec<_>>()
            .join("\\n");
        format!(
            "   {src} -> {dst} [label=\"{}\\n-----\\n{lines}\"];\n",
            escape(&transition.condition)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_ir::{Program, Stmt, StmtKind};

    #[test]
    fn renders_a_valid_digraph_shell_with_escaped_quotes() {
        let program = Program::new(
            "f",
            Stmt::new(StmtKind::Line("x = \"hi\"".to_string())),
        );
        let fsm = fsmc_opt::assemble(&program, 4).unwrap();
        let dot = render(&fsm, false);
        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("''hi''"));
    }
}
