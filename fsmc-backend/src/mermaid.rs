//! Mermaid flowchart visualization, grounded on `code_gen.py`'s
//! `fsm_to_mermaid`. Shares `assign_ids` with the emitter and the DOT
//! visualizer so all three agree on state numbering.

use crate::ids::assign_ids;
use fsmc_ir::{Fsm, NodeId};
use std::collections::HashMap;

fn escape(code: &str) -> String {
    code.replace('"', "''").replace('\\', "\\\\")
}

fn state_shape(fsm: &Fsm, node_id: NodeId, debug: bool) -> (&'static str, &'static str) {
    if node_id == fsm.start {
        ("[[", "]]")
    } else if debug && fsm.node(node_id).collapsible {
        ("([", "])")
    } else {
        ("[", "]")
    }
}

/// Renders `fsm` as a Mermaid `flowchart TB` diagram, fenced in a
/// ` ```mermaid ` code block.
pub fn render(fsm: &Fsm, debug: bool) -> String {
    let (ids, ordered) = assign_ids(fsm, fsm.start);
    let mut out = String::from("```mermaid\nflowchart TB\n");

    for &(node_id, id) in &ordered {
        let node = fsm.node(node_id);
        let (open, close) = state_shape(fsm, node_id, debug);

        if node.entry_condition.is_empty() {
            if node.code_block.is_empty() {
                out.push_str(&format!("   {id}{open}_{close}\n"));
            } else {
                let body = node
                    .code_block
                    .iter()
                    .map(|l| escape(l))
                    .collect::<Vec<_>>()
                    .join("\n");
                out.push_str(&format!("   {id}{open}\"`{body}`\"{close}\n"));
            }
        } else if node.code_block.is_empty() {
            out.push_str(&format!(
                "   {id}{open}\"`ENTRY: {}`\"{close}\n",
                escape(&node.entry_condition)
            ));
        } else {
            let body = node
                .code_block
                .iter()
                .map(|l| escape(l))
                .collect::<Vec<_>>()
                .join("\n");
            out.push_str(&format!(
                "   {id}{open}\"`ENTRY: {}\n{body}`\"{close}\n",
                escape(&node.entry_condition)
            ));
        }
    }

    out.push('\n');
    for &(node_id, id) in &ordered {
        for transition in &fsm.node(node_id).transitions {
            out.push_str(&render_edge(&ids, id, transition));
        }
    }

    if !fsm.globals.is_empty() {
        out.push_str("\n    global_vars[\"`Global Variables\n");
        for g in &fsm.globals {
            out.push_str(&format!("        {} {};\n", g.ty, g.name));
        }
        out.push_str("    `\"]\n");
    }

    out.push_str("```");
    out
}

fn render_edge(ids: &HashMap<NodeId, u32>, source_id: u32, transition: &fsmc_ir::Transition) -> String {
    let target_id = ids[&transition.target];

    if transition.condition.is_empty() {
        if transition.code_block.is_empty() {
            format!("   {source_id} --> {target_id}\n")
        } else {
            let lines = transition
                .code_block
                .iter()
                .map(|l| escape(l))
                .collect::<Vec<_>>()
                .join("\n");
            format!("   {source_id} -->|\"`*------*\n{lines}`\"| {target_id}\n")
        }
    } else if transition.code_block.is_empty() {
        format!(
            "   {source_id} -->|\"`{}`\"| {target_id}\n",
            escape(&transition.condition)
        )
    } else {
        let lines = transition
            .code_block
            .iter()
            .map(|l| escape(l))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "   {source_id} -->|\"`{}\n*------*\n{lines}`\"| {target_id}\n",
            escape(&transition.condition)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_ir::{Program, Stmt, StmtKind};

    #[test]
    fn renders_a_fenced_mermaid_flowchart() {
        let program = Program::new("f", Stmt::new(StmtKind::Line("a".to_string())));
        let fsm = fsmc_opt::assemble(&program, 4).unwrap();
        let mermaid = render(&fsm, false);
        assert!(mermaid.starts_with("```mermaid\nflowchart TB\n"));
        assert!(mermaid.trim_end().ends_with("```"));
    }
}
