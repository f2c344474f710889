//! C/C++ code emission.
//!
//! Grounded on `code_gen.py`'s `generate_code_from_FSM`/`CPP_CODE_*`
//! rendering templates for the exact text shape, and on
//! `calyx_backend::verilog`'s `fn emit_component<F: io::Write>(..., f: &mut
//! F) -> io::Result<()>` convention for how the writer is threaded through:
//! every render function here takes a generic `io::Write` sink and a
//! `render_to_string` wrapper at the bottom satisfies the `-> String`
//! public interface.

use crate::ids::assign_ids;
use crate::templates;
use fsmc_ir::{Fsm, Node, NodeId};
use std::io::{self, Write};

/// Controls which optional driver functions accompany the state-dispatch
/// function itself.
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions {
    pub with_fixed_iteration: bool,
    pub with_min_runtime: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            with_fixed_iteration: true,
            with_min_runtime: true,
        }
    }
}

/// Renders `fsm`'s C/C++ function body into `w`. Never interprets
/// `condition` / `entry_condition` / `code_block` text — they are copied
/// verbatim.
pub fn emit_component<W: Write>(fsm: &Fsm, opts: EmitOptions, w: &mut W) -> io::Result<()> {
    let (ids, ordered) = assign_ids(fsm, fsm.start);

    for global in &fsm.globals {
        writeln!(w, "{} {};", global.ty, global.name)?;
    }
    for line in &fsm.global_init_block {
        writeln!(w, "{line}")?;
    }

    writeln!(w)?;
    writeln!(w, "{}", templates::fsm_meta_variable_declaration(&fsm.name))?;
    writeln!(w)?;
    writeln!(w, "{}", templates::function_header(&fsm.name))?;

    for &(node_id, state_id) in &ordered {
        emit_state(fsm, &fsm.name, fsm.node(node_id), state_id, &ids, w)?;
    }

    writeln!(w, "}}")?;
    writeln!(w)?;

    if opts.with_fixed_iteration {
        emit_fixed_iteration(&fsm.name, w)?;
    }
    if opts.with_min_runtime {
        emit_min_runtime(&fsm.name, w)?;
    }

    Ok(())
}

fn emit_state<W: Write>(
    fsm: &Fsm,
    fsm_name: &str,
    state: &Node,
    state_id: u32,
    ids: &std::collections::HashMap<NodeId, u32>,
    w: &mut W,
) -> io::Result<()> {
    writeln!(w, "    {}", templates::state_header(fsm_name, state_id))?;

    if !state.entry_condition.is_empty() {
        writeln!(
            w,
            "        {}",
            templates::state_entry_condition(&state.entry_condition)
        )?;
        writeln!(w)?;
    }

    for line in &state.code_block {
        writeln!(w, "        {line}")?;
    }
    writeln!(w)?;

    for transition in &state.transitions {
        let target_id = ids[&transition.target];
        if transition.is_unconditional() {
            for line in &transition.code_block {
                writeln!(w, "        {line}")?;
            }
            writeln!(w, "        {}", templates::change_state(fsm_name, target_id))?;
            writeln!(w, "        return;")?;
        } else {
            writeln!(w, "        {}", templates::transition_header(&transition.condition))?;
            for line in &transition.code_block {
                writeln!(w, "            {line}")?;
            }
            writeln!(w, "            {}", templates::change_state(fsm_name, target_id))?;
            writeln!(w, "            return;")?;
            writeln!(w, "        }}")?;
        }
    }

    if state.transitions.is_empty() {
        writeln!(w, "        return;")?;
    }

    writeln!(w, "    }}")?;
    Ok(())
}

fn emit_fixed_iteration<W: Write>(fsm_name: &str, w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", templates::fixed_iteration_header(fsm_name))?;
    writeln!(w, "    {}", templates::fixed_iteration_loop(fsm_name))?;
    writeln!(w, "}}")?;
    Ok(())
}

fn emit_min_runtime<W: Write>(fsm_name: &str, w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", templates::min_runtime_declare_time_variable(fsm_name))?;
    writeln!(w)?;
    writeln!(w, "{}", templates::min_runtime_header(fsm_name))?;
    writeln!(w, "    {}", templates::min_runtime_register_time(fsm_name))?;
    let is_passed = templates::min_runtime_is_time_passed(fsm_name, "ms");
    writeln!(w, "    {}", templates::min_runtime_loop(&is_passed))?;
    writeln!(w, "        {fsm_name}();")?;
    writeln!(w, "    }}")?;
    writeln!(w, "}}")?;
    Ok(())
}

/// Renders `fsm` to a `String`, satisfying the `emit_code(fsm, opts) ->
/// string` external interface.
pub fn render_to_string(fsm: &Fsm, opts: EmitOptions) -> String {
    let mut buf = Vec::new();
    emit_component(fsm, opts, &mut buf).expect("writing to a Vec<u8> never fails");
    String::from_utf8(buf).expect("emission only ever writes valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmc_ir::{Program, Stmt, StmtKind};

    fn line(code: &str) -> Stmt {
        Stmt::new(StmtKind::Line(code.to_string()))
    }

    #[test]
    fn emission_contains_the_state_id_contract() {
        let program = Program::new(
            "blink",
            Stmt::new(StmtKind::Block(vec![line("a"), line("b")])),
        );
        let fsm = fsmc_opt::assemble(&program, 4).unwrap();
        let code = render_to_string(&fsm, EmitOptions::default());

        assert!(code.contains("__FSM_META_VARIABLE_DECLARATION(blink);"));
        assert!(code.contains("__CURRENT_STATE(blink) == 0"));
        assert!(code.contains("__CURRENT_STATE(blink) == 1"));
        assert!(code.contains("void blink() {"));
        assert!(code.contains("void blink_fixed_iteration(unsigned int count) {"));
        assert!(code.contains("void blink_min_runtime(unsigned long ms) {"));
    }

    #[test]
    fn terminal_state_returns_unconditionally() {
        let program = Program::new("f", line("a"));
        let fsm = fsmc_opt::assemble(&program, 0).unwrap();
        let code = render_to_string(&fsm, EmitOptions::default());
        // With no optimization the terminal state has no transitions and
        // must fall through to a bare `return;`.
        assert!(code.contains("return;"));
    }
}
