//! AST → raw FSM lowering.
//!
//! Each statement lowers to a `Lowered` record: the entry/exit node of the
//! fragment it built, plus three *pending* lists of placeholder nodes
//! created by `BREAK`/`CONTINUE`/`RETURN`. A pending node carries no code
//! and no transitions; it is deferred wiring, consumed (transitions
//! cleared and rewritten) by the nearest enclosing loop or, for `RETURN`
//! and anything that escapes every loop, by the program root. This mirrors
//! `ast_types.py`'s `to_fsm`/`TO_FSM_Return` one-for-one; only the grouping
//! into a single recursive function (matched on `StmtKind`) rather than one
//! `to_fsm` method per AST class differs, since Rust favors an exhaustive
//! `match` over per-variant dynamic dispatch here.

use crate::templates;
use fsmc_ir::{Case, Fsm, GlobalVar, Node, NodeId, Program, Stmt, StmtKind, Transition};
use fsmc_utils::{Error, FsmcResult};

/// Bookkeeping threaded back up through the lowering recursion.
struct Lowered {
    start: NodeId,
    end: NodeId,
    pending_return: Vec<NodeId>,
    pending_break: Vec<NodeId>,
    pending_continue: Vec<NodeId>,
}

impl Lowered {
    fn leaf(node: NodeId) -> Self {
        Lowered {
            start: node,
            end: node,
            pending_return: Vec::new(),
            pending_break: Vec::new(),
            pending_continue: Vec::new(),
        }
    }

    fn absorb(&mut self, mut other: Lowered) {
        self.pending_return.append(&mut other.pending_return);
        self.pending_break.append(&mut other.pending_break);
        self.pending_continue.append(&mut other.pending_continue);
    }
}

/// Clears every transition on each of `pending` and replaces it with a
/// single unconditional edge to `target` — the "rewrite the deferred exit"
/// step every loop (and the program root) performs on its own pending
/// lists.
fn redirect(fsm: &mut Fsm, pending: &[NodeId], target: NodeId) {
    for &node_id in pending {
        let node = fsm.node_mut(node_id);
        node.transitions.clear();
        node.push_transition(Transition::unconditional(target));
    }
}

fn lower_stmt(fsm: &mut Fsm, stmt: &Stmt, fsm_name: &str) -> FsmcResult<Lowered> {
    match &stmt.kind {
        StmtKind::Line(code) => {
            let mut node = Node::new();
            node.push_code_line(format!("{code};"));
            Ok(Lowered::leaf(fsm.alloc(node)))
        }
        StmtKind::Ordinary(code) => {
            let mut node = Node::new();
            node.push_code_line(code.clone());
            Ok(Lowered::leaf(fsm.alloc(node)))
        }
        StmtKind::Block(stmts) => lower_block(fsm, stmts, fsm_name),
        StmtKind::If(cases) => lower_if(fsm, cases, fsm_name),
        StmtKind::While { condition, body } => lower_while(fsm, condition, body, fsm_name),
        StmtKind::DoWhile { condition, body } => lower_do_while(fsm, condition, body, fsm_name),
        StmtKind::For {
            init,
            condition,
            update,
            body,
        } => lower_for(fsm, init, condition, update, body, fsm_name),
        StmtKind::Declaration { ty, name, is_global } => {
            if *is_global {
                let node = fsm.alloc(Node::new());
                fsm.globals.push(GlobalVar {
                    ty: ty.clone(),
                    name: name.clone(),
                });
                Ok(Lowered::leaf(node))
            } else {
                let mut node = Node::new();
                node.push_code_line(templates::declare_local_variable(ty, name));
                Ok(Lowered::leaf(fsm.alloc(node)))
            }
        }
        StmtKind::DeclarationInit {
            ty,
            name,
            expr,
            is_global,
        } => {
            if *is_global {
                let mut node = Node::new();
                node.push_code_line(templates::local_variable_assignment(name, expr));
                let node_id = fsm.alloc(node);
                fsm.globals.push(GlobalVar {
                    ty: ty.clone(),
                    name: name.clone(),
                });
                Ok(Lowered::leaf(node_id))
            } else {
                let mut node = Node::new();
                node.push_code_line(templates::declare_local_variable_init(ty, name, expr));
                Ok(Lowered::leaf(fsm.alloc(node)))
            }
        }
        StmtKind::Wait(ms) => {
            if ms.is_empty() {
                // YIELD: always entered, no code, but the non-empty entry
                // condition forces the emitter's early-return and blocks
                // the optimizer from collapsing over the suspension point.
                let node = fsm.alloc(Node::with_entry_condition("true"));
                Ok(Lowered::leaf(node))
            } else {
                let mut register = Node::new();
                register.push_code_line(templates::register_time(fsm_name));
                let register_id = fsm.alloc(register);

                let entry = fsm.alloc(Node::with_entry_condition(templates::is_time_passed(
                    fsm_name, ms,
                )));

                fsm.node_mut(register_id)
                    .push_transition(Transition::unconditional(entry));

                Ok(Lowered {
                    start: register_id,
                    end: entry,
                    pending_return: Vec::new(),
                    pending_break: Vec::new(),
                    pending_continue: Vec::new(),
                })
            }
        }
        StmtKind::WaitUnless(condition) => {
            let node = fsm.alloc(Node::with_entry_condition(condition.clone()));
            Ok(Lowered::leaf(node))
        }
        StmtKind::Break => {
            let node = fsm.alloc(Node::new());
            Ok(Lowered {
                start: node,
                end: node,
                pending_return: Vec::new(),
                pending_break: vec![node],
                pending_continue: Vec::new(),
            })
        }
        StmtKind::Continue => {
            let node = fsm.alloc(Node::new());
            Ok(Lowered {
                start: node,
                end: node,
                pending_return: Vec::new(),
                pending_break: Vec::new(),
                pending_continue: vec![node],
            })
        }
        StmtKind::Return => {
            let node = fsm.alloc(Node::new());
            Ok(Lowered {
                start: node,
                end: node,
                pending_return: vec![node],
                pending_break: Vec::new(),
                pending_continue: Vec::new(),
            })
        }
    }
}

fn lower_block(fsm: &mut Fsm, stmts: &[Stmt], fsm_name: &str) -> FsmcResult<Lowered> {
    let start = fsm.alloc(Node::new());
    let mut acc = Lowered::leaf(start);
    let mut tail = start;

    for stmt in stmts {
        let lowered = lower_stmt(fsm, stmt, fsm_name)?;
        fsm.node_mut(tail)
            .push_transition(Transition::unconditional(lowered.start));
        tail = lowered.end;
        acc.absorb(lowered);
    }

    acc.end = tail;
    Ok(acc)
}

fn lower_if(fsm: &mut Fsm, cases: &[Case], fsm_name: &str) -> FsmcResult<Lowered> {
    let start = fsm.alloc(Node::new());
    let end = fsm.alloc(Node::uncollapsible());
    let mut acc = Lowered::leaf(start);
    acc.end = end;

    let mut has_else = false;
    for (i, case) in cases.iter().enumerate() {
        if case.condition.is_empty() {
            if i != cases.len() - 1 {
                return Err(Error::malformed_ast(
                    "an ELSE case must be the last case of an IF statement",
                ));
            }
            has_else = true;
        }

        let lowered = lower_stmt(fsm, &case.body, fsm_name)?;
        fsm.node_mut(start)
            .push_transition(Transition::conditional(case.condition.clone(), lowered.start));
        fsm.node_mut(lowered.end)
            .push_transition(Transition::unconditional(end));
        acc.absorb(lowered);
    }

    if !has_else {
        fsm.node_mut(start)
            .push_transition(Transition::unconditional(end));
    }

    Ok(acc)
}

fn lower_while(fsm: &mut Fsm, condition: &str, body: &Stmt, fsm_name: &str) -> FsmcResult<Lowered> {
    let header = fsm.alloc(Node::uncollapsible());
    let exit = fsm.alloc(Node::new());

    let lowered = lower_stmt(fsm, body, fsm_name)?;

    fsm.node_mut(header)
        .push_transition(Transition::conditional(condition, lowered.start));
    fsm.node_mut(header)
        .push_transition(Transition::unconditional(exit));

    redirect(fsm, &lowered.pending_continue, header);
    if !lowered.pending_break.is_empty() {
        redirect(fsm, &lowered.pending_break, exit);
        fsm.node_mut(exit).collapsible = false;
    }

    fsm.node_mut(lowered.end)
        .push_transition(Transition::unconditional(header));

    Ok(Lowered {
        start: header,
        end: exit,
        pending_return: lowered.pending_return,
        pending_break: Vec::new(),
        pending_continue: Vec::new(),
    })
}

fn lower_do_while(
    fsm: &mut Fsm,
    condition: &str,
    body: &Stmt,
    fsm_name: &str,
) -> FsmcResult<Lowered> {
    let header = fsm.alloc(Node::uncollapsible());
    let exit = fsm.alloc(Node::new());

    let lowered = lower_stmt(fsm, body, fsm_name)?;

    fsm.node_mut(header)
        .push_transition(Transition::unconditional(lowered.start));

    fsm.node_mut(lowered.end)
        .push_transition(Transition::conditional(condition, header));
    fsm.node_mut(lowered.end)
        .push_transition(Transition::unconditional(exit));

    redirect(fsm, &lowered.pending_continue, header);
    if !lowered.pending_break.is_empty() {
        redirect(fsm, &lowered.pending_break, exit);
        fsm.node_mut(exit).collapsible = false;
    }

    Ok(Lowered {
        start: header,
        end: exit,
        pending_return: lowered.pending_return,
        pending_break: Vec::new(),
        pending_continue: Vec::new(),
    })
}

fn lower_for(
    fsm: &mut Fsm,
    init: &Stmt,
    condition: &str,
    update: &Stmt,
    body: &Stmt,
    fsm_name: &str,
) -> FsmcResult<Lowered> {
    let start = fsm.alloc(Node::new());
    let header = fsm.alloc(Node::uncollapsible());
    let exit = fsm.alloc(Node::new());

    let lowered_init = lower_stmt(fsm, init, fsm_name)?;
    let lowered_update = lower_stmt(fsm, update, fsm_name)?;
    let lowered_body = lower_stmt(fsm, body, fsm_name)?;

    fsm.node_mut(start)
        .push_transition(Transition::unconditional(lowered_init.start));
    fsm.node_mut(lowered_init.end)
        .push_transition(Transition::unconditional(header));

    fsm.node_mut(header)
        .push_transition(Transition::conditional(condition, lowered_body.start));
    fsm.node_mut(header)
        .push_transition(Transition::unconditional(exit));

    fsm.node_mut(lowered_body.end)
        .push_transition(Transition::unconditional(lowered_update.start));
    fsm.node_mut(lowered_update.end)
        .push_transition(Transition::unconditional(header));

    // NOTE: `continue` is wired back to `start`, i.e. it re-runs `init`,
    // not `update`. This reproduces the reference implementation exactly
    // and is intentional — see the "for-loop continue" open question.
    redirect(fsm, &lowered_body.pending_continue, start);
    if !lowered_body.pending_break.is_empty() {
        redirect(fsm, &lowered_body.pending_break, exit);
        fsm.node_mut(exit).collapsible = false;
    }

    Ok(Lowered {
        start,
        end: exit,
        pending_return: lowered_body.pending_return,
        pending_break: Vec::new(),
        pending_continue: Vec::new(),
    })
}

/// Lowers a whole [`Program`] into a raw (unoptimized) [`Fsm`].
///
/// Any `BREAK`/`CONTINUE` that escapes every enclosing loop, and any
/// `RETURN`, is redirected to the program's own exit node rather than left
/// dangling — see the "top-level break/continue" open question.
pub fn lower_program(program: &Program) -> FsmcResult<Fsm> {
    let mut fsm = Fsm::empty(program.name.clone());
    let start = fsm.alloc(Node::uncollapsible());
    let end = fsm.alloc(Node::uncollapsible());
    fsm.start = start;

    let lowered = lower_stmt(&mut fsm, &program.body, &program.name)?;

    fsm.node_mut(start)
        .push_transition(Transition::unconditional(lowered.start));
    fsm.node_mut(lowered.end)
        .push_transition(Transition::unconditional(end));

    redirect(&mut fsm, &lowered.pending_continue, end);
    redirect(&mut fsm, &lowered.pending_break, end);
    redirect(&mut fsm, &lowered.pending_return, end);

    if crate::traversal::uses_wait(&fsm, fsm.start) {
        let line = templates::declare_time_variable(&program.name);
        fsm.global_init_block.push(line);
    }

    Ok(fsm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::forward_reachable;
    use fsmc_ir::StmtKind;

    fn line(code: &str) -> Stmt {
        Stmt::new(StmtKind::Line(code.to_string()))
    }

    fn block(stmts: Vec<Stmt>) -> Stmt {
        Stmt::new(StmtKind::Block(stmts))
    }

    #[test]
    fn empty_block_lowers_to_a_single_empty_node() {
        let mut fsm = Fsm::empty("f");
        let lowered = lower_block(&mut fsm, &[], "f").unwrap();
        assert_eq!(lowered.start, lowered.end);
        assert!(fsm.node(lowered.start).code_block.is_empty());
        assert!(fsm.node(lowered.start).transitions.is_empty());
    }

    #[test]
    fn program_redirects_dangling_break_to_program_end() {
        let program = Program::new(
            "f",
            block(vec![Stmt::new(StmtKind::Break), line("a")]),
        );
        let fsm = lower_program(&program).unwrap();
        let reached = forward_reachable(&fsm, fsm.start);
        let terminal_count = reached
            .iter()
            .filter(|&&id| fsm.node(id).transitions.is_empty())
            .count();
        assert_eq!(terminal_count, 1);
    }

    #[test]
    fn if_rejects_an_else_that_is_not_last() {
        let cases = vec![
            Case {
                condition: String::new(),
                body: line("a"),
            },
            Case {
                condition: "x".to_string(),
                body: line("b"),
            },
        ];
        let mut fsm = Fsm::empty("f");
        let err = lower_if(&mut fsm, &cases, "f").unwrap_err();
        assert!(matches!(err, Error::MalformedAst(_)));
    }

    #[test]
    fn wait_ms_declares_timer_usage() {
        let program = Program::new(
            "f",
            block(vec![Stmt::new(StmtKind::Wait("100".to_string()))]),
        );
        let fsm = lower_program(&program).unwrap();
        assert_eq!(fsm.global_init_block.len(), 1);
        assert!(fsm.global_init_block[0].contains("__DECLARE_TIME_VARIABLE"));
    }
}
