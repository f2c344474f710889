//! End-to-end scenarios exercising only the public `fsmc` API, mirroring
//! how calyx's root crate keeps fixture-driven tests separate from each
//! member crate's own unit tests.

use fsmc::ir::{Case, Program, Stmt, StmtKind};
use fsmc_opt::traversal::forward_reachable;

fn line(code: &str) -> Stmt {
    Stmt::new(StmtKind::Line(code.to_string()))
}

fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Block(stmts))
}

fn reachable_count(program: &Program, level: u8) -> usize {
    let fsm = fsmc::assemble(program, level).unwrap();
    forward_reachable(&fsm, fsm.start).len()
}

#[test]
fn e1_straight_line_collapses_to_two_states() {
    let program = Program::new("f", block(vec![line("a"), line("b")]));
    assert_eq!(reachable_count(&program, 4), 2);
}

#[test]
fn e2_while_loop_keeps_three_states() {
    let program = Program::new(
        "f",
        block(vec![Stmt::new(StmtKind::While {
            condition: "true".to_string(),
            body: Box::new(block(vec![line("a"), line("b")])),
        })]),
    );
    assert_eq!(reachable_count(&program, 4), 3);
}

#[test]
fn e3_do_while_collapses_to_two_states() {
    let program = Program::new(
        "f",
        block(vec![Stmt::new(StmtKind::DoWhile {
            condition: "true".to_string(),
            body: Box::new(block(vec![line("a"), line("b")])),
        })]),
    );
    assert_eq!(reachable_count(&program, 4), 2);
}

#[test]
fn e4_else_if_chain_flattens_to_five_states() {
    let program = Program::new(
        "f",
        Stmt::new(StmtKind::If(vec![
            Case {
                condition: "a==1".to_string(),
                body: line("p1"),
            },
            Case {
                condition: "a==2".to_string(),
                body: line("p2"),
            },
        ])),
    );
    assert_eq!(reachable_count(&program, 4), 5);
}

#[test]
fn e5_loop_then_if_keeps_five_states() {
    let program = Program::new(
        "f",
        block(vec![
            Stmt::new(StmtKind::While {
                condition: "a==0".to_string(),
                body: Box::new(line("p0")),
            }),
            Stmt::new(StmtKind::If(vec![Case {
                condition: "a==1".to_string(),
                body: line("p1"),
            }])),
        ]),
    );
    assert_eq!(reachable_count(&program, 4), 5);
}

#[test]
fn e6_do_while_with_timed_waits_keeps_seven_states_and_one_timer_decl() {
    let program = Program::new(
        "f",
        Stmt::new(StmtKind::DoWhile {
            condition: "true".to_string(),
            body: Box::new(Stmt::new(StmtKind::If(vec![
                Case {
                    condition: "a==0".to_string(),
                    body: block(vec![
                        line("b++"),
                        Stmt::new(StmtKind::Wait("100".to_string())),
                    ]),
                },
                Case {
                    condition: "b==0".to_string(),
                    body: block(vec![
                        line("b--"),
                        Stmt::new(StmtKind::Wait("200".to_string())),
                    ]),
                },
            ]))),
        }),
    );

    let fsm = fsmc::assemble(&program, 4).unwrap();
    assert_eq!(forward_reachable(&fsm, fsm.start).len(), 7);
    assert_eq!(fsm.global_init_block.len(), 1);
    assert!(fsm.global_init_block[0].contains("__DECLARE_TIME_VARIABLE"));
}

#[test]
fn optimization_level_is_monotone_in_node_count() {
    let program = Program::new(
        "f",
        block(vec![Stmt::new(StmtKind::While {
            condition: "a==0".to_string(),
            body: Box::new(block(vec![line("p0"), line("p1")])),
        })]),
    );

    let mut previous = None;
    for level in 0..=5u8 {
        let count = reachable_count(&program, level);
        if let Some(prev) = previous {
            assert!(count <= prev, "level {level} grew the node count");
        }
        previous = Some(count);
    }
}

#[test]
fn optimize_reaches_a_fix_point() {
    let program = Program::new(
        "f",
        Stmt::new(StmtKind::DoWhile {
            condition: "true".to_string(),
            body: Box::new(Stmt::new(StmtKind::If(vec![
                Case {
                    condition: "a==0".to_string(),
                    body: block(vec![
                        line("b++"),
                        Stmt::new(StmtKind::Wait("100".to_string())),
                    ]),
                },
                Case {
                    condition: "b==0".to_string(),
                    body: block(vec![
                        line("b--"),
                        Stmt::new(StmtKind::Wait("200".to_string())),
                    ]),
                },
            ]))),
        }),
    );

    let level = 5;
    let mut fsm = fsmc::assemble(&program, level).unwrap();
    let reached_before = forward_reachable(&fsm, fsm.start).len();

    fsmc_opt::optimize(&mut fsm, fsm.start, level);
    let reached_after = forward_reachable(&fsm, fsm.start).len();

    assert_eq!(reached_before, reached_after);
}

#[test]
fn level_above_five_is_clamped_to_five() {
    let program = Program::new("f", block(vec![line("a"), line("b")]));
    assert_eq!(reachable_count(&program, 4), reachable_count(&program, 255));
}

#[test]
fn emission_is_deterministic() {
    let program = Program::new("f", block(vec![line("a"), line("b")]));
    let fsm = fsmc::assemble(&program, 4).unwrap();
    let first = fsmc::emit_code(&fsm, fsmc::EmitOptions::default());
    let second = fsmc::emit_code(&fsm, fsmc::EmitOptions::default());
    assert_eq!(first, second);
}

#[test]
fn dot_and_mermaid_agree_with_emitted_state_ids() {
    let program = Program::new(
        "f",
        block(vec![line("a"), line("b")]),
    );
    let fsm = fsmc::assemble(&program, 0).unwrap();
    let dot = fsmc::emit_dot(&fsm);
    let mermaid = fsmc::emit_mermaid(&fsm);
    assert!(dot.contains("s0"));
    assert!(mermaid.contains("```mermaid"));
}
