//! Builds a tiny blink loop by hand (parsing is out of this crate's scope),
//! assembles it at the highest optimization level, and prints the emitted
//! C function alongside both diagram formats.

use fsmc::ir::{Program, Stmt, StmtKind};

fn line(code: &str) -> Stmt {
    Stmt::new(StmtKind::Line(code.to_string()))
}

fn main() {
    env_logger::init();

    let program = Program::new(
        "blink",
        Stmt::new(StmtKind::While {
            condition: "true".to_string(),
            body: Box::new(Stmt::new(StmtKind::Block(vec![
                line("led_on()"),
                Stmt::new(StmtKind::Wait("100".to_string())),
                line("led_off()"),
                Stmt::new(StmtKind::Wait("100".to_string())),
            ]))),
        }),
    );

    let fsm = fsmc::assemble(&program, 5).expect("blink always has a reachable terminal");

    println!("// ---- C/C++ ----");
    println!("{}", fsmc::emit_code(&fsm, fsmc::EmitOptions::default()));

    println!("// ---- DOT ----");
    println!("{}", fsmc::emit_dot(&fsm));

    println!("// ---- Mermaid ----");
    println!("{}", fsmc::emit_mermaid(&fsm));
}
