//! C/C++ emission templates. Every macro name below is a stable wire
//! contract with the target platform's macro header; none of them may be
//! renamed.

pub fn fsm_meta_variable_declaration(fsm_name: &str) -> String {
    format!("__FSM_META_VARIABLE_DECLARATION({fsm_name});")
}

pub fn function_header(fsm_name: &str) -> String {
    format!("void {fsm_name}() {{")
}

pub fn fixed_iteration_header(fsm_name: &str) -> String {
    format!("void {fsm_name}_fixed_iteration(unsigned int count) {{")
}

pub fn fixed_iteration_loop(fsm_name: &str) -> String {
    format!("for (int i = 0; i < count; ++i) {{ {fsm_name}(); }}")
}

pub fn min_runtime_declare_time_variable(fsm_name: &str) -> String {
    format!("__DECLARE_MIN_RUNTIME_ITER_TIME_VARIABLE({fsm_name});")
}

pub fn min_runtime_register_time(fsm_name: &str) -> String {
    format!("__REGISTER_MIN_RUNTIME_ITER_CURRENT_TIME({fsm_name});")
}

pub fn min_runtime_is_time_passed(fsm_name: &str, ms_expr: &str) -> String {
    format!("___MIN_RUNTIME_IS_TIME_PASSED({fsm_name}, {ms_expr})")
}

pub fn min_runtime_header(fsm_name: &str) -> String {
    format!("void {fsm_name}_min_runtime(unsigned long ms) {{")
}

pub fn min_runtime_loop(condition: &str) -> String {
    format!("while (!({condition})) {{")
}

pub fn state_header(fsm_name: &str, state_id: u32) -> String {
    format!("if (__CURRENT_STATE({fsm_name}) == {state_id}) {{")
}

pub fn state_entry_condition(entry_condition: &str) -> String {
    format!("if (!({entry_condition})) {{ return; }}")
}

pub fn transition_header(condition: &str) -> String {
    format!("if ({condition}) {{")
}

pub fn change_state(fsm_name: &str, next_id: u32) -> String {
    format!("__CHANGE_STATE({fsm_name}, {next_id});")
}
