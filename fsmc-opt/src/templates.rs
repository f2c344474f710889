//! Opaque code-line templates the lowering pass emits into `code_block`s and
//! `entry_condition`s. These strings are a stable ABI: the macro names are
//! consumed by a target-platform header this compiler does not define.

pub fn declare_time_variable(fsm_name: &str) -> String {
    format!("__DECLARE_TIME_VARIABLE({fsm_name});")
}

pub fn register_time(fsm_name: &str) -> String {
    format!("__REGISTER_CURRENT_TIME({fsm_name});")
}

pub fn is_time_passed(fsm_name: &str, wait_time_ms: &str) -> String {
    format!("__IS_TIME_PASSED({fsm_name}, {wait_time_ms})")
}

pub fn declare_local_variable(ty: &str, name: &str) -> String {
    format!("{ty} {name};")
}

pub fn declare_local_variable_init(ty: &str, name: &str, expr: &str) -> String {
    format!("{ty} {name} = {expr};")
}

pub fn local_variable_assignment(name: &str, expr: &str) -> String {
    format!("{name} = {expr};")
}
