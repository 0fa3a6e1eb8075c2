//! Commands for the `subcmd-demo` binary.
//!
//! Kept in a library so the integration tests can register the same
//! commands against captured streams.

pub mod commands;

use subcmd::Program;

/// Name the demo reports in usage text.
pub const NAME: &str = "subcmd-demo";

/// Registers every demo command.
pub fn register(program: &mut Program) {
    program
        .register(commands::echo::definition())
        .register(commands::upper::definition())
        .register(commands::pause::definition());
}

/// Builds the demo program over the process arguments.
pub fn program() -> Program {
    let mut program = Program::from_env(NAME);
    register(&mut program);
    program
}
