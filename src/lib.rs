// Output
pub mod output;

// Loading
mod program;
pub use program::Program;

// Running
mod alu;
pub use alu::AluOp;
pub mod opcode;
mod runtime;
pub use runtime::{Cpu, DispatchTable, Halt, Handler, State, MEMORY_MAX};

mod error;
pub use error::Fault;

pub mod env;

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 4;
