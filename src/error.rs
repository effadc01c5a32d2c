use std::io;

use miette::{miette, Diagnostic, LabeledSpan, Report, Severity, SourceSpan};
use thiserror::Error;

use crate::runtime::MEMORY_MAX;

// Runtime faults

/// Conditions that abort execution. An unknown opcode is not one of these:
/// it halts the machine normally.
#[derive(Debug, Error, Diagnostic)]
pub enum Fault {
    #[error("Unsupported ALU operation in instruction 0b{0:08b}")]
    #[diagnostic(
        code(runtime::alu),
        help("only ADD (0b0000) and MUL (0b0010) are implemented by the ALU")
    )]
    UnsupportedOperation(u8),

    #[error("Memory address 0x{0:X} is out of range")]
    #[diagnostic(
        code(runtime::address),
        help("the LS-8 has 256 bytes of memory; check operands near the end of the program")
    )]
    AddressOutOfRange(usize),

    #[error("Program image of {0} bytes does not fit in memory")]
    #[diagnostic(
        code(runtime::image),
        help("the LS-8 has 256 bytes of memory; shorten the program")
    )]
    ImageTooLarge(usize),

    #[error("Register R{0} does not exist")]
    #[diagnostic(code(runtime::register), help("registers are numbered R0 to R7"))]
    RegisterOutOfRange(u8),

    #[error("Could not write program output")]
    #[diagnostic(code(runtime::output))]
    Output(#[from] io::Error),
}

// Loader errors

pub fn load_bad_digit(span: SourceSpan, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::bad_digit",
        help = "each instruction line must be a binary literal like 10000010",
        labels = vec![LabeledSpan::at(span, "not a binary digit")],
        "Encountered an invalid digit in a binary literal.",
    )
    .with_source_code(src.to_owned())
}

pub fn load_too_wide(span: SourceSpan, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::too_wide",
        help = "memory cells hold 8 bits; split wider values across several lines",
        labels = vec![LabeledSpan::at(span, "more than 8 bits")],
        "Binary literal does not fit in a byte.",
    )
    .with_source_code(src.to_owned())
}

pub fn load_too_large(len: usize) -> Report {
    miette!(
        severity = Severity::Error,
        code = "load::too_large",
        help = format!("the program image can be at most {MEMORY_MAX} bytes"),
        "Program of {len} bytes does not fit in memory.",
    )
}
