use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{IntoDiagnostic, Result};

use ls8::output::{MsgColor, Output};
use ls8::{Cpu, Halt, Program};

/// Interpreter for programs written for the LS-8 eight-bit computer.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a `.ls8` file to run
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a text `.ls8` or binary `.bin` program image
    Run {
        /// `.ls8` or `.bin` file to run
        name: PathBuf,
        /// Print machine state before every instruction
        #[arg(short, long)]
        trace: bool,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
    },
    /// Check that a program image loads without running it
    Check {
        /// File to check
        name: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    use MsgColor::*;
    let args = Args::parse();
    ls8::env::init();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(ls8::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }))?;

    match (args.command, args.path) {
        (
            Some(Command::Run {
                name,
                trace,
                minimal,
            }),
            _,
        ) => run(&name, trace, minimal),
        (Some(Command::Check { name }), _) => {
            file_message(Green, "Checking", &name);
            let program = Program::from_file(&name)?;
            Output::message(
                Green,
                "Success",
                &format!("{} bytes, no errors found!", program.len()),
            );
            Ok(())
        }
        (None, Some(path)) => run(&path, false, false),
        (None, None) => {
            println!("\n~ ls8 v{VERSION} ~");
            println!("{}", LOGO.truecolor(255, 183, 197).bold());
            println!("{SHORT_INFO}");
            Ok(())
        }
    }
}

fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    Output::message(color, left, &right);
}

fn run(name: &Path, trace: bool, minimal: bool) -> Result<()> {
    Output::set_minimal(minimal);
    file_message(MsgColor::Green, "Loading", name);
    let program = Program::from_file(name)?;

    let mut cpu = Cpu::new();
    cpu.load(program.bytes())?;
    cpu.set_trace(trace || ls8::env::is_trace_enabled());

    Output::message(
        MsgColor::Green,
        "Running",
        &format!("{} byte image", program.len()),
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let halt = cpu.run(&mut out)?;
    out.flush().into_diagnostic()?;

    match halt {
        Halt::Instruction => Output::message(MsgColor::Cyan, "Halted", "HLT reached"),
        Halt::UnknownOpcode { address, .. } => Output::message(
            MsgColor::Red,
            "Stopped",
            &format!("unknown instruction at 0x{address:02X}"),
        ),
    }
    file_message(MsgColor::Green, "Completed", name);
    Ok(())
}

const LOGO: &str = r#"
  _       ___     ___
 | |     / __|   ( _ )
 | |__   \__ \   / _ \
 |____|  |___/   \___/
"#;

const SHORT_INFO: &str = r"
Welcome to ls8, an interpreter for the LS-8 eight-bit computer.
Please use `-h` or `--help` to access the usage instructions and documentation.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
