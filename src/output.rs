use std::cell::RefCell;

use colored::{ColoredString, Colorize};

#[macro_export]
macro_rules! dprintln {
    ( $fmt:literal $($tt:tt)* ) => {{
        let s = format!(
            concat!($fmt, "\n")
            $($tt)*
        );
        $crate::output::Output::Diagnostic.print_str(&s);
    }};
}

/// Everything here goes to stderr. Program output (`PRN`) is written to the
/// sink handed to the machine and never passes through this type.
#[derive(Clone, Copy, Debug)]
pub enum Output {
    /// Progress lines from the front end. Hidden with `--minimal`.
    Status,
    /// Messages about machine state, such as halt reasons and trace lines.
    /// Shown even with `--minimal`, but without color.
    Diagnostic,
}

#[derive(Clone, Copy, Debug)]
pub enum MsgColor {
    Green,
    Cyan,
    Red,
}

impl Output {
    thread_local! {
        static IS_MINIMAL: RefCell<bool> = const { RefCell::new(false) };
    }

    pub fn set_minimal(new_value: bool) -> bool {
        Self::IS_MINIMAL.with(|value| value.replace(new_value))
    }
    pub fn is_minimal() -> bool {
        Self::IS_MINIMAL.with(|value| *value.borrow())
    }

    pub fn print_str(&self, string: &str) {
        match self {
            Self::Status => {
                if !Self::is_minimal() {
                    eprint!("{}", string);
                }
            }

            Self::Diagnostic => {
                if Self::is_minimal() {
                    eprint!("{}", string);
                } else {
                    eprint!("{}", ColoredString::from(string).yellow());
                }
            }
        }
    }

    /// Right-aligned colored verb followed by a description, cargo style.
    pub fn message(color: MsgColor, left: &str, right: &str) {
        let left = match color {
            MsgColor::Green => left.green(),
            MsgColor::Cyan => left.cyan(),
            MsgColor::Red => left.red(),
        };
        Self::Status.print_str(&format!("{left:>12} {right}\n"));
    }
}
