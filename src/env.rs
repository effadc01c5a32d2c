//! Settings taken from environment variables, read once at startup.

use std::cell::Cell;

/// `LS8_TRACE=1` prints machine state before every instruction.
const TRACE_VAR: &str = "LS8_TRACE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Env {
    pub trace_enabled: bool,
}

thread_local! {
    /// Set exactly once, by `init`
    static ENV: Cell<Option<Env>> = const { Cell::new(None) };
}

impl Env {
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Env {
            trace_enabled: lookup(TRACE_VAR).is_some_and(|v| v == "1"),
        }
    }
}

pub fn init() {
    install(Env::from_lookup(|name| std::env::var(name).ok()));
}

pub fn is_trace_enabled() -> bool {
    current().trace_enabled
}

fn install(value: Env) {
    let previous = ENV.replace(Some(value));
    assert!(
        previous.is_none(),
        "tried to initialize environment state multiple times"
    );
}

fn current() -> Env {
    ENV.get()
        .unwrap_or_else(|| panic!("tried to access environment state before initialization"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_only_for_one() {
        let env = Env::from_lookup(|_| Some("1".into()));
        assert!(env.trace_enabled);
        let env = Env::from_lookup(|_| Some("yes".into()));
        assert!(!env.trace_enabled);
        let env = Env::from_lookup(|_| None);
        assert_eq!(env, Env::default());
    }

    #[test]
    fn installed_per_thread() {
        std::thread::spawn(|| {
            install(Env {
                trace_enabled: true,
            });
            assert!(is_trace_enabled());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn init_twice_panics() {
        let result = std::thread::spawn(|| {
            init();
            init();
        })
        .join();
        assert!(result.is_err());
    }

    #[test]
    fn access_before_init_panics() {
        let result = std::thread::spawn(is_trace_enabled).join();
        assert!(result.is_err());
    }
}
