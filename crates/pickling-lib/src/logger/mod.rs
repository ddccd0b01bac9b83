use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{fmt, EnvFilter};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Initialize the tracing subscriber on stderr, keeping stdout free for JSON.
///
/// `RUST_LOG` takes precedence when set. Otherwise the level is DEBUG if
/// `debug` is true and WARN if not. Calling this twice is harmless.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::SystemTime)
        .with_level(true)
        .with_target(debug)
        .try_init();
}

/// Record whether `-v`/`PICKLING_DEBUG` asked for verbose command output.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

/// Whether commands should add detail to their stdout output, such as the
/// key listing printed by `check`.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_set_and_get() {
        // Tests share the global flag, so the round-trip lives in one test.
        set_verbose(true);
        assert!(is_verbose());

        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
        tracing::debug!("logger initialized");
    }
}
