//! Tracing bootstrap for the `expense` binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `expense_tracker=trace`
pub const LOG_ENV: &str = "EXPENSE_LOG";

static TRACING_INIT: Once = Once::new();

/// Filter used when `EXPENSE_LOG` is unset or unparsable
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "expense_tracker=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Events go to stderr so command output on
/// stdout stays clean. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "warn");
        assert!(default_filter(true).contains("debug"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(false);
        init_tracing(true);
        tracing::debug!("logging initialised twice without panicking");
    }
}
