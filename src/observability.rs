//! Logging initialization.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set; otherwise `--verbose` lowers
/// the default from warn to debug. Safe to call more than once; only the
/// first call installs the subscriber.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let default_filter = if verbose {
            "anxietyflow=debug"
        } else {
            "anxietyflow=warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
    }
}
