//! Diagnostic logging on stderr.
//!
//! Status lines go to stdout; everything emitted through `tracing` goes to
//! stderr so it never mixes with the per-file report.

use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor `--verbose` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialise the logging subsystem.
///
/// Priority: `RUST_LOG` env var > `--verbose` flag > [`DEFAULT_LOG_LEVEL`].
pub fn init(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    // try_init: a subscriber may already be installed (e.g. in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
}
