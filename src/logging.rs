use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Logs go to stderr so that a JSON report on stdout stays machine-readable.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact()
        .try_init();
}
