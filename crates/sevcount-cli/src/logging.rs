//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Log to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` when verbose.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "sevcount=debug,warn" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
