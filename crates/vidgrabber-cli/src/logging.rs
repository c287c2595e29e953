//! Logging init: stderr only, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,vidgrabber_core=info,vidgrabber=info";

/// Initialize structured logging to stderr.
///
/// `verbose` lowers the default filter to debug; `RUST_LOG` still wins.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "info,vidgrabber_core=debug,vidgrabber=debug"
    } else {
        DEFAULT_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
