//! Diagnostic logging setup
//!
//! User-facing output goes through `ui`; this only wires `tracing` to stderr.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter for a `-v` count
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "stagehand=info",
        2 => "stagehand=debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init(verbose: u8, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(color)
                .with_target(verbose >= 2),
        )
        .try_init();
}
