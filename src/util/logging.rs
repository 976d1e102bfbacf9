use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Verbosity;

pub const LOG_ENV: &str = "MODGRAPH_LOG";

/// Filter used when `MODGRAPH_LOG` is unset.
pub fn default_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Verbose => "modgraph=info,warn",
        Verbosity::Trace => "modgraph=debug,info",
    }
}

/// Installs the global subscriber. Diagnostics go to stderr so stdout only
/// ever carries the diagram.
pub fn init_tracing(verbosity: Verbosity, ansi: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
