//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an explicit filter, e.g.
/// `ARCHMAP_LOG=archmap::builders=debug`
pub const LOG_ENV_VAR: &str = "ARCHMAP_LOG";

static INIT: Once = Once::new();

/// Default filter directive for a `-v` count
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "archmap=warn",
        1 => "archmap=info",
        2 => "archmap=debug",
        _ => "archmap=trace",
    }
}

/// Initialize logging to stderr.
///
/// `ARCHMAP_LOG` wins over the verbosity count when it parses. Calling this
/// more than once is a no-op.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbosity >= 2),
            )
            .with(filter)
            .init();
    });
}
