//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "THROWSCAN_LOG";

/// Initialize the throwscan tracing/logging system.
///
/// Reads `THROWSCAN_LOG` for per-crate log levels, e.g.
/// `THROWSCAN_LOG=throwscan_analysis=debug,throwscan_core=warn`.
///
/// Falls back to `throwscan=info` if `THROWSCAN_LOG` is unset or invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("throwscan=info"));

        // A host may already have installed a global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
