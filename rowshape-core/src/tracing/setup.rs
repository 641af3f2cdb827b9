//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the rowshape tracing/logging system.
///
/// Reads the `ROWSHAPE_LOG` environment variable for per-module log levels.
/// Format: `ROWSHAPE_LOG=rowshape_storage=trace,rowshape_core=debug`
///
/// Falls back to `rowshape=info` if `ROWSHAPE_LOG` is not set or is invalid.
///
/// Idempotent; a global subscriber installed by the host application wins.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("ROWSHAPE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("rowshape=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
