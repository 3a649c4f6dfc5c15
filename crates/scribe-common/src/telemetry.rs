//! Native tracing setup.
//!
//! The browser crate installs `tracing-wasm` instead; this module only
//! covers native consumers of the client (tests, scripts).
//!
//! ```ignore
//! scribe_common::telemetry::init_tracing();
//! tracing::info!("client ready");
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Console level used when `RUST_LOG` is not set.
pub fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install a compact fmt subscriber. `RUST_LOG` overrides the default
/// level. Calling this twice is harmless; the second install is ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level().as_str().to_lowercase()));

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
