//! Logging bootstrap.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "todo_server=info,todo_core=info,tower_http=info";

/// Installs the global fmt subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
