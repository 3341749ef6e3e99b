//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install fmt subscriber global.
///
/// `RUST_LOG` menang atas `filter` jika di-set. Return `false` jika
/// subscriber global sudah terpasang sebelumnya.
pub fn init_tracing(filter: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
