//! Telemetry - `tracing` subscriber and panic hook setup.
//!
//! Logs go to stderr so they never interleave with the rendered page. In
//! fullscreen mode the alternate screen hides them until exit; redirect
//! stderr to a file to keep them.
//!
//! Panics a failure boundary contains are logged once, by the boundary. The
//! hook from [`install_panic_hook`] keeps quiet about them and only speaks up
//! for panics nothing catches.

use tracing_subscriber::EnvFilter;

use crate::primitives::panic_is_contained;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info";

/// Pick the filter: `RUST_LOG` wins, then `configured`, then [`DEFAULT_FILTER`].
pub fn resolve_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already set.
#[must_use]
pub fn init_tracing(configured: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

/// Replace the panic hook.
///
/// Panics raised inside [`contain_panic`](crate::primitives::contain_panic)
/// print nothing. Any other panic runs `on_uncaught` first (the binary
/// restores the terminal there), is logged at `error` and is then handed to
/// the previous hook.
pub fn install_panic_hook(on_uncaught: impl Fn() + Send + Sync + 'static) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if panic_is_contained() {
            return;
        }
        on_uncaught();
        tracing::error!(panic = %info, "uncaught panic");
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        let _ = init_tracing(Some("warn"));
        assert!(!init_tracing(Some("debug")), "global subscriber already set");
    }

    #[test]
    fn test_bad_configured_filter_falls_back() {
        // Must not panic on garbage
        let _ = resolve_filter(Some("[[not a filter"));
    }
}
