//! Panic hook: quiet for contained panics, loud for everything else.
//!
//! Lives in its own test binary because the hook is process-wide.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use glowfolio::primitives::{contain_panic, panic_is_contained};
use glowfolio::telemetry::install_panic_hook;

struct ErrorEvents(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for ErrorEvents {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_hook_speaks_only_for_uncaught_panics() {
    let uncaught = Arc::new(AtomicUsize::new(0));
    let uncaught_hook = uncaught.clone();
    install_panic_hook(move || {
        uncaught_hook.fetch_add(1, Ordering::SeqCst);
    });

    let errors = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorEvents(errors.clone()));

    tracing::subscriber::with_default(subscriber, || {
        let contained = contain_panic(|| -> u8 { panic!("scene draw failed") });
        assert!(contained.is_err());
        assert!(!panic_is_contained());
        assert_eq!(uncaught.load(Ordering::SeqCst), 0, "contained panic runs nothing");
        assert_eq!(errors.load(Ordering::SeqCst), 0, "contained panic logs nothing");

        let escaped = std::panic::catch_unwind(|| -> u8 { panic!("render loop broke") });
        assert!(escaped.is_err());
        assert_eq!(uncaught.load(Ordering::SeqCst), 1, "terminal restore runs");
        assert_eq!(errors.load(Ordering::SeqCst), 1, "uncaught panic logged at error");
    });
}
