// Player Session Core - native lifecycle and device coordination
// Reconciles host lifecycle callbacks into one native state machine

// Module declarations
pub mod bridge;
pub mod config;
pub mod devices;
pub mod error;
pub mod input;
pub mod session;

// Re-exports for convenience
pub use bridge::{DialogPresenter, ModalBridge, ModalButton, ModalRequest, ModalResponse};
pub use config::SessionConfig;
pub use error::{ErrorCode, SessionError};
pub use session::{NativeState, PlayerSession, ReadinessSignals, SessionEvent, SessionEventKind};

use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Initialize logging for the current platform. Safe to call repeatedly.
pub fn init_logging() {
    LOGGING_INIT.call_once(|| {
        cfg_if::cfg_if! {
            if #[cfg(target_os = "android")] {
                use tracing_subscriber::layer::SubscriberExt;
                use tracing_subscriber::util::SubscriberInitExt;
                let android_layer = tracing_android::layer("PlayerSession")
                    .expect("failed to initialize Android tracing layer");
                tracing_subscriber::registry().with(android_layer).init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                    )
                    .init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
