//! Session lifecycle coordination
//!
//! The host UI thread delivers asynchronous, often contradictory lifecycle
//! signals (pause, resume, focus loss, surface destruction). This module
//! reconciles them into a single authoritative [`NativeState`] through one
//! re-entrant, idempotent evaluator, and decides when the opaque native
//! worker may start, pause, or resume.

mod coordinator;
mod events;
mod worker;

pub use coordinator::PlayerSession;
pub use events::{
    SessionEvent, SessionEventKind, StubTimeSource, SystemTimeSource, TimeSource,
};
pub use worker::{NativeWorker, NullSensorGate, SensorGate, StubSensorGate, StubWorker};

use serde::{Deserialize, Serialize};

/// Authoritative state of the native layer.
///
/// `Init` is the state before the worker has ever run; `Paused` and
/// `Resumed` are reachable repeatedly. Mutated only by the session's own
/// transition evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeState {
    Init,
    Paused,
    Resumed,
}

/// Snapshot of the three independent readiness booleans.
///
/// Each flag is set by a distinct, possibly-concurrent host callback. The
/// desired state is recomputed purely as a function of the current
/// snapshot, never inferred from signal deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessSignals {
    pub surface_ready: bool,
    pub has_focus: bool,
    pub host_resumed_called: bool,
}

impl ReadinessSignals {
    /// Session-start defaults. Focus starts true: the host only reports
    /// focus *changes*, and a freshly created window is focused.
    pub fn session_start() -> Self {
        Self {
            surface_ready: false,
            has_focus: true,
            host_resumed_called: false,
        }
    }

    /// Conjunction gating the transition into [`NativeState::Resumed`].
    pub fn all_ready(&self) -> bool {
        self.surface_ready && self.has_focus && self.host_resumed_called
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_start_defaults() {
        let signals = ReadinessSignals::session_start();
        assert!(!signals.surface_ready);
        assert!(signals.has_focus);
        assert!(!signals.host_resumed_called);
        assert!(!signals.all_ready());
    }

    #[test]
    fn test_all_ready_requires_conjunction() {
        let mut signals = ReadinessSignals::session_start();
        signals.surface_ready = true;
        assert!(!signals.all_ready());
        signals.host_resumed_called = true;
        assert!(signals.all_ready());
        signals.has_focus = false;
        assert!(!signals.all_ready());
    }
}
