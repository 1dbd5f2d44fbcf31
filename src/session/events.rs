//! Session event types and time sources for telemetry timestamps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::NativeState;
use crate::devices::DeviceId;

/// Telemetry event emitted by the session core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEvent {
    pub timestamp_ms: u64,
    pub kind: SessionEventKind,
}

/// Types of session events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEventKind {
    StateChanged {
        from: NativeState,
        to: NativeState,
    },
    WorkerStarted,
    WorkerStartFailed,
    QuitRequested,
    JoystickAdded {
        device_id: DeviceId,
    },
    JoystickRemoved {
        device_id: DeviceId,
    },
    HapticAdded {
        device_id: DeviceId,
    },
    HapticRemoved {
        device_id: DeviceId,
    },
}

/// Trait representing a monotonic time source used for event timestamps.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

/// Default time source backed by `Instant::now`.
#[derive(Default)]
pub struct SystemTimeSource {
    _unit: (),
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic time source for tests and the simulator.
///
/// Each call to `now()` advances by a fixed 10ms to guarantee strictly
/// monotonic timestamps without real elapsed time.
pub struct StubTimeSource {
    start: Instant,
    offset_ms: AtomicU64,
}

impl StubTimeSource {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }
}

impl Default for StubTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for StubTimeSource {
    fn now(&self) -> Instant {
        let offset = self.offset_ms.fetch_add(10, Ordering::SeqCst);
        self.start + Duration::from_millis(offset)
    }
}
