//! Seams toward the native worker and the host sensor stack.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::SessionError;

/// The opaque long-running native worker.
///
/// The session treats the worker as a thread that is started exactly once
/// per session and then signaled. All signal methods are fire-and-forget:
/// the worker may be mid-frame when a pause arrives, so "signaled paused"
/// and "actually paused" are eventually consistent, not synchronous.
pub trait NativeWorker: Send + Sync {
    /// Spawn the worker thread. Called at most once per session.
    fn start(&self) -> Result<(), SessionError>;

    /// Advisory pause notification. Non-blocking, best-effort.
    fn signal_pause(&self);

    /// Advisory resume notification. Non-blocking.
    fn signal_resume(&self);

    /// Terminal quit signal. The worker winds down on its own schedule.
    fn signal_quit(&self);

    /// Block until the worker thread has exited. Called during teardown,
    /// after `signal_quit`.
    fn join(&self) -> Result<(), SessionError>;
}

/// Gate for device sensors that are polled only while rendering.
///
/// The session disables these on every pause and re-enables them on every
/// resume, so motion sensors do not drain power while the surface is gone.
pub trait SensorGate: Send + Sync {
    fn set_enabled(&self, enabled: bool);
}

/// No-op gate for hosts without rendering-only sensors.
pub struct NullSensorGate;

impl SensorGate for NullSensorGate {
    fn set_enabled(&self, _enabled: bool) {}
}

/// Recording stub worker used in tests and the simulator.
pub struct StubWorker {
    started: AtomicBool,
    fail_next_start: AtomicBool,
    start_calls: AtomicUsize,
    pause_signals: AtomicUsize,
    resume_signals: AtomicUsize,
    quit_signals: AtomicUsize,
    join_calls: AtomicUsize,
}

impl StubWorker {
    pub fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            fail_next_start: AtomicBool::new(false),
            start_calls: AtomicUsize::new(0),
            pause_signals: AtomicUsize::new(0),
            resume_signals: AtomicUsize::new(0),
            quit_signals: AtomicUsize::new(0),
            join_calls: AtomicUsize::new(0),
        }
    }

    /// Make the next `start` call fail, simulating thread-spawn failure.
    pub fn fail_next_start(&self) {
        self.fail_next_start.store(true, Ordering::SeqCst);
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn pause_signals(&self) -> usize {
        self.pause_signals.load(Ordering::SeqCst)
    }

    pub fn resume_signals(&self) -> usize {
        self.resume_signals.load(Ordering::SeqCst)
    }

    pub fn quit_signals(&self) -> usize {
        self.quit_signals.load(Ordering::SeqCst)
    }

    pub fn join_calls(&self) -> usize {
        self.join_calls.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl Default for StubWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeWorker for StubWorker {
    fn start(&self) -> Result<(), SessionError> {
        if self.fail_next_start.swap(false, Ordering::SeqCst) {
            return Err(SessionError::WorkerStartFailed {
                reason: "stub start failure".to_string(),
            });
        }
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(SessionError::WorkerAlreadyStarted);
        }
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn signal_pause(&self) {
        self.pause_signals.fetch_add(1, Ordering::SeqCst);
    }

    fn signal_resume(&self) {
        self.resume_signals.fetch_add(1, Ordering::SeqCst);
    }

    fn signal_quit(&self) {
        self.quit_signals.fetch_add(1, Ordering::SeqCst);
    }

    fn join(&self) -> Result<(), SessionError> {
        self.join_calls.fetch_add(1, Ordering::SeqCst);
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Recording sensor gate for tests.
pub struct StubSensorGate {
    enabled: AtomicBool,
    transitions: AtomicUsize,
}

impl StubSensorGate {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            transitions: AtomicUsize::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn transitions(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }
}

impl Default for StubSensorGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorGate for StubSensorGate {
    fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) != enabled {
            self.transitions.fetch_add(1, Ordering::SeqCst);
        }
    }
}
