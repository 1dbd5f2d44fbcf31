// Lifecycle coordinator: reconciles host signals into one native state machine

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{debug, info, warn};
use tokio::sync::broadcast;

use crate::config::SessionConfig;
use crate::devices::{
    DeviceProbe, DeviceReconciler, HapticRecord, JoystickRecord, ReconcileOutcome,
};
use crate::error::{log_session_error, SessionError};

use super::events::{SessionEvent, SessionEventKind, SystemTimeSource, TimeSource};
use super::worker::{NativeWorker, SensorGate};
use super::{NativeState, ReadinessSignals};

/// Mutable lifecycle state guarded by a single mutex.
///
/// `current` only changes inside the evaluator; `desired` and `signals`
/// change on host callbacks. Holding both behind one lock means the
/// evaluator always sees a consistent snapshot.
struct LifecycleState {
    current: NativeState,
    desired: NativeState,
    signals: ReadinessSignals,
}

/// Central coordinator between the host's lifecycle callbacks and the
/// opaque native worker.
///
/// Host callbacks arrive on the UI thread in whatever order the platform
/// chooses. Each callback records its signal and invokes the transition
/// evaluator, which computes the effective state purely from the current
/// snapshot. The evaluator is idempotent: calling it again with unchanged
/// signals does nothing, so redundant or contradictory callback orderings
/// converge to the same state.
pub struct PlayerSession {
    state: Mutex<LifecycleState>,
    worker: Arc<dyn NativeWorker>,
    sensors: Arc<dyn SensorGate>,
    worker_started: AtomicBool,
    devices: Mutex<DeviceReconciler>,
    events_tx: broadcast::Sender<SessionEvent>,
    time_source: Arc<dyn TimeSource>,
    start_instant: Instant,
    config: SessionConfig,
}

impl PlayerSession {
    pub fn new(
        worker: Arc<dyn NativeWorker>,
        sensors: Arc<dyn SensorGate>,
        probe: Arc<dyn DeviceProbe>,
        config: SessionConfig,
    ) -> Self {
        Self::with_time_source(worker, sensors, probe, config, Arc::new(SystemTimeSource::default()))
    }

    pub fn with_time_source(
        worker: Arc<dyn NativeWorker>,
        sensors: Arc<dyn SensorGate>,
        probe: Arc<dyn DeviceProbe>,
        config: SessionConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(config.events.buffer_size);
        let start_instant = time_source.now();
        Self {
            state: Mutex::new(LifecycleState {
                current: NativeState::Init,
                desired: NativeState::Init,
                signals: ReadinessSignals::session_start(),
            }),
            worker,
            sensors,
            worker_started: AtomicBool::new(false),
            devices: Mutex::new(DeviceReconciler::new(probe)),
            events_tx,
            time_source,
            start_instant,
            config,
        }
    }

    /// Subscribe to session telemetry events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    pub fn current_state(&self) -> Result<NativeState, SessionError> {
        Ok(self.state.lock()?.current)
    }

    pub fn readiness(&self) -> Result<ReadinessSignals, SessionError> {
        Ok(self.state.lock()?.signals)
    }

    /// Whether the worker has been started within this session.
    pub fn worker_started(&self) -> bool {
        self.worker_started.load(Ordering::SeqCst)
    }

    /// Surface created or destroyed.
    ///
    /// Destruction forces the desired state to `Paused`; creation only
    /// records readiness and lets a previously requested resume proceed.
    pub fn on_surface_changed(&self, ready: bool) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        debug!("[PlayerSession] surface_ready={}", ready);
        state.signals.surface_ready = ready;
        if !ready {
            state.desired = NativeState::Paused;
        }
        self.evaluate(&mut state)
    }

    /// Window focus gained or lost.
    pub fn on_focus_changed(&self, has_focus: bool) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        debug!("[PlayerSession] has_focus={}", has_focus);
        state.signals.has_focus = has_focus;
        state.desired = if has_focus {
            NativeState::Resumed
        } else {
            NativeState::Paused
        };
        self.evaluate(&mut state)
    }

    /// Host resume or pause callback.
    pub fn on_host_resumed(&self, resumed: bool) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        debug!("[PlayerSession] host_resumed_called={}", resumed);
        state.signals.host_resumed_called = resumed;
        state.desired = if resumed {
            NativeState::Resumed
        } else {
            NativeState::Paused
        };
        self.evaluate(&mut state)
    }

    /// Explicitly request a state, then re-evaluate.
    pub fn request_state(&self, next: NativeState) -> Result<(), SessionError> {
        let mut state = self.state.lock()?;
        state.desired = next;
        self.evaluate(&mut state)
    }

    /// Tear the session down and reset to a restartable baseline.
    ///
    /// Pauses first so the worker sees a quiesced state before the quit
    /// signal, joins the worker thread if it ever started, then resets
    /// signals, registries, and the start latch so a fresh session can run
    /// in the same process.
    pub fn request_quit(&self) -> Result<(), SessionError> {
        info!("[PlayerSession] quit requested");
        self.request_state(NativeState::Paused)?;
        self.worker.signal_quit();
        self.emit(SessionEventKind::QuitRequested);

        if self.worker_started.load(Ordering::SeqCst) {
            self.worker.join()?;
        }
        self.worker_started.store(false, Ordering::SeqCst);

        self.devices.lock()?.clear();

        let mut state = self.state.lock()?;
        state.signals = ReadinessSignals::session_start();
        state.current = NativeState::Init;
        state.desired = NativeState::Init;
        Ok(())
    }

    /// Reconcile the joystick registry against a polled id snapshot and
    /// publish add/remove events.
    pub fn poll_joysticks(
        &self,
        current_ids: &[i32],
    ) -> Result<ReconcileOutcome<JoystickRecord>, SessionError> {
        let outcome = self.devices.lock()?.reconcile_joysticks(current_ids);
        for record in &outcome.added {
            self.emit(SessionEventKind::JoystickAdded {
                device_id: record.device_id,
            });
        }
        for &id in &outcome.removed {
            self.emit(SessionEventKind::JoystickRemoved { device_id: id });
        }
        if self.config.devices.log_device_changes && !outcome.is_unchanged() {
            info!(
                "[PlayerSession] joystick poll: {} added, {} removed",
                outcome.added.len(),
                outcome.removed.len()
            );
        }
        Ok(outcome)
    }

    /// Reconcile the haptic registry, including the system vibration
    /// sentinel, and publish add/remove events.
    pub fn poll_haptics(
        &self,
        current_ids: &[i32],
    ) -> Result<ReconcileOutcome<HapticRecord>, SessionError> {
        let outcome = self.devices.lock()?.reconcile_haptics(current_ids);
        for record in &outcome.added {
            self.emit(SessionEventKind::HapticAdded {
                device_id: record.device_id,
            });
        }
        for &id in &outcome.removed {
            self.emit(SessionEventKind::HapticRemoved { device_id: id });
        }
        if self.config.devices.log_device_changes && !outcome.is_unchanged() {
            info!(
                "[PlayerSession] haptic poll: {} added, {} removed",
                outcome.added.len(),
                outcome.removed.len()
            );
        }
        Ok(outcome)
    }

    /// The transition evaluator. Must be called with the state lock held.
    ///
    /// Pause transitions apply immediately. Resume transitions are gated
    /// on the readiness conjunction; when any signal is missing the
    /// desired state is simply left in place and a later callback
    /// re-evaluates. The first successful resume also starts the worker,
    /// guarded by a compare-and-swap latch so concurrent evaluations can
    /// never start it twice.
    fn evaluate(&self, state: &mut LifecycleState) -> Result<(), SessionError> {
        if state.desired == state.current {
            return Ok(());
        }

        match state.desired {
            NativeState::Init => {
                // Only reachable through teardown, which resets directly.
                state.current = NativeState::Init;
            }
            NativeState::Paused => {
                info!("[PlayerSession] {:?} -> Paused", state.current);
                self.worker.signal_pause();
                if self.config.sensors.motion_sensor {
                    self.sensors.set_enabled(false);
                }
                let from = state.current;
                state.current = NativeState::Paused;
                self.emit(SessionEventKind::StateChanged {
                    from,
                    to: NativeState::Paused,
                });
            }
            NativeState::Resumed => {
                if !state.signals.all_ready() {
                    debug!(
                        "[PlayerSession] resume deferred: surface={} focus={} host_resumed={}",
                        state.signals.surface_ready,
                        state.signals.has_focus,
                        state.signals.host_resumed_called
                    );
                    return Ok(());
                }

                if self
                    .worker_started
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    if let Err(err) = self.worker.start() {
                        self.worker_started.store(false, Ordering::SeqCst);
                        log_session_error(&err, "worker start");
                        warn!("[PlayerSession] falling back to Paused after start failure");
                        if self.config.sensors.motion_sensor {
                            self.sensors.set_enabled(false);
                        }
                        let from = state.current;
                        state.current = NativeState::Paused;
                        state.desired = NativeState::Paused;
                        self.emit(SessionEventKind::WorkerStartFailed);
                        self.emit(SessionEventKind::StateChanged {
                            from,
                            to: NativeState::Paused,
                        });
                        return Err(err);
                    }
                    info!("[PlayerSession] native worker started");
                    self.emit(SessionEventKind::WorkerStarted);
                }

                info!("[PlayerSession] {:?} -> Resumed", state.current);
                if self.config.sensors.motion_sensor {
                    self.sensors.set_enabled(true);
                }
                self.worker.signal_resume();
                let from = state.current;
                state.current = NativeState::Resumed;
                self.emit(SessionEventKind::StateChanged {
                    from,
                    to: NativeState::Resumed,
                });
            }
        }
        Ok(())
    }

    fn emit(&self, kind: SessionEventKind) {
        let now = self.time_source.now();
        let timestamp_ms = now.saturating_duration_since(self.start_instant).as_millis() as u64;
        // Send failures only mean no subscriber is listening.
        let _ = self.events_tx.send(SessionEvent { timestamp_ms, kind });
    }
}

#[cfg(test)]
mod tests;
