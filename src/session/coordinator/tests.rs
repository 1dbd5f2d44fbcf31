use std::sync::Arc;

use crate::config::SessionConfig;
use crate::devices::{StubDeviceProbe, HAPTIC_SENTINEL_ID};
use crate::error::SessionError;
use crate::session::events::StubTimeSource;
use crate::session::worker::{StubSensorGate, StubWorker};
use crate::session::{NativeState, PlayerSession, SessionEventKind};

struct Fixture {
    session: PlayerSession,
    worker: Arc<StubWorker>,
    sensors: Arc<StubSensorGate>,
    probe: Arc<StubDeviceProbe>,
}

fn fixture() -> Fixture {
    let worker = Arc::new(StubWorker::new());
    let sensors = Arc::new(StubSensorGate::new());
    let probe = Arc::new(StubDeviceProbe::new());
    let session = PlayerSession::with_time_source(
        worker.clone(),
        sensors.clone(),
        probe.clone(),
        SessionConfig::default(),
        Arc::new(StubTimeSource::new()),
    );
    Fixture {
        session,
        worker,
        sensors,
        probe,
    }
}

fn make_ready(session: &PlayerSession) {
    session.on_surface_changed(true).unwrap();
    session.on_host_resumed(true).unwrap();
}

#[test]
fn test_starts_in_init() {
    let f = fixture();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Init);
    assert!(!f.session.worker_started());
    assert_eq!(f.worker.start_calls(), 0);
}

#[test]
fn test_resume_deferred_until_all_signals_ready() {
    let f = fixture();

    f.session.on_host_resumed(true).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Init);
    assert_eq!(f.worker.start_calls(), 0);

    f.session.on_surface_changed(true).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Resumed);
    assert_eq!(f.worker.start_calls(), 1);
}

#[test]
fn test_signal_order_does_not_matter() {
    // Surface first, then host resume.
    let a = fixture();
    a.session.on_surface_changed(true).unwrap();
    a.session.on_host_resumed(true).unwrap();

    // Host resume first, then surface.
    let b = fixture();
    b.session.on_host_resumed(true).unwrap();
    b.session.on_surface_changed(true).unwrap();

    assert_eq!(a.session.current_state().unwrap(), NativeState::Resumed);
    assert_eq!(b.session.current_state().unwrap(), NativeState::Resumed);
    assert_eq!(a.worker.start_calls(), 1);
    assert_eq!(b.worker.start_calls(), 1);
}

#[test]
fn test_worker_starts_exactly_once_across_pause_resume_cycles() {
    let f = fixture();
    make_ready(&f.session);
    assert_eq!(f.worker.start_calls(), 1);

    for _ in 0..3 {
        f.session.on_host_resumed(false).unwrap();
        assert_eq!(f.session.current_state().unwrap(), NativeState::Paused);
        f.session.on_host_resumed(true).unwrap();
        assert_eq!(f.session.current_state().unwrap(), NativeState::Resumed);
    }
    assert_eq!(f.worker.start_calls(), 1);
    assert_eq!(f.worker.pause_signals(), 3);
    assert_eq!(f.worker.resume_signals(), 4);
}

#[test]
fn test_focus_loss_pauses_and_focus_gain_resumes() {
    let f = fixture();
    make_ready(&f.session);

    f.session.on_focus_changed(false).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Paused);
    assert!(!f.sensors.is_enabled());

    f.session.on_focus_changed(true).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Resumed);
    assert!(f.sensors.is_enabled());
}

#[test]
fn test_surface_destruction_forces_pause() {
    let f = fixture();
    make_ready(&f.session);
    assert_eq!(f.session.current_state().unwrap(), NativeState::Resumed);

    f.session.on_surface_changed(false).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Paused);
    assert_eq!(f.worker.pause_signals(), 1);

    // Recreating the surface alone resumes: host is still resumed and
    // focus was never lost, so the deferred pause lifts.
    f.session.on_surface_changed(true).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Paused);
    f.session.request_state(NativeState::Resumed).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Resumed);
}

#[test]
fn test_evaluator_is_idempotent() {
    let f = fixture();
    make_ready(&f.session);

    f.session.on_host_resumed(true).unwrap();
    f.session.on_focus_changed(true).unwrap();
    f.session.request_state(NativeState::Resumed).unwrap();

    assert_eq!(f.worker.start_calls(), 1);
    assert_eq!(f.worker.resume_signals(), 1);
}

#[test]
fn test_sensor_gate_follows_state() {
    let f = fixture();
    assert!(!f.sensors.is_enabled());

    make_ready(&f.session);
    assert!(f.sensors.is_enabled());

    f.session.on_host_resumed(false).unwrap();
    assert!(!f.sensors.is_enabled());
    assert_eq!(f.sensors.transitions(), 2);
}

#[test]
fn test_sensor_gate_untouched_when_disabled_in_config() {
    let worker = Arc::new(StubWorker::new());
    let sensors = Arc::new(StubSensorGate::new());
    let probe = Arc::new(StubDeviceProbe::new());
    let mut config = SessionConfig::default();
    config.sensors.motion_sensor = false;
    let session = PlayerSession::new(worker, sensors.clone(), probe, config);

    session.on_surface_changed(true).unwrap();
    session.on_host_resumed(true).unwrap();
    assert_eq!(sensors.transitions(), 0);
}

#[test]
fn test_worker_start_failure_falls_back_to_paused() {
    let f = fixture();
    f.worker.fail_next_start();

    f.session.on_surface_changed(true).unwrap();
    let err = f.session.on_host_resumed(true).unwrap_err();
    assert!(matches!(err, SessionError::WorkerStartFailed { .. }));
    assert_eq!(f.session.current_state().unwrap(), NativeState::Paused);
    assert!(!f.session.worker_started());

    // The latch was released, so a later resume retries the start.
    f.session.on_host_resumed(true).unwrap();
    assert_eq!(f.session.current_state().unwrap(), NativeState::Resumed);
    assert_eq!(f.worker.start_calls(), 1);
}

#[test]
fn test_quit_joins_worker_and_resets_session() {
    let f = fixture();
    make_ready(&f.session);
    f.probe.add_joystick(7, "Pad", 4, false);
    f.session.poll_joysticks(&[7]).unwrap();

    f.session.request_quit().unwrap();

    assert_eq!(f.worker.quit_signals(), 1);
    assert_eq!(f.worker.join_calls(), 1);
    assert!(!f.session.worker_started());
    assert_eq!(f.session.current_state().unwrap(), NativeState::Init);

    let signals = f.session.readiness().unwrap();
    assert!(!signals.surface_ready);
    assert!(signals.has_focus);
    assert!(!signals.host_resumed_called);

    // Registries were cleared, so the same id is a fresh addition.
    let outcome = f.session.poll_joysticks(&[7]).unwrap();
    assert_eq!(outcome.added.len(), 1);
}

#[test]
fn test_quit_before_start_does_not_join() {
    let f = fixture();
    f.session.request_quit().unwrap();
    assert_eq!(f.worker.quit_signals(), 1);
    assert_eq!(f.worker.join_calls(), 0);
}

#[test]
fn test_second_session_starts_worker_again() {
    let f = fixture();
    make_ready(&f.session);
    f.session.request_quit().unwrap();

    make_ready(&f.session);
    assert_eq!(f.session.current_state().unwrap(), NativeState::Resumed);
    assert_eq!(f.worker.start_calls(), 2);
}

#[test]
fn test_state_change_events_are_published() {
    let f = fixture();
    let mut rx = f.session.subscribe_events();
    make_ready(&f.session);

    let first = rx.try_recv().unwrap();
    assert_eq!(first.kind, SessionEventKind::WorkerStarted);
    let second = rx.try_recv().unwrap();
    assert_eq!(
        second.kind,
        SessionEventKind::StateChanged {
            from: NativeState::Init,
            to: NativeState::Resumed,
        }
    );
    assert!(second.timestamp_ms >= first.timestamp_ms);
}

#[test]
fn test_device_poll_publishes_add_and_remove_events() {
    let f = fixture();
    let mut rx = f.session.subscribe_events();

    f.probe.add_joystick(3, "Pad", 4, true);
    f.session.poll_joysticks(&[3]).unwrap();
    assert_eq!(
        rx.try_recv().unwrap().kind,
        SessionEventKind::JoystickAdded { device_id: 3 }
    );

    f.session.poll_joysticks(&[]).unwrap();
    assert_eq!(
        rx.try_recv().unwrap().kind,
        SessionEventKind::JoystickRemoved { device_id: 3 }
    );
}

#[test]
fn test_haptic_poll_includes_system_sentinel() {
    let f = fixture();
    f.probe.set_system_haptic(true);

    let outcome = f.session.poll_haptics(&[]).unwrap();
    assert_eq!(outcome.added.len(), 1);
    assert_eq!(outcome.added[0].device_id, HAPTIC_SENTINEL_ID);
}
