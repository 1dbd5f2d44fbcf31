// Session simulator: drives a scripted lifecycle through the session core
// with stub worker, sensors, and device probe.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::info;

use player_session::bridge::{DialogPresenter, ModalBridge, ModalButton, ModalRequest, ModalResponse};
use player_session::config::SessionConfig;
use player_session::devices::StubDeviceProbe;
use player_session::session::{
    NativeState, PlayerSession, StubSensorGate, StubWorker,
};

#[derive(Parser, Debug)]
#[command(name = "session-sim", about = "Scripted lifecycle run against the session core")]
struct Args {
    /// Path to a JSON config file; defaults are used when absent
    #[arg(long)]
    config: Option<String>,

    /// Number of pause/resume cycles to run after startup
    #[arg(long, default_value_t = 2)]
    cycles: u32,

    /// Also run the blocking modal dialog demo
    #[arg(long, default_value_t = false)]
    modal: bool,
}

/// Presenter that answers from a spawned thread after a short delay,
/// standing in for a host UI thread.
struct SimPresenter;

impl DialogPresenter for SimPresenter {
    fn present(&self, request: ModalRequest, completion: player_session::bridge::ModalCompletion) {
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let id = request.buttons.first().map(|b| b.id).unwrap_or(0);
            completion.post(ModalResponse::button(id));
        });
    }
}

fn main() -> Result<()> {
    player_session::init_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SessionConfig::load_from_file(path),
        None => SessionConfig::default(),
    };

    let worker = Arc::new(StubWorker::new());
    let sensors = Arc::new(StubSensorGate::new());
    let probe = Arc::new(StubDeviceProbe::new());
    let session = PlayerSession::new(worker.clone(), sensors.clone(), probe.clone(), config);

    let mut events = session.subscribe_events();

    // Host startup sequence: resume callback lands before the surface.
    session.on_host_resumed(true)?;
    info!("after host resume: {:?}", session.current_state()?);
    session.on_surface_changed(true)?;
    info!("after surface ready: {:?}", session.current_state()?);
    assert_eq!(session.current_state()?, NativeState::Resumed);

    // Hotplug a controller and the system vibrator.
    probe.add_joystick(42, "Sim Gamepad", 6, true);
    probe.set_system_haptic(true);
    session.poll_joysticks(&[42])?;
    session.poll_haptics(&[])?;

    for cycle in 0..args.cycles {
        info!("cycle {}: backgrounding", cycle);
        session.on_host_resumed(false)?;
        session.on_surface_changed(false)?;

        info!("cycle {}: foregrounding", cycle);
        session.on_surface_changed(true)?;
        session.on_host_resumed(true)?;
    }

    // Unplug the controller.
    probe.remove_device(42);
    session.poll_joysticks(&[])?;

    if args.modal {
        let bridge = ModalBridge::new();
        let request = ModalRequest {
            title: "Playback error".to_string(),
            message: "The stream ended unexpectedly.".to_string(),
            buttons: vec![ModalButton::new(1, "Retry"), ModalButton::new(2, "Dismiss")],
        };
        let response = bridge.show_blocking(request, &SimPresenter);
        info!("modal answered with {:?}", response.selected);
    }

    session.request_quit()?;
    info!("session reset to {:?}", session.current_state()?);

    while let Ok(event) = events.try_recv() {
        info!("event at {}ms: {:?}", event.timestamp_ms, event.kind);
    }

    info!(
        "worker: starts={} pauses={} resumes={} quits={}",
        worker.start_calls(),
        worker.pause_signals(),
        worker.resume_signals(),
        worker.quit_signals()
    );
    Ok(())
}
