// Stub device probe used for deterministic testing and the simulator binary

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::probe::{DeviceProbe, HapticCaps, JoystickCaps, MotionRange};
use super::{DeviceId, AXIS_HAT_X, AXIS_HAT_Y};

/// In-memory [`DeviceProbe`] with hand-seeded capabilities.
///
/// Devices unknown to the stub answer `None`, which doubles as the model
/// for capability queries that fail mid-unplug.
pub struct StubDeviceProbe {
    joysticks: Mutex<HashMap<DeviceId, JoystickCaps>>,
    haptics: Mutex<HashMap<DeviceId, HapticCaps>>,
    system_haptic: AtomicBool,
}

impl StubDeviceProbe {
    pub fn new() -> Self {
        Self {
            joysticks: Mutex::new(HashMap::new()),
            haptics: Mutex::new(HashMap::new()),
            system_haptic: AtomicBool::new(false),
        }
    }

    /// Seed a joystick with `axis_count` regular axes and optionally the hat pair.
    pub fn add_joystick(&self, id: DeviceId, name: &str, axis_count: u16, has_hat: bool) {
        let mut motion_ranges = Vec::new();
        for axis in 0..axis_count {
            motion_ranges.push(MotionRange {
                axis,
                min: -1.0,
                max: 1.0,
            });
        }
        if has_hat {
            motion_ranges.push(MotionRange {
                axis: AXIS_HAT_X,
                min: -1.0,
                max: 1.0,
            });
            motion_ranges.push(MotionRange {
                axis: AXIS_HAT_Y,
                min: -1.0,
                max: 1.0,
            });
        }
        self.joysticks.lock().unwrap().insert(
            id,
            JoystickCaps {
                name: name.to_string(),
                motion_ranges,
            },
        );
    }

    pub fn add_haptic(&self, id: DeviceId, name: &str) {
        self.haptics.lock().unwrap().insert(
            id,
            HapticCaps {
                name: name.to_string(),
            },
        );
    }

    /// Forget a device entirely, as if unplugged before any query lands.
    pub fn remove_device(&self, id: DeviceId) {
        self.joysticks.lock().unwrap().remove(&id);
        self.haptics.lock().unwrap().remove(&id);
    }

    pub fn set_system_haptic(&self, available: bool) {
        self.system_haptic.store(available, Ordering::SeqCst);
    }
}

impl Default for StubDeviceProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceProbe for StubDeviceProbe {
    fn joystick_caps(&self, id: DeviceId) -> Option<JoystickCaps> {
        self.joysticks.lock().unwrap().get(&id).cloned()
    }

    fn haptic_caps(&self, id: DeviceId) -> Option<HapticCaps> {
        self.haptics.lock().unwrap().get(&id).cloned()
    }

    fn system_haptic_available(&self) -> bool {
        self.system_haptic.load(Ordering::SeqCst)
    }
}
