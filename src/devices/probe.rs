// Capability probing seam between the host platform layer and the registry

use super::{DeviceId, AXIS_HAT_X, AXIS_HAT_Y};

/// One motion range reported by the host for a joystick-class device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRange {
    /// Stable per-range axis identifier
    pub axis: u16,
    pub min: f32,
    pub max: f32,
}

/// Joystick-class capabilities for a device that passed the source-class check.
#[derive(Debug, Clone)]
pub struct JoystickCaps {
    pub name: String,
    pub motion_ranges: Vec<MotionRange>,
}

/// Vibrator capability for a physical device.
#[derive(Debug, Clone)]
pub struct HapticCaps {
    pub name: String,
}

/// Host-side device capability queries.
///
/// Implementations answer `None` both for devices that do not qualify
/// (wrong source class, no functioning vibrator) and for queries that fail
/// outright; the reconciler treats both the same way and moves on.
pub trait DeviceProbe: Send + Sync {
    /// Joystick-class capabilities for `id`, or `None` if it does not qualify.
    fn joystick_caps(&self, id: DeviceId) -> Option<JoystickCaps>;

    /// Vibrator capability for physical device `id`, or `None`.
    fn haptic_caps(&self, id: DeviceId) -> Option<HapticCaps>;

    /// Whether the system-wide vibration service currently reports a
    /// functioning vibrator. Gates the sentinel registry entry.
    fn system_haptic_available(&self) -> bool;
}

/// Split a device's motion ranges into regular axes and hat pairs.
///
/// Ranges are sorted by their stable axis identifier before
/// classification, so the axis index reported for a physical control
/// never changes between polls. Hat X/Y ranges are paired two at a time
/// (X then Y); any unpaired hat range falls back to a regular axis.
pub fn classify_motion_ranges(
    mut ranges: Vec<MotionRange>,
) -> (Vec<MotionRange>, Vec<(u16, u16)>) {
    ranges.sort_by_key(|range| range.axis);

    let mut axes = Vec::new();
    let mut hat_pending: Option<MotionRange> = None;
    let mut hats = Vec::new();

    for range in ranges {
        if range.axis == AXIS_HAT_X || range.axis == AXIS_HAT_Y {
            match hat_pending.take() {
                Some(first) => hats.push((first.axis, range.axis)),
                None => hat_pending = Some(range),
            }
        } else {
            axes.push(range);
        }
    }

    if let Some(orphan) = hat_pending {
        axes.push(orphan);
    }

    (axes, hats)
}
