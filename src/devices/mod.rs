//! Device registry and per-poll reconciliation
//!
//! The host enumerates input devices by integer id; this module diffs each
//! polled snapshot against typed registries (joystick and haptic) and
//! produces stable add/remove notifications for the native worker.
//!
//! Capability queries go through the [`DeviceProbe`] seam so the host
//! platform layer stays out of the core. A probe failure for a given id is
//! treated as "no capability" and never aborts a poll; devices unplugged
//! mid-query are an expected race.

mod probe;
mod reconciler;
mod registry;
mod stub;

pub use probe::{classify_motion_ranges, DeviceProbe, HapticCaps, JoystickCaps, MotionRange};
pub use reconciler::{DeviceReconciler, ReconcileOutcome};
pub use registry::{DeviceRegistry, HapticRecord, JoystickRecord, Keyed};
pub use stub::StubDeviceProbe;

/// Stable process-local device identifier assigned by the host.
pub type DeviceId = i32;

/// Synthetic device id for the system-wide vibration service.
///
/// This entry represents a system capability rather than a physical
/// device, so it is exempt from removal-by-absence during reconciliation.
pub const HAPTIC_SENTINEL_ID: DeviceId = 999999;

/// Axis identifier of the horizontal hat (d-pad) axis.
pub const AXIS_HAT_X: u16 = 15;

/// Axis identifier of the vertical hat (d-pad) axis.
pub const AXIS_HAT_Y: u16 = 16;
