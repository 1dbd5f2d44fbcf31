//! Event normalization for raw host input samples
//!
//! Pure, stateless functions mapping raw pointer/axis/pressure samples into
//! the coordinate space the native worker expects. These are invoked once
//! per reported sample and have no side effects.
//!
//! Precondition violations (degenerate axis range, non-positive pointer
//! extent) are programming errors and panic rather than producing silently
//! wrong values; masking them would hide real races in the caller.

/// Standard gravity, used to scale raw accelerometer readings.
pub const GRAVITY_EARTH: f32 = 9.80665;

/// Display rotation reported by the host for accelerometer remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Rescale a raw axis sample into [-1.0, 1.0].
///
/// `range_min` maps to exactly -1.0 and `range_max` to exactly 1.0.
///
/// # Panics
/// Panics if `range_min >= range_max`.
pub fn normalize_axis(raw: f32, range_min: f32, range_max: f32) -> f32 {
    assert!(
        range_min < range_max,
        "degenerate axis range: [{}, {}]",
        range_min,
        range_max
    );
    ((raw - range_min) / (range_max - range_min)) * 2.0 - 1.0
}

/// Rescale a raw pointer coordinate into [0.0, 1.0] of the surface extent.
///
/// # Panics
/// Panics if `extent <= 0.0`.
pub fn normalize_pointer(raw: f32, extent: f32) -> f32 {
    assert!(extent > 0.0, "pointer extent must be positive: {}", extent);
    raw / extent
}

/// Clamp a pressure sample into [0.0, 1.0].
///
/// Some devices report pressure above 1.0; those values are clamped
/// rather than propagated.
pub fn clamp_pressure(raw: f32) -> f32 {
    if raw > 1.0 {
        1.0
    } else if raw < 0.0 {
        0.0
    } else {
        raw
    }
}

/// Normalize a full touch sample against the surface dimensions.
///
/// Returns `(x, y, pressure)` with coordinates in [0.0, 1.0].
pub fn normalize_touch(x: f32, y: f32, pressure: f32, width: f32, height: f32) -> (f32, f32, f32) {
    (
        normalize_pointer(x, width),
        normalize_pointer(y, height),
        clamp_pressure(pressure),
    )
}

/// Remap raw accelerometer values into the worker's expected frame.
///
/// The host sensor reports values in the device's natural orientation;
/// the worker expects them relative to the current display rotation,
/// scaled by standard gravity. The x axis is negated after remapping to
/// match the worker's handedness.
pub fn remap_accelerometer(values: [f32; 3], rotation: DisplayRotation) -> [f32; 3] {
    let (x, y) = match rotation {
        DisplayRotation::Deg90 => (-values[1], values[0]),
        DisplayRotation::Deg270 => (values[1], -values[0]),
        DisplayRotation::Deg180 => (-values[1], -values[0]),
        DisplayRotation::Deg0 => (values[0], values[1]),
    };
    [
        -x / GRAVITY_EARTH,
        y / GRAVITY_EARTH,
        values[2] / GRAVITY_EARTH,
    ]
}
