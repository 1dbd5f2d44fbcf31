// Typed device registries holding the currently known devices

use super::{DeviceId, MotionRange};

/// Record types stored in a [`DeviceRegistry`], keyed by device id.
pub trait Keyed {
    fn device_id(&self) -> DeviceId;
}

/// A registered joystick-class device.
///
/// `axes` and `hats` come out of motion-range classification; the position
/// of an entry in `axes` is the axis index reported to the worker and must
/// stay stable across polls for the same physical control.
#[derive(Debug, Clone, PartialEq)]
pub struct JoystickRecord {
    pub device_id: DeviceId,
    pub name: String,
    pub axes: Vec<MotionRange>,
    pub hats: Vec<(u16, u16)>,
}

impl Keyed for JoystickRecord {
    fn device_id(&self) -> DeviceId {
        self.device_id
    }
}

/// A registered haptic actuator: either a physical device's vibrator or
/// the synthetic system-wide vibration service entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HapticRecord {
    pub device_id: DeviceId,
    pub name: String,
}

impl Keyed for HapticRecord {
    fn device_id(&self) -> DeviceId {
        self.device_id
    }
}

/// Ordered registry of device records.
///
/// Registration order is preserved so that removal notifications and
/// iteration are deterministic (first seen, first reported). The registry
/// is mutated only by whichever thread runs reconciliation; callers
/// serialize their own poll ticks.
#[derive(Debug, Default)]
pub struct DeviceRegistry<R: Keyed> {
    records: Vec<R>,
}

impl<R: Keyed> DeviceRegistry<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.records.iter().any(|r| r.device_id() == id)
    }

    pub fn get(&self, id: DeviceId) -> Option<&R> {
        self.records.iter().find(|r| r.device_id() == id)
    }

    /// Insert a record. The id must not already be registered.
    pub fn insert(&mut self, record: R) {
        debug_assert!(!self.contains(record.device_id()));
        self.records.push(record);
    }

    pub fn remove(&mut self, id: DeviceId) -> Option<R> {
        let index = self.records.iter().position(|r| r.device_id() == id)?;
        Some(self.records.remove(index))
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<DeviceId> {
        self.records.iter().map(|r| r.device_id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
