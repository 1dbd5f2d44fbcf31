// Per-poll reconciliation of observed device ids against the registries

use std::sync::Arc;

use log::{debug, info};

use super::probe::classify_motion_ranges;
use super::registry::{DeviceRegistry, HapticRecord, JoystickRecord};
use super::{DeviceId, DeviceProbe, HAPTIC_SENTINEL_ID};

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome<R> {
    pub added: Vec<R>,
    pub removed: Vec<DeviceId>,
}

impl<R> ReconcileOutcome<R> {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Diffs polled device-id snapshots against the joystick and haptic
/// registries and reports stable add/remove notifications.
///
/// Snapshots are processed in reverse order: multi-device receivers
/// enumerate composite devices in an order where reverse iteration
/// preserves the historical "first seen = first controller" assignment
/// expected downstream. This is an empirical heuristic for specific
/// receiver hardware, kept as-is rather than generalized.
///
/// Additions are processed before removals, so a device id that
/// disappears and reappears within the same poll tick never produces a
/// spurious remove+add pair.
pub struct DeviceReconciler {
    joysticks: DeviceRegistry<JoystickRecord>,
    haptics: DeviceRegistry<HapticRecord>,
    probe: Arc<dyn DeviceProbe>,
}

impl DeviceReconciler {
    pub fn new(probe: Arc<dyn DeviceProbe>) -> Self {
        Self {
            joysticks: DeviceRegistry::new(),
            haptics: DeviceRegistry::new(),
            probe,
        }
    }

    /// Reconcile the joystick registry against a fresh id snapshot.
    pub fn reconcile_joysticks(
        &mut self,
        current_ids: &[DeviceId],
    ) -> ReconcileOutcome<JoystickRecord> {
        let mut added = Vec::new();

        for &id in current_ids.iter().rev() {
            if self.joysticks.contains(id) {
                continue;
            }
            match self.probe.joystick_caps(id) {
                Some(caps) => {
                    let (axes, hats) = classify_motion_ranges(caps.motion_ranges);
                    let record = JoystickRecord {
                        device_id: id,
                        name: caps.name,
                        axes,
                        hats,
                    };
                    info!(
                        "[Devices] joystick added: id={} name={} axes={} hats={}",
                        id,
                        record.name,
                        record.axes.len(),
                        record.hats.len()
                    );
                    self.joysticks.insert(record.clone());
                    added.push(record);
                }
                None => {
                    // Not joystick-class, or the query raced an unplug.
                    debug!("[Devices] id={} excluded from joystick registry", id);
                }
            }
        }

        let removed: Vec<DeviceId> = self
            .joysticks
            .ids()
            .into_iter()
            .filter(|id| !current_ids.contains(id))
            .collect();
        for &id in &removed {
            info!("[Devices] joystick removed: id={}", id);
            self.joysticks.remove(id);
        }

        ReconcileOutcome { added, removed }
    }

    /// Reconcile the haptic registry against a fresh id snapshot.
    ///
    /// Besides physical vibrators, the registry carries one synthetic
    /// entry for the system-wide vibration service under
    /// [`HAPTIC_SENTINEL_ID`]. The sentinel is added whenever the system
    /// capability check reports true and removed only when it reports
    /// false, never by absence from the id snapshot.
    pub fn reconcile_haptics(&mut self, current_ids: &[DeviceId]) -> ReconcileOutcome<HapticRecord> {
        let mut added = Vec::new();

        for &id in current_ids.iter().rev() {
            if self.haptics.contains(id) {
                continue;
            }
            if let Some(caps) = self.probe.haptic_caps(id) {
                let record = HapticRecord {
                    device_id: id,
                    name: caps.name,
                };
                info!("[Devices] haptic added: id={} name={}", id, record.name);
                self.haptics.insert(record.clone());
                added.push(record);
            }
        }

        let system_available = self.probe.system_haptic_available();
        if system_available && !self.haptics.contains(HAPTIC_SENTINEL_ID) {
            let record = HapticRecord {
                device_id: HAPTIC_SENTINEL_ID,
                name: "system vibration service".to_string(),
            };
            info!("[Devices] system haptic registered");
            self.haptics.insert(record.clone());
            added.push(record);
        }

        let removed: Vec<DeviceId> = self
            .haptics
            .ids()
            .into_iter()
            .filter(|&id| {
                if id == HAPTIC_SENTINEL_ID {
                    !system_available
                } else {
                    !current_ids.contains(&id)
                }
            })
            .collect();
        for &id in &removed {
            info!("[Devices] haptic removed: id={}", id);
            self.haptics.remove(id);
        }

        ReconcileOutcome { added, removed }
    }

    pub fn joystick(&self, id: DeviceId) -> Option<&JoystickRecord> {
        self.joysticks.get(id)
    }

    pub fn haptic(&self, id: DeviceId) -> Option<&HapticRecord> {
        self.haptics.get(id)
    }

    pub fn joystick_count(&self) -> usize {
        self.joysticks.len()
    }

    pub fn haptic_count(&self) -> usize {
        self.haptics.len()
    }

    /// Drop all registered devices. Used during session teardown.
    pub fn clear(&mut self) {
        self.joysticks.clear();
        self.haptics.clear();
    }
}
