//! Configuration management for session tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling tuning of device polling and sensor behavior without
//! recompilation. Values not present in the file fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub devices: DevicePollConfig,
    #[serde(default)]
    pub sensors: SensorConfig,
    #[serde(default)]
    pub events: EventChannelConfig,
}

/// Device reconciliation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePollConfig {
    /// Interval between device-id snapshot polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Log every reconciled add/remove at info level
    pub log_device_changes: bool,
}

impl Default for DevicePollConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000,
            log_device_changes: true,
        }
    }
}

/// Sensor gating parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Enable the motion sensor while the session is resumed
    pub motion_sensor: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            motion_sensor: true,
        }
    }
}

/// Session event channel parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventChannelConfig {
    /// Broadcast buffer capacity for session events
    pub buffer_size: usize,
}

impl Default for EventChannelConfig {
    fn default() -> Self {
        Self { buffer_size: 128 }
    }
}

impl Default for SessionConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            devices: DevicePollConfig::default(),
            sensors: SensorConfig::default(),
            events: EventChannelConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or defaults if the file is missing or invalid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the host-provided assets directory
    #[cfg(target_os = "android")]
    pub fn load() -> Self {
        // Host asset loading goes through the platform AssetManager; until
        // that is wired, Android sessions run with defaults.
        log::info!("[Config] Using default configuration on Android");
        Self::default()
    }

    /// Load configuration for non-Android platforms
    #[cfg(not(target_os = "android"))]
    pub fn load() -> Self {
        Self::load_from_file("assets/session_config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.devices.poll_interval_ms, 3000);
        assert!(config.sensors.motion_sensor);
        assert_eq!(config.events.buffer_size, 128);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = SessionConfig::load_from_file("/nonexistent/session_config.json");
        assert_eq!(config.devices.poll_interval_ms, 3000);
    }

    #[test]
    fn test_partial_json_uses_section_defaults() {
        let json = r#"{ "devices": { "poll_interval_ms": 500, "log_device_changes": false } }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.devices.poll_interval_ms, 500);
        assert!(!config.devices.log_device_changes);
        // Sections absent from the file keep their defaults
        assert!(config.sensors.motion_sensor);
        assert_eq!(config.events.buffer_size, 128);
    }

    #[test]
    fn test_round_trip_serialization() {
        let config = SessionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.devices.poll_interval_ms,
            config.devices.poll_interval_ms
        );
        assert_eq!(parsed.events.buffer_size, config.events.buffer_size);
    }
}
