// ── Device domain types ──
//
// Cameras, lights, sensors, doorlocks, bridges and viewers all share the
// adoptable-device fields in `DeviceBase`; each adds its own state on top.
// Fields use `#[serde(default)]` liberally because firmware versions are
// inconsistent about field presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mac::MacAddress;
use crate::client::ProtectClient;

/// Device connection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum DeviceState {
    Connected,
    Connecting,
    Disconnected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DeviceState {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Fields common to every adoptable Protect device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBase {
    pub id: String,
    #[serde(default)]
    pub mac: Option<MacAddress>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Hardware model string (e.g., `UVC G4 Bullet`).
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default)]
    pub state: DeviceState,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub up_since: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Battery report from battery-powered sensors and locks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryStatus {
    #[serde(default)]
    pub percentage: Option<u8>,
    #[serde(default)]
    pub is_low: bool,
}

// ── Camera ──────────────────────────────────────────────────────────

/// One RTSP channel on a camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraChannel {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub fps: u32,
    #[serde(default)]
    pub bitrate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Camera {
    #[serde(flatten)]
    pub base: DeviceBase,
    #[serde(default)]
    pub is_recording: bool,
    #[serde(default)]
    pub is_motion_detected: bool,
    #[serde(default)]
    pub is_smart_detected: bool,
    #[serde(default)]
    pub is_dark: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_motion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub channels: Vec<CameraChannel>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

impl Camera {
    /// Largest enabled channel, by pixel count.
    pub fn main_channel(&self) -> Option<&CameraChannel> {
        self.channels
            .iter()
            .filter(|c| c.enabled)
            .max_by_key(|c| u64::from(c.width) * u64::from(c.height))
    }
}

// ── Light ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    #[serde(flatten)]
    pub base: DeviceBase,
    #[serde(default)]
    pub is_light_on: bool,
    #[serde(default)]
    pub is_pir_motion_detected: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_motion: Option<DateTime<Utc>>,
    /// Id of the paired camera.
    #[serde(default)]
    pub camera: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

// ── Sensor ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    #[serde(flatten)]
    pub base: DeviceBase,
    #[serde(default)]
    pub mount_type: Option<String>,
    #[serde(default)]
    pub is_opened: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub open_status_changed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_motion_detected: bool,
    #[serde(default)]
    pub battery_status: BatteryStatus,
    #[serde(default)]
    pub camera: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

// ── Doorlock ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum LockStatus {
    Open,
    Opening,
    Closed,
    Closing,
    JammedWhileClosing,
    JammedWhileOpening,
    FailedWhileClosing,
    FailedWhileOpening,
    NotCalibrated,
    AutoCalibrationInProgress,
    CalibrationWaitingForDoorState,
    #[default]
    #[serde(other)]
    Unknown,
}

impl LockStatus {
    pub fn is_jammed(&self) -> bool {
        matches!(self, Self::JammedWhileClosing | Self::JammedWhileOpening)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doorlock {
    #[serde(flatten)]
    pub base: DeviceBase,
    #[serde(default)]
    pub lock_status: LockStatus,
    #[serde(default)]
    pub battery_status: BatteryStatus,
    #[serde(default)]
    pub camera: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

// ── Bridge / Viewer ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bridge {
    #[serde(flatten)]
    pub base: DeviceBase,
    #[serde(default)]
    pub platform: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

/// Viewport display device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    #[serde(flatten)]
    pub base: DeviceBase,
    #[serde(default)]
    pub stream_limit: Option<u32>,
    #[serde(default)]
    pub software_version: Option<String>,
    /// Id of the liveview currently shown.
    #[serde(default)]
    pub liveview: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

impl_from_unifi_dict! {
    Camera => Camera,
    Light => Light,
    Sensor => Sensor,
    Doorlock => Doorlock,
    Bridge => Bridge,
    Viewer => Viewer,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{FromUnifiDict, RawRecord};
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn camera_decodes_base_and_channels() {
        let camera = Camera::from_unifi_dict(
            record(json!({
                "id": "61b3f5c7033ea703e7000424",
                "mac": "AABBCCDDEEFF",
                "name": "Front Door",
                "type": "UVC G4 Doorbell",
                "state": "CONNECTED",
                "isConnected": true,
                "isRecording": true,
                "upSince": 1_639_000_000_000_i64,
                "channels": [
                    { "id": 0, "name": "High", "enabled": true, "width": 1920, "height": 1080 },
                    { "id": 1, "name": "Medium", "enabled": true, "width": 1280, "height": 720 },
                    { "id": 2, "name": "Low", "enabled": false, "width": 4000, "height": 3000 }
                ],
                "someFutureField": { "nested": true }
            })),
            None,
        )
        .unwrap();

        assert_eq!(camera.base.name.as_deref(), Some("Front Door"));
        assert_eq!(camera.base.mac.as_ref().unwrap().as_str(), "aa:bb:cc:dd:ee:ff");
        assert!(camera.base.state.is_online());
        assert!(camera.is_recording);
        assert_eq!(camera.base.up_since.unwrap().timestamp(), 1_639_000_000);
        assert_eq!(camera.main_channel().unwrap().name, "High");
        assert!(camera.api().is_none());
    }

    #[test]
    fn unknown_device_state_is_tolerated() {
        let light = Light::from_unifi_dict(
            record(json!({ "id": "light1", "state": "SOMETHING_NEW", "isLightOn": true })),
            None,
        )
        .unwrap();
        assert_eq!(light.base.state, DeviceState::Unknown);
        assert!(light.is_light_on);
    }

    #[test]
    fn doorlock_status() {
        let lock = Doorlock::from_unifi_dict(
            record(json!({
                "id": "lock1",
                "lockStatus": "JAMMED_WHILE_CLOSING",
                "batteryStatus": { "percentage": 12, "isLow": true }
            })),
            None,
        )
        .unwrap();
        assert!(lock.lock_status.is_jammed());
        assert!(lock.battery_status.is_low);
        assert_eq!(lock.battery_status.percentage, Some(12));
    }

    #[test]
    fn missing_id_is_a_field_error() {
        let err = Sensor::from_unifi_dict(record(json!({ "name": "Garage" })), None).unwrap_err();
        assert!(
            matches!(err, crate::DecodeError::Field { kind: crate::EntityKind::Sensor, .. }),
            "unexpected error: {err:?}"
        );
    }
}
