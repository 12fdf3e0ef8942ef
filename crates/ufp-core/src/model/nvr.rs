// ── NVR, event and liveview domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mac::MacAddress;
use crate::client::ProtectClient;

/// The network video recorder itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nvr {
    pub id: String,
    #[serde(default)]
    pub mac: Option<MacAddress>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Protect application version.
    #[serde(default)]
    pub version: Option<String>,
    /// IANA timezone name (e.g., `America/New_York`).
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub is_hardware: bool,
    #[serde(default)]
    pub hardware_platform: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub up_since: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

/// Motion, ring, smart-detect or system event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    /// Raw event type (`motion`, `ring`, `smartDetectZone`, ...).
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start: DateTime<Utc>,
    /// `None` while the event is still ongoing.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: u8,
    /// Id of the camera that raised the event.
    #[serde(default, rename = "camera")]
    pub camera_id: Option<String>,
    #[serde(default)]
    pub smart_detect_types: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub heatmap: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

impl Event {
    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    pub fn duration(&self) -> Option<chrono::TimeDelta> {
        self.end.map(|end| end - self.start)
    }
}

/// One tile of a liveview layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveviewSlot {
    #[serde(default)]
    pub cameras: Vec<String>,
    #[serde(default)]
    pub cycle_mode: Option<String>,
    #[serde(default)]
    pub cycle_interval: Option<u32>,
}

/// Saved multi-camera layout shown on viewports and in the web UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liveview {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_global: bool,
    #[serde(default)]
    pub layout: u32,
    #[serde(default)]
    pub slots: Vec<LiveviewSlot>,
    /// Id of the owning user.
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

impl Liveview {
    /// Distinct camera ids across all slots, in slot order.
    pub fn camera_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for id in self.slots.iter().flat_map(|s| s.cameras.iter()) {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }
}

impl_from_unifi_dict! {
    Nvr => Nvr,
    Event => Event,
    Liveview => Liveview,
}
