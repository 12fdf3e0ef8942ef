// ── Protect domain model ──
//
// Every type in this module is the canonical representation of a Protect
// entity. Each one owns its own field decoding through `FromUnifiDict`;
// the dispatcher only decides *which* constructor runs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::ProtectClient;
use crate::error::DecodeError;
use crate::registry::EntityKind;

/// Untyped record exactly as received from the wire.
pub type RawRecord = Map<String, Value>;

/// "Build from wire record" contract shared by every entity type.
///
/// Implementations decode only the fields they declare and ignore the rest
/// (including the model-key field itself). The session handle, if given,
/// is retained for later lazy operations.
pub trait FromUnifiDict: Sized {
    /// Entity type this constructor produces.
    const KIND: EntityKind;

    fn from_unifi_dict(record: RawRecord, api: Option<ProtectClient>) -> Result<Self, DecodeError>;
}

/// Run serde field decoding for `kind`, tagging failures with the entity type.
pub(crate) fn decode_fields<T: DeserializeOwned>(
    kind: EntityKind,
    record: RawRecord,
) -> Result<T, DecodeError> {
    serde_json::from_value(Value::Object(record)).map_err(|source| DecodeError::Field { kind, source })
}

/// Implements `FromUnifiDict` plus the `api()` accessor for entities whose
/// only post-decode step is attaching the session handle.
macro_rules! impl_from_unifi_dict {
    ($($ty:ident => $kind:ident),+ $(,)?) => {$(
        impl $crate::model::FromUnifiDict for $ty {
            const KIND: $crate::registry::EntityKind = $crate::registry::EntityKind::$kind;

            fn from_unifi_dict(
                record: $crate::model::RawRecord,
                api: Option<$crate::client::ProtectClient>,
            ) -> Result<Self, $crate::error::DecodeError> {
                let mut entity: Self = $crate::model::decode_fields(Self::KIND, record)?;
                entity.api = api;
                Ok(entity)
            }
        }

        impl $ty {
            /// Session handle this entity was constructed with, if any.
            pub fn api(&self) -> Option<&$crate::client::ProtectClient> {
                self.api.as_ref()
            }
        }
    )+};
}

pub mod device;
pub mod mac;
pub mod model_type;
pub mod nvr;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::{
    BatteryStatus, Bridge, Camera, CameraChannel, DeviceBase, DeviceState, Doorlock, Light,
    LockStatus, Sensor, Viewer,
};
pub use mac::MacAddress;
pub use model_type::ModelType;
pub use nvr::{Event, Liveview, LiveviewSlot, Nvr};
pub use user::{
    CloudAccount, Group, Permission, PermissionError, PermissionNode, User, UserFeatureFlags,
    UserLocation,
};

// ── Constructed instances ───────────────────────────────────────────

/// A fully constructed entity, as returned by the dispatcher.
///
/// Serializes back to camelCase JSON carrying its `modelKey`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "modelKey")]
pub enum ProtectModel {
    #[serde(rename = "event")]
    Event(Event),
    #[serde(rename = "group")]
    Group(Group),
    #[serde(rename = "userLocation")]
    UserLocation(UserLocation),
    #[serde(rename = "cloudIdentity")]
    CloudAccount(CloudAccount),
    #[serde(rename = "user")]
    User(User),
    #[serde(rename = "nvr")]
    Nvr(Nvr),
    #[serde(rename = "light")]
    Light(Light),
    #[serde(rename = "camera")]
    Camera(Camera),
    #[serde(rename = "liveview")]
    Liveview(Liveview),
    #[serde(rename = "viewer")]
    Viewer(Viewer),
    #[serde(rename = "bridge")]
    Bridge(Bridge),
    #[serde(rename = "sensor")]
    Sensor(Sensor),
    #[serde(rename = "doorlock")]
    Doorlock(Doorlock),
}

impl ProtectModel {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Event(_) => EntityKind::Event,
            Self::Group(_) => EntityKind::Group,
            Self::UserLocation(_) => EntityKind::UserLocation,
            Self::CloudAccount(_) => EntityKind::CloudAccount,
            Self::User(_) => EntityKind::User,
            Self::Nvr(_) => EntityKind::Nvr,
            Self::Light(_) => EntityKind::Light,
            Self::Camera(_) => EntityKind::Camera,
            Self::Liveview(_) => EntityKind::Liveview,
            Self::Viewer(_) => EntityKind::Viewer,
            Self::Bridge(_) => EntityKind::Bridge,
            Self::Sensor(_) => EntityKind::Sensor,
            Self::Doorlock(_) => EntityKind::Doorlock,
        }
    }

    pub fn model_type(&self) -> ModelType {
        self.kind().model_type()
    }

    /// Object id. `UserLocation` is the only entity without one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Event(e) => Some(&e.id),
            Self::Group(g) => Some(&g.id),
            Self::UserLocation(_) => None,
            Self::CloudAccount(c) => Some(&c.id),
            Self::User(u) => Some(&u.id),
            Self::Nvr(n) => Some(&n.id),
            Self::Liveview(l) => Some(&l.id),
            Self::Light(Light { base, .. })
            | Self::Camera(Camera { base, .. })
            | Self::Viewer(Viewer { base, .. })
            | Self::Bridge(Bridge { base, .. })
            | Self::Sensor(Sensor { base, .. })
            | Self::Doorlock(Doorlock { base, .. }) => Some(&base.id),
        }
    }

    /// Human-readable label, where the entity has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Event(e) => Some(&e.event_type),
            Self::Group(g) => Some(&g.name),
            Self::UserLocation(_) => None,
            Self::CloudAccount(c) => Some(&c.name),
            Self::User(u) => Some(&u.name),
            Self::Nvr(n) => n.name.as_deref(),
            Self::Liveview(l) => Some(&l.name),
            Self::Light(Light { base, .. })
            | Self::Camera(Camera { base, .. })
            | Self::Viewer(Viewer { base, .. })
            | Self::Bridge(Bridge { base, .. })
            | Self::Sensor(Sensor { base, .. })
            | Self::Doorlock(Doorlock { base, .. }) => base.name.as_deref(),
        }
    }

    /// Session handle retained by the entity, if it was constructed with one.
    pub fn api(&self) -> Option<&ProtectClient> {
        match self {
            Self::Event(e) => e.api(),
            Self::Group(g) => g.api(),
            Self::UserLocation(l) => l.api(),
            Self::CloudAccount(c) => c.api(),
            Self::User(u) => u.api(),
            Self::Nvr(n) => n.api(),
            Self::Light(d) => d.api(),
            Self::Camera(d) => d.api(),
            Self::Liveview(l) => l.api(),
            Self::Viewer(d) => d.api(),
            Self::Bridge(d) => d.api(),
            Self::Sensor(d) => d.api(),
            Self::Doorlock(d) => d.api(),
        }
    }
}
