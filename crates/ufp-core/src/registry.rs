// ── Model registry ──
//
// Single source of truth for "which entity type owns records tagged X".
// The standard mapping is an exhaustive `match`, so adding a `ModelType`
// variant without an entity is a compile error. The registry itself is
// built once per process and only ever read afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::client::ProtectClient;
use crate::error::{DecodeError, RegistryError};
use crate::model::{
    Bridge, Camera, CloudAccount, Doorlock, Event, FromUnifiDict, Group, Light, Liveview, ModelType,
    Nvr, ProtectModel, RawRecord, Sensor, User, UserLocation, Viewer,
};

// ── EntityKind ──────────────────────────────────────────────────────

/// Concrete entity type a record decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum EntityKind {
    Event,
    Group,
    UserLocation,
    CloudAccount,
    User,
    Nvr,
    Light,
    Camera,
    Liveview,
    Viewer,
    Bridge,
    Sensor,
    Doorlock,
}

impl EntityKind {
    /// Standard owner of each model tag.
    pub const fn for_model(model: ModelType) -> Self {
        match model {
            ModelType::Event => Self::Event,
            ModelType::Group => Self::Group,
            ModelType::UserLocation => Self::UserLocation,
            ModelType::CloudIdentity => Self::CloudAccount,
            ModelType::User => Self::User,
            ModelType::Nvr => Self::Nvr,
            ModelType::Light => Self::Light,
            ModelType::Camera => Self::Camera,
            ModelType::Liveview => Self::Liveview,
            ModelType::Viewport => Self::Viewer,
            ModelType::Bridge => Self::Bridge,
            ModelType::Sensor => Self::Sensor,
            ModelType::Doorlock => Self::Doorlock,
        }
    }

    /// Model tag this entity type is registered under by default.
    pub const fn model_type(self) -> ModelType {
        match self {
            Self::Event => ModelType::Event,
            Self::Group => ModelType::Group,
            Self::UserLocation => ModelType::UserLocation,
            Self::CloudAccount => ModelType::CloudIdentity,
            Self::User => ModelType::User,
            Self::Nvr => ModelType::Nvr,
            Self::Light => ModelType::Light,
            Self::Camera => ModelType::Camera,
            Self::Liveview => ModelType::Liveview,
            Self::Viewer => ModelType::Viewport,
            Self::Bridge => ModelType::Bridge,
            Self::Sensor => ModelType::Sensor,
            Self::Doorlock => ModelType::Doorlock,
        }
    }

    /// Run this entity type's `FromUnifiDict` constructor.
    ///
    /// Entity errors are returned exactly as the constructor produced them.
    pub fn build(
        self,
        record: RawRecord,
        api: Option<ProtectClient>,
    ) -> Result<ProtectModel, DecodeError> {
        Ok(match self {
            Self::Event => ProtectModel::Event(Event::from_unifi_dict(record, api)?),
            Self::Group => ProtectModel::Group(Group::from_unifi_dict(record, api)?),
            Self::UserLocation => {
                ProtectModel::UserLocation(UserLocation::from_unifi_dict(record, api)?)
            }
            Self::CloudAccount => {
                ProtectModel::CloudAccount(CloudAccount::from_unifi_dict(record, api)?)
            }
            Self::User => ProtectModel::User(User::from_unifi_dict(record, api)?),
            Self::Nvr => ProtectModel::Nvr(Nvr::from_unifi_dict(record, api)?),
            Self::Light => ProtectModel::Light(Light::from_unifi_dict(record, api)?),
            Self::Camera => ProtectModel::Camera(Camera::from_unifi_dict(record, api)?),
            Self::Liveview => ProtectModel::Liveview(Liveview::from_unifi_dict(record, api)?),
            Self::Viewer => ProtectModel::Viewer(Viewer::from_unifi_dict(record, api)?),
            Self::Bridge => ProtectModel::Bridge(Bridge::from_unifi_dict(record, api)?),
            Self::Sensor => ProtectModel::Sensor(Sensor::from_unifi_dict(record, api)?),
            Self::Doorlock => ProtectModel::Doorlock(Doorlock::from_unifi_dict(record, api)?),
        })
    }
}

// ── ModelRegistry ───────────────────────────────────────────────────

static GLOBAL: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::standard);

/// Immutable mapping from model tag to entity type.
///
/// Safe to share across threads without locking once built.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: HashMap<ModelType, EntityKind>,
}

impl ModelRegistry {
    /// Process-wide registry with the standard mapping.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Standard mapping: every `ModelType` to its `EntityKind::for_model`.
    pub fn standard() -> Self {
        let entries: HashMap<_, _> = ModelType::iter()
            .map(|model| (model, EntityKind::for_model(model)))
            .collect();
        debug!(entries = entries.len(), "built model registry");
        Self { entries }
    }

    /// Build a registry from explicit entries, rejecting any gap in coverage.
    ///
    /// Later entries for the same tag replace earlier ones.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (ModelType, EntityKind)>,
    ) -> Result<Self, RegistryError> {
        let entries: HashMap<_, _> = entries.into_iter().collect();
        let missing: Vec<ModelType> = ModelType::iter()
            .filter(|model| !entries.contains_key(model))
            .collect();
        if !missing.is_empty() {
            return Err(RegistryError::Incomplete { missing });
        }
        Ok(Self { entries })
    }

    /// Registry with `model` left unmapped. Only tests need a gap.
    #[cfg(test)]
    pub(crate) fn without(model: ModelType) -> Self {
        let mut registry = Self::standard();
        registry.entries.remove(&model);
        registry
    }

    pub fn lookup(&self, model: ModelType) -> Option<EntityKind> {
        self.entries.get(&model).copied()
    }

    /// All mappings, in `ModelType` declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (ModelType, EntityKind)> + '_ {
        ModelType::iter().filter_map(|model| self.lookup(model).map(|kind| (model, kind)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
