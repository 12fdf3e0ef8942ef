// ── Record → entity dispatch ──
//
// Reads the model key from a raw Protect record, resolves it through the
// `ModelRegistry`, and hands the record to the owning entity's
// `FromUnifiDict` constructor. Pure computation: no I/O, no caching, no
// hidden state. Every failure is returned to the caller as a `DecodeError`.

use serde_json::Value;
use tracing::trace;

use crate::client::ProtectClient;
use crate::error::DecodeError;
use crate::model::{FromUnifiDict, ModelType, ProtectModel, RawRecord};
use crate::registry::{EntityKind, ModelRegistry};

/// Legacy spelling of the model-key field. Checked first.
pub const LEGACY_MODEL_KEY: &str = "modelkey";
/// Current spelling of the model-key field.
pub const MODEL_KEY: &str = "modelKey";

// ── Tag extraction ──────────────────────────────────────────────────

/// Raw model-key value, preferring `modelkey` over `modelKey`.
///
/// Only these two exact spellings count; any other casing is treated as
/// absent.
pub fn model_key(record: &RawRecord) -> Option<&Value> {
    record
        .get(LEGACY_MODEL_KEY)
        .or_else(|| record.get(MODEL_KEY))
}

pub fn has_model_key(record: &RawRecord) -> bool {
    record.contains_key(LEGACY_MODEL_KEY) || record.contains_key(MODEL_KEY)
}

/// Parse a model-key value. Non-string values and unknown literals are
/// both `InvalidModelKey`.
pub fn parse_model_type(value: &Value) -> Result<ModelType, DecodeError> {
    let Some(raw) = value.as_str() else {
        return Err(DecodeError::InvalidModelKey {
            value: value.to_string(),
        });
    };
    raw.parse().map_err(|_| DecodeError::InvalidModelKey {
        value: raw.to_owned(),
    })
}

/// Unwrap a JSON value into a record, rejecting non-objects.
pub fn record_from_value(value: Value) -> Result<RawRecord, DecodeError> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(DecodeError::NotARecord {
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Dispatcher ──────────────────────────────────────────────────────

/// Resolves and constructs entities against a borrowed `ModelRegistry`.
///
/// Holds no mutable state; copies are free and may be used from any thread.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r ModelRegistry,
}

impl Default for Dispatcher<'static> {
    fn default() -> Self {
        Self::new(ModelRegistry::global())
    }
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ModelRegistry {
        self.registry
    }

    /// Entity type responsible for `record`.
    pub fn resolve_type(&self, record: &RawRecord) -> Result<EntityKind, DecodeError> {
        let value = model_key(record).ok_or(DecodeError::MissingModelKey)?;
        let model = parse_model_type(value)?;
        let kind = self
            .registry
            .lookup(model)
            .ok_or(DecodeError::UnknownModelKey { model })?;
        trace!(model = %model, kind = %kind, "resolved model key");
        Ok(kind)
    }

    /// Construct the typed entity for `record`.
    ///
    /// `kind` skips resolution when the caller already knows the type. The
    /// record must still carry a model key either way.
    pub fn construct(
        &self,
        record: RawRecord,
        api: Option<ProtectClient>,
        kind: Option<EntityKind>,
    ) -> Result<ProtectModel, DecodeError> {
        if !has_model_key(&record) {
            return Err(DecodeError::MissingModelKey);
        }

        let kind = match kind {
            Some(kind) => kind,
            None => self.resolve_type(&record)?,
        };
        kind.build(record, api)
    }

    /// [`construct`](Self::construct) for an arbitrary JSON value.
    pub fn construct_value(
        &self,
        value: Value,
        api: Option<ProtectClient>,
    ) -> Result<ProtectModel, DecodeError> {
        self.construct(record_from_value(value)?, api, None)
    }
}

// ── Shortcuts over the global registry ──────────────────────────────

/// [`Dispatcher::resolve_type`] against the process-wide registry.
pub fn resolve_type(record: &RawRecord) -> Result<EntityKind, DecodeError> {
    Dispatcher::default().resolve_type(record)
}

/// [`Dispatcher::construct`] against the process-wide registry.
pub fn construct(
    record: RawRecord,
    api: Option<ProtectClient>,
    kind: Option<EntityKind>,
) -> Result<ProtectModel, DecodeError> {
    Dispatcher::default().construct(record, api, kind)
}

/// Construct a statically known entity type directly.
///
/// Same structural check as [`construct`]: the model key must be present.
pub fn construct_as<T: FromUnifiDict>(
    record: RawRecord,
    api: Option<ProtectClient>,
) -> Result<T, DecodeError> {
    if !has_model_key(&record) {
        return Err(DecodeError::MissingModelKey);
    }
    T::from_unifi_dict(record, api)
}
