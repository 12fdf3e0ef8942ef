// ── Decode error types ──
//
// Every failure at the record boundary is permanent: the wire data has the
// wrong shape. Nothing here is retryable and nothing is swallowed -- callers
// decide whether a bad record aborts a batch or gets skipped.

use thiserror::Error;

use crate::model::ModelType;
use crate::registry::EntityKind;

/// Failure to identify or construct a typed entity from a raw record.
#[derive(Debug, Error)]
pub enum DecodeError {
    // ── Type resolution ──────────────────────────────────────────────
    /// Neither `modelkey` nor `modelKey` is present.
    #[error("No model key")]
    MissingModelKey,

    /// The tag value is not one of the known model literals.
    #[error("Invalid model key: {value}")]
    InvalidModelKey { value: String },

    /// The tag is a valid model type but nothing is registered for it.
    #[error("Unknown model key: {model}")]
    UnknownModelKey { model: ModelType },

    // ── Entity construction ──────────────────────────────────────────
    /// The entity's own field decoding rejected the record.
    #[error("Failed to decode {kind} record: {source}")]
    Field {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    // ── Input shape ──────────────────────────────────────────────────
    /// A JSON value that is not an object was handed in as a record.
    #[error("Expected a JSON object record, found {found}")]
    NotARecord { found: &'static str },
}

impl DecodeError {
    /// Returns `true` if the record could not be resolved to an entity type
    /// (as opposed to failing inside the entity's field decoding).
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::MissingModelKey | Self::InvalidModelKey { .. } | Self::UnknownModelKey { .. }
        )
    }
}

/// Programming error: a registry was assembled without covering every tag.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("model registry is missing entries for: {}", format_models(.missing))]
    Incomplete { missing: Vec<ModelType> },
}

fn format_models(models: &[ModelType]) -> String {
    models
        .iter()
        .map(|model| model.as_wire())
        .collect::<Vec<_>>()
        .join(", ")
}
