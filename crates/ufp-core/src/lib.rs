//! Typed decoding of UniFi Protect API records.
//!
//! Protect hands back loosely shaped JSON objects that name their own type
//! in a `modelKey` (or legacy `modelkey`) field. This crate turns them into
//! strongly typed entities:
//!
//! - **[`ModelType`]**: closed set of model tags as they appear on the wire.
//!
//! - **[`ModelRegistry`]**: immutable, process-wide mapping from each tag
//!   to the [`EntityKind`] that owns it. Coverage is checked by the
//!   compiler for the standard mapping and eagerly for custom ones.
//!
//! - **[`Dispatcher`]**: extracts and parses the tag, resolves it through
//!   the registry, and delegates to the entity's [`FromUnifiDict`]
//!   constructor. Failures surface as [`DecodeError`].
//!
//! - **Domain model** ([`model`]): `Camera`, `Sensor`, `User`, `Event`, …
//!   collected in the [`ProtectModel`] sum type. Entities retain the
//!   optional [`ProtectClient`] session handle they were built with.

pub mod client;
pub mod convert;
pub mod error;
pub mod model;
pub mod registry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::{ProtectClient, SessionConfig};
pub use convert::{Dispatcher, construct, construct_as, resolve_type};
pub use error::{DecodeError, RegistryError};
pub use model::{FromUnifiDict, ModelType, ProtectModel, RawRecord};
pub use registry::{EntityKind, ModelRegistry};
