//! # Record schemas
//!
//! Every record declares a static alias table ([`Record::FIELDS`]). The tables of all records
//! are collected by a [`SchemaBuilder`] and resolved in one step into [`Schemas`], which then
//! drives validation, decoding and encoding.
mod encode;
mod field;
mod registry;

pub use encode::{AbsentFields, EncodeOptions};
pub use field::{Field, FieldKind};
pub use registry::{install_with, installed, ResolveError, SchemaBuilder, Schemas};

use crate::error::SchemaValidationError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// A schema-validated data-transfer object
///
/// The serde impls must use the wire names from [`FIELDS`](Record::FIELDS) and skip
/// `None` values.
pub trait Record: Serialize + DeserializeOwned + Sized {
    /// The name other records use to refer to this one
    const NAME: &'static str;
    /// The alias table
    const FIELDS: &'static [Field];

    /// Validate `payload` and decode it
    ///
    /// # Panics
    ///
    /// If the process-wide schemas have not been resolved yet.
    fn construct(payload: &Value) -> Result<Self, SchemaValidationError> {
        installed().construct(payload)
    }

    /// Encode with the default options
    fn to_json(&self) -> Map<String, Value> {
        self.to_json_with(&EncodeOptions::default())
    }

    /// Encode with the given options
    fn to_json_with(&self, options: &EncodeOptions) -> Map<String, Value> {
        installed().encode(self, options)
    }

    /// Look up the alias table entry for an in-memory field name
    fn field(name: &str) -> Option<&'static Field> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }

    /// The wire key for an in-memory field name
    fn wire_name(name: &str) -> Option<&'static str> {
        Self::field(name).map(|field| field.wire)
    }
}
