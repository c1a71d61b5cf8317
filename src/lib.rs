#![warn(missing_docs)]
//! # Connector builder models
//!
//! The data-transfer objects returned by a connector builder test read, together with the
//! machinery every one of them shares: a static alias table per record, a two-phase schema
//! resolution step and path-aware validation of incoming JSON.
//!
//! ```
//! use connector_builder_models::model::{self, SliceRecord};
//! use connector_builder_models::Record;
//! use serde_json::json;
//!
//! model::resolve();
//! let slice = SliceRecord::construct(&json!({"pages": []})).unwrap();
//! assert!(slice.pages().is_empty());
//! assert!(slice.slice_descriptor().is_none());
//! ```

#[macro_use]
extern crate derive_new;

pub(crate) mod de;
pub mod error;
pub mod model;
pub mod schema;

#[cfg(test)]
mod tests;

pub use error::{FieldPath, SchemaValidationError, Segment, ValidationReason};
pub use schema::{
    AbsentFields, EncodeOptions, Field, FieldKind, Record, ResolveError, SchemaBuilder, Schemas,
};
