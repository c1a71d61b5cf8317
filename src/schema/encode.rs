use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// How optional fields without a value are written
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[derivative(Default)]
#[serde(rename_all = "snake_case")]
pub enum AbsentFields {
    /// Leave the key out of the object
    #[derivative(Default)]
    Omit,
    /// Write the key with a `null` value
    Null,
}

/// Options for turning a record into JSON
///
/// Can be read from a configuration document, e.g. `{"absent": "null"}`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncodeOptions {
    /// Policy for optional fields that have no value
    #[serde(default)]
    pub absent: AbsentFields,
}

impl EncodeOptions {
    /// Emit `null` for every absent optional field
    pub fn explicit_nulls() -> Self {
        Self {
            absent: AbsentFields::Null,
        }
    }
}
