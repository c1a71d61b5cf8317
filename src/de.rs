//! # SerDe Utilities

use crate::error::{FieldPath, SchemaValidationError, Segment, ValidationReason};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode `value` into `T`, keeping track of where in the payload a failure happened
pub fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, SchemaValidationError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = field_path(err.path());
        SchemaValidationError::new(path, ValidationReason::Decode(err.into_inner().to_string()))
    })
}

fn field_path(path: &serde_path_to_error::Path) -> FieldPath {
    use serde_path_to_error::Segment as S;

    let segments = path
        .iter()
        .filter_map(|segment| match segment {
            S::Seq { index } => Some(Segment::Index(*index)),
            S::Map { key } => Some(Segment::Key(key.clone())),
            S::Enum { variant } => Some(Segment::Key(variant.clone())),
            _ => None,
        })
        .collect::<Vec<_>>();
    FieldPath::from(segments)
}
