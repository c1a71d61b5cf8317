use crate::schema::{Field, FieldKind, Record};
use serde::{Deserialize, Serialize};

/// Describes the partition a slice was read for
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct SliceDescriptor {
    #[serde(rename = "start_datetime", default, skip_serializing_if = "Option::is_none")]
    start_datetime: Option<String>,
    #[serde(rename = "list_item", default, skip_serializing_if = "Option::is_none")]
    list_item: Option<String>,
}

impl SliceDescriptor {
    /// Lower bound of a datetime-based partition
    pub fn start_datetime(&self) -> Option<&str> {
        self.start_datetime.as_deref()
    }

    /// The item of a list-based partition
    pub fn list_item(&self) -> Option<&str> {
        self.list_item.as_deref()
    }

    /// Whether neither partition key is set
    pub fn is_empty(&self) -> bool {
        self.start_datetime.is_none() && self.list_item.is_none()
    }
}

impl Record for SliceDescriptor {
    const NAME: &'static str = "SliceDescriptor";
    const FIELDS: &'static [Field] = &[
        Field::optional("start_datetime", "start_datetime", FieldKind::String),
        Field::optional("list_item", "list_item", FieldKind::String),
    ];
}
