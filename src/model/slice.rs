use super::{PageRecord, SliceDescriptor};
use crate::schema::{Field, FieldKind, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One slice of a test read: the pages fetched for it, the partition it covers and the
/// connector state after reading it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct SliceRecord {
    #[serde(rename = "pages")]
    pages: Vec<PageRecord>,
    #[serde(
        rename = "slice_descriptor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    slice_descriptor: Option<SliceDescriptor>,
    #[serde(rename = "state", default, skip_serializing_if = "Option::is_none")]
    state: Option<Map<String, Value>>,
}

impl SliceRecord {
    /// The pages, in the order they were requested
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// The partition this slice covers, if the connector reported one
    pub fn slice_descriptor(&self) -> Option<&SliceDescriptor> {
        self.slice_descriptor.as_ref()
    }

    /// Opaque checkpoint state
    pub fn state(&self) -> Option<&Map<String, Value>> {
        self.state.as_ref()
    }
}

impl Record for SliceRecord {
    const NAME: &'static str = "SliceRecord";
    const FIELDS: &'static [Field] = &[
        Field::required(
            "pages",
            "pages",
            FieldKind::Array(&FieldKind::Record(PageRecord::NAME)),
        ),
        Field::optional(
            "slice_descriptor",
            "slice_descriptor",
            FieldKind::Record(SliceDescriptor::NAME),
        ),
        Field::optional("state", "state", FieldKind::Object),
    ];
}
