use super::{PageRecord, SliceRecord};
use crate::schema::{Field, FieldKind, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The result of a test read of one stream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct StreamRead {
    #[serde(rename = "logs")]
    logs: Vec<LogMessage>,
    #[serde(rename = "slices")]
    slices: Vec<SliceRecord>,
    #[serde(rename = "test_read_limit_reached")]
    limit_reached: bool,
    #[serde(rename = "inferred_schema", default, skip_serializing_if = "Option::is_none")]
    inferred_schema: Option<Map<String, Value>>,
}

impl StreamRead {
    /// Messages the connector logged while reading
    pub fn logs(&self) -> &[LogMessage] {
        &self.logs
    }

    /// The slices that were read
    pub fn slices(&self) -> &[SliceRecord] {
        &self.slices
    }

    /// Whether reading stopped because a test read limit was hit
    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    /// The JSON schema inferred from the records
    pub fn inferred_schema(&self) -> Option<&Map<String, Value>> {
        self.inferred_schema.as_ref()
    }

    /// All pages of all slices, in read order
    pub fn pages(&self) -> impl Iterator<Item = &PageRecord> {
        self.slices.iter().flat_map(|slice| slice.pages())
    }

    /// The total number of records read
    pub fn record_count(&self) -> usize {
        self.pages().map(|page| page.records().len()).sum()
    }
}

impl Record for StreamRead {
    const NAME: &'static str = "StreamRead";
    const FIELDS: &'static [Field] = &[
        Field::required(
            "logs",
            "logs",
            FieldKind::Array(&FieldKind::Record(LogMessage::NAME)),
        ),
        Field::required(
            "slices",
            "slices",
            FieldKind::Array(&FieldKind::Record(SliceRecord::NAME)),
        ),
        Field::required("limit_reached", "test_read_limit_reached", FieldKind::Boolean),
        Field::optional("inferred_schema", "inferred_schema", FieldKind::Object),
    ];
}

/// Severity of a [`LogMessage`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// `ERROR`
    Error,
    /// `WARN`
    Warn,
    /// `INFO`
    Info,
    /// `DEBUG`
    Debug,
    /// `TRACE`
    Trace,
}

impl LogLevel {
    /// The literals accepted on the wire
    pub const VARIANTS: &'static [&'static str] = &["ERROR", "WARN", "INFO", "DEBUG", "TRACE"];
}

/// A log line emitted by the connector
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct LogMessage {
    #[serde(rename = "message")]
    message: String,
    #[serde(rename = "level")]
    level: LogLevel,
}

impl LogMessage {
    /// The message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The severity
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

impl Record for LogMessage {
    const NAME: &'static str = "LogMessage";
    const FIELDS: &'static [Field] = &[
        Field::required("message", "message", FieldKind::String),
        Field::required("level", "level", FieldKind::OneOf(LogLevel::VARIANTS)),
    ];
}
