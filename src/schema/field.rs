/// The declared shape of a field value
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string
    String,
    /// A JSON number without fractional part
    Integer,
    /// `true` or `false`
    Boolean,
    /// A JSON object with unconstrained values
    Object,
    /// Any JSON value
    Any,
    /// A string out of a closed set of literals
    OneOf(&'static [&'static str]),
    /// A JSON array whose elements all have the given kind
    Array(&'static FieldKind),
    /// Another record, referenced by its [`Record::NAME`](super::Record::NAME)
    Record(&'static str),
}

impl FieldKind {
    /// The record this kind refers to, directly or as the element of an array
    pub fn record_ref(self) -> Option<&'static str> {
        match self {
            Self::Record(name) => Some(name),
            Self::Array(inner) => inner.record_ref(),
            _ => None,
        }
    }
}

/// One entry of a record's alias table
///
/// The table maps the in-memory field name to the key used on the wire. Decoding and
/// encoding both go through it, so the two directions cannot drift apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    /// The name of the field in Rust
    pub name: &'static str,
    /// The key in the serialized JSON object
    pub wire: &'static str,
    /// The declared shape of the value
    pub kind: FieldKind,
    /// Whether the key must be present
    pub required: bool,
}

impl Field {
    /// A field that must be present in every payload
    pub const fn required(name: &'static str, wire: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            wire,
            kind,
            required: true,
        }
    }

    /// A field that may be omitted
    pub const fn optional(name: &'static str, wire: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            wire,
            kind,
            required: false,
        }
    }
}
