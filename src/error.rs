//! # Validation errors
use displaydoc::Display;
use std::fmt;
use thiserror::Error;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A key of a JSON object
    Key(String),
    /// An index into a JSON array
    Index(usize),
}

/// The location of a value inside a payload, e.g. `pages[2].records[0]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The empty path, pointing at the payload itself
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended with an object key
    pub fn key<K: Into<String>>(&self, key: K) -> Self {
        self.with(Segment::Key(key.into()))
    }

    /// This path extended with an array index
    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// The individual steps
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this path points at the payload itself
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl From<Vec<Segment>> for FieldPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Why a value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ValidationReason {
    /// required field is missing
    Missing,
    /// expected {expected}, found {found}
    InvalidType {
        /// The declared kind of the field
        expected: String,
        /// The JSON type that was present
        found: &'static str,
    },
    /// `{value}` is not one of {allowed:?}
    NotAllowed {
        /// The rejected literal
        value: String,
        /// The accepted literals
        allowed: &'static [&'static str],
    },
    /// {0}
    Decode(String),
}

/// Invalid field `{path}`: {reason}
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub struct SchemaValidationError {
    /// Where the offending value sits in the payload
    pub path: FieldPath,
    /// What is wrong with it
    pub reason: ValidationReason,
}

impl SchemaValidationError {
    /// Create an error for the value at `path`
    pub fn new(path: FieldPath, reason: ValidationReason) -> Self {
        Self { path, reason }
    }

    /// A required field was not present at `path`
    pub fn missing(path: FieldPath) -> Self {
        Self::new(path, ValidationReason::Missing)
    }
}
