use super::{AbsentFields, EncodeOptions, Field, FieldKind, Record};
use crate::de;
use crate::error::{FieldPath, SchemaValidationError, ValidationReason};
use derivative::Derivative;
use displaydoc::Display;
use log::{debug, trace};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors at `resolve`
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ResolveError {
    /// Record `{0}` is declared more than once
    DuplicateRecord(&'static str),
    /// Field `{record}.{field}` refers to undeclared record `{target}`
    UnknownRecord {
        /// The record holding the reference
        record: &'static str,
        /// The field holding the reference
        field: &'static str,
        /// The name that could not be found
        target: &'static str,
    },
}

/// The first phase of building a schema set: records are declared by name and may refer to
/// each other in any order, including cyclically.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    declared: Vec<(&'static str, &'static [Field])>,
}

impl SchemaBuilder {
    /// An empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the record type `R`
    pub fn declare<R: Record>(self) -> Self {
        self.declare_fields(R::NAME, R::FIELDS)
    }

    /// Declare a record shape by name and alias table
    pub fn declare_fields(mut self, name: &'static str, fields: &'static [Field]) -> Self {
        self.declared.push((name, fields));
        self
    }

    /// The second phase: check that every reference points to a declared record and
    /// replace names with indices.
    pub fn resolve(self) -> Result<Schemas, ResolveError> {
        let mut index = HashMap::with_capacity(self.declared.len());
        for (i, &(name, _)) in self.declared.iter().enumerate() {
            if index.insert(name, i).is_some() {
                return Err(ResolveError::DuplicateRecord(name));
            }
        }

        let mut records = Vec::with_capacity(self.declared.len());
        for &(name, fields) in &self.declared {
            let fields = fields
                .iter()
                .map(|field| {
                    let kind = Kind::resolve(field.kind, &index).map_err(|target| {
                        ResolveError::UnknownRecord {
                            record: name,
                            field: field.name,
                            target,
                        }
                    })?;
                    Ok(ResolvedField { field, kind })
                })
                .collect::<Result<Vec<_>, ResolveError>>()?;
            records.push(ResolvedRecord { name, fields });
        }

        debug!("resolved {} record schemas", records.len());
        Ok(Schemas { records, index })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    String,
    Integer,
    Boolean,
    Object,
    Any,
    OneOf(&'static [&'static str]),
    Array(Box<Kind>),
    Record(usize),
}

impl Kind {
    fn resolve(
        kind: FieldKind,
        index: &HashMap<&'static str, usize>,
    ) -> Result<Self, &'static str> {
        Ok(match kind {
            FieldKind::String => Self::String,
            FieldKind::Integer => Self::Integer,
            FieldKind::Boolean => Self::Boolean,
            FieldKind::Object => Self::Object,
            FieldKind::Any => Self::Any,
            FieldKind::OneOf(allowed) => Self::OneOf(allowed),
            FieldKind::Array(inner) => Self::Array(Box::new(Self::resolve(*inner, index)?)),
            FieldKind::Record(name) => Self::Record(*index.get(name).ok_or(name)?),
        })
    }
}

#[derive(Debug)]
struct ResolvedField {
    field: &'static Field,
    kind: Kind,
}

#[derive(Debug)]
struct ResolvedRecord {
    name: &'static str,
    fields: Vec<ResolvedField>,
}

/// A resolved set of record schemas
///
/// Every cross-reference between records has been checked and bound, so records from this
/// set can be constructed and encoded.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Schemas {
    records: Vec<ResolvedRecord>,
    #[derivative(Debug = "ignore")]
    index: HashMap<&'static str, usize>,
}

impl Schemas {
    /// Whether a record with that name is part of this set
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The number of records in this set
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this set is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The names of all records, in declaration order
    pub fn record_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.records.iter().map(|record| record.name)
    }

    /// Check `payload` against the record `name` and return every failure, missing required
    /// fields of an object first, then mismatched values.
    ///
    /// # Panics
    ///
    /// If `name` is not part of this set.
    pub fn validate(&self, name: &str, payload: &Value) -> Vec<SchemaValidationError> {
        let mut errors = Vec::new();
        self.walk_record(self.lookup(name), payload, &FieldPath::root(), &mut errors);
        errors
    }

    /// Validate `payload` and decode it into `T`, failing on the first error
    pub fn construct<T: Record>(&self, payload: &Value) -> Result<T, SchemaValidationError> {
        let result = match self.validate(T::NAME, payload).into_iter().next() {
            Some(err) => Err(err),
            None => de::decode(payload),
        };
        if let Err(err) = &result {
            trace!("rejected {} payload: {}", T::NAME, err);
        }
        result
    }

    /// Encode `record` through its alias table
    ///
    /// # Panics
    ///
    /// If `T` is not part of this set or its serde impl does not produce a JSON object.
    pub fn encode<T: Record>(&self, record: &T, options: &EncodeOptions) -> Map<String, Value> {
        let idx = self.lookup(T::NAME);
        match serde_json::to_value(record) {
            Ok(Value::Object(map)) => self.encode_record(idx, map, options),
            Ok(other) => panic!("record `{}` serialized to {}", T::NAME, json_type(&other)),
            Err(err) => panic!("record `{}` failed to serialize: {}", T::NAME, err),
        }
    }

    fn lookup(&self, name: &str) -> usize {
        match self.index.get(name) {
            Some(idx) => *idx,
            None => panic!("record `{}` is not part of this schema set", name),
        }
    }

    fn encode_record(
        &self,
        idx: usize,
        mut map: Map<String, Value>,
        options: &EncodeOptions,
    ) -> Map<String, Value> {
        let mut out = Map::new();
        for ResolvedField { field, kind } in &self.records[idx].fields {
            match map.remove(field.wire) {
                Some(Value::Null) | None if !field.required => {
                    if options.absent == AbsentFields::Null {
                        out.insert(field.wire.to_owned(), Value::Null);
                    }
                }
                Some(value) => {
                    out.insert(field.wire.to_owned(), self.encode_value(kind, value, options));
                }
                None => {}
            }
        }
        debug_assert!(
            map.is_empty(),
            "record `{}` serialized keys missing from its alias table: {:?}",
            self.records[idx].name,
            map.keys().collect::<Vec<_>>()
        );
        out
    }

    fn encode_value(&self, kind: &Kind, value: Value, options: &EncodeOptions) -> Value {
        match (kind, value) {
            (Kind::Record(idx), Value::Object(map)) => {
                Value::Object(self.encode_record(*idx, map, options))
            }
            (Kind::Array(inner), Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.encode_value(inner, item, options))
                    .collect(),
            ),
            (_, value) => value,
        }
    }

    fn walk_record(
        &self,
        idx: usize,
        value: &Value,
        path: &FieldPath,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let record = &self.records[idx];
        let map = match value {
            Value::Object(map) => map,
            other => {
                errors.push(invalid_type(path, "object".to_owned(), other));
                return;
            }
        };

        for ResolvedField { field, .. } in &record.fields {
            if field.required && !map.contains_key(field.wire) {
                errors.push(SchemaValidationError::missing(path.key(field.wire)));
            }
        }

        for ResolvedField { field, kind } in &record.fields {
            match map.get(field.wire) {
                Some(Value::Null) if !field.required => {}
                Some(value) => self.walk_kind(kind, value, &path.key(field.wire), errors),
                None => {}
            }
        }
    }

    fn walk_kind(
        &self,
        kind: &Kind,
        value: &Value,
        path: &FieldPath,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let matches = match (kind, value) {
            (Kind::Any, _) => true,
            (Kind::String, Value::String(_)) => true,
            (Kind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Kind::Boolean, Value::Bool(_)) => true,
            (Kind::Object, Value::Object(_)) => true,
            (Kind::OneOf(allowed), Value::String(s)) => {
                if !allowed.iter().any(|a| *a == s.as_str()) {
                    errors.push(SchemaValidationError::new(
                        path.clone(),
                        ValidationReason::NotAllowed {
                            value: s.clone(),
                            allowed: *allowed,
                        },
                    ));
                }
                true
            }
            (Kind::Array(inner), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    self.walk_kind(inner, item, &path.index(i), errors);
                }
                true
            }
            (Kind::Record(idx), Value::Object(_)) => {
                self.walk_record(*idx, value, path, errors);
                true
            }
            _ => false,
        };
        if !matches {
            errors.push(invalid_type(path, self.describe(kind), value));
        }
    }

    fn describe(&self, kind: &Kind) -> String {
        match kind {
            Kind::String => "string".to_owned(),
            Kind::Integer => "integer".to_owned(),
            Kind::Boolean => "boolean".to_owned(),
            Kind::Object => "object".to_owned(),
            Kind::Any => "any value".to_owned(),
            Kind::OneOf(allowed) => format!("one of {:?}", allowed),
            Kind::Array(inner) => format!("array of {}", self.describe(inner)),
            Kind::Record(idx) => format!("{} object", self.records[*idx].name),
        }
    }
}

fn invalid_type(path: &FieldPath, expected: String, found: &Value) -> SchemaValidationError {
    SchemaValidationError::new(
        path.clone(),
        ValidationReason::InvalidType {
            expected,
            found: json_type(found),
        },
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

static INSTALLED: OnceLock<Schemas> = OnceLock::new();

/// Install the process-wide schema set, building it with `init` on the first call only.
pub fn install_with<F>(init: F) -> &'static Schemas
where
    F: FnOnce() -> Schemas,
{
    INSTALLED.get_or_init(init)
}

/// The process-wide schema set
///
/// # Panics
///
/// If no schema set has been installed yet. Records must not be constructed before their
/// references are resolved.
pub fn installed() -> &'static Schemas {
    match INSTALLED.get() {
        Some(schemas) => schemas,
        None => panic!(
            "record schemas are not resolved; call `model::resolve()` before constructing records"
        ),
    }
}
