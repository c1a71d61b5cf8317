//! # The stream read models
//!
//! The records a connector builder test read returns. [`SliceRecord`] refers to
//! [`PageRecord`] and [`SliceDescriptor`], and is itself referenced by [`StreamRead`];
//! [`resolve`] binds these references before any record is constructed.
mod descriptor;
mod page;
mod slice;
mod stream_read;

pub use descriptor::SliceDescriptor;
pub use page::{HttpMethod, HttpRequest, HttpResponse, PageRecord};
pub use slice::SliceRecord;
pub use stream_read::{LogLevel, LogMessage, StreamRead};

use crate::schema::{self, SchemaBuilder, Schemas};

/// Declare every record of this module
pub fn builder() -> SchemaBuilder {
    SchemaBuilder::new()
        .declare::<StreamRead>()
        .declare::<LogMessage>()
        .declare::<SliceRecord>()
        .declare::<PageRecord>()
        .declare::<HttpRequest>()
        .declare::<HttpResponse>()
        .declare::<SliceDescriptor>()
}

/// Resolve the records of this module and install them for the whole process.
///
/// Must run before the first [`Record::construct`](crate::Record::construct). Later calls
/// return the already installed set.
pub fn resolve() -> &'static Schemas {
    schema::install_with(|| match builder().resolve() {
        Ok(schemas) => schemas,
        Err(err) => panic!("invalid record declarations: {}", err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resolve_all() {
        let schemas = resolve();
        assert_eq!(schemas.len(), 7);
        for name in &[
            StreamRead::NAME,
            LogMessage::NAME,
            SliceRecord::NAME,
            PageRecord::NAME,
            HttpRequest::NAME,
            HttpResponse::NAME,
            SliceDescriptor::NAME,
        ] {
            assert!(schemas.contains(name), "{} is not declared", name);
        }
        assert!(std::ptr::eq(schemas, resolve()));
    }

    #[test]
    fn test_missing_dependency() {
        let err = SchemaBuilder::new()
            .declare::<SliceRecord>()
            .declare::<SliceDescriptor>()
            .resolve()
            .unwrap_err();
        assert_eq!(
            err,
            crate::ResolveError::UnknownRecord {
                record: "SliceRecord",
                field: "pages",
                target: "PageRecord",
            }
        );
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(SliceRecord::wire_name("slice_descriptor"), Some("slice_descriptor"));
        assert_eq!(HttpRequest::wire_name("method"), Some("http_method"));
        assert_eq!(
            StreamRead::wire_name("limit_reached"),
            Some("test_read_limit_reached")
        );
        assert_eq!(SliceRecord::wire_name("sliceDescriptor"), None);
    }

    fn wire_keys<R: Record>(record: &R) -> Vec<String> {
        let mut keys = serde_json::to_value(record)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        keys.sort();
        keys
    }

    fn table_keys<R: Record>() -> Vec<String> {
        let mut keys = R::FIELDS
            .iter()
            .map(|field| field.wire.to_owned())
            .collect::<Vec<_>>();
        keys.sort();
        keys
    }

    #[test]
    fn test_alias_tables_match_serde() {
        let descriptor = SliceDescriptor::new(Some("2023-01-01".into()), Some("a".into()));
        let request = HttpRequest::new(
            "https://api.example.com/items".into(),
            HttpMethod::Get,
            Some(serde_json::Map::new()),
            Some(serde_json::Map::new()),
            Some(serde_json::Map::new()),
        );
        let response = HttpResponse::new(200, Some("{}".into()), Some(serde_json::Map::new()));
        let page = PageRecord::new(vec![], Some(request.clone()), Some(response.clone()));
        let slice = SliceRecord::new(
            vec![page.clone()],
            Some(descriptor.clone()),
            Some(serde_json::Map::new()),
        );
        let log = LogMessage::new("read".into(), LogLevel::Info);
        let read = StreamRead::new(
            vec![log.clone()],
            vec![slice.clone()],
            false,
            Some(serde_json::Map::new()),
        );

        assert_eq!(wire_keys(&descriptor), table_keys::<SliceDescriptor>());
        assert_eq!(wire_keys(&request), table_keys::<HttpRequest>());
        assert_eq!(wire_keys(&response), table_keys::<HttpResponse>());
        assert_eq!(wire_keys(&page), table_keys::<PageRecord>());
        assert_eq!(wire_keys(&slice), table_keys::<SliceRecord>());
        assert_eq!(wire_keys(&log), table_keys::<LogMessage>());
        assert_eq!(wire_keys(&read), table_keys::<StreamRead>());
    }

    #[test]
    fn test_enum_literals_match_serde() {
        for literal in HttpMethod::VARIANTS {
            let method: HttpMethod = serde_json::from_value(json!(literal)).unwrap();
            assert_eq!(serde_json::to_value(method).unwrap(), json!(literal));
        }
        for literal in LogLevel::VARIANTS {
            let level: LogLevel = serde_json::from_value(json!(literal)).unwrap();
            assert_eq!(serde_json::to_value(level).unwrap(), json!(literal));
        }
    }
}
