use crate::schema::{Field, FieldKind, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single page of a slice: the records extracted from one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct PageRecord {
    #[serde(rename = "records")]
    records: Vec<Map<String, Value>>,
    #[serde(rename = "request", default, skip_serializing_if = "Option::is_none")]
    request: Option<HttpRequest>,
    #[serde(rename = "response", default, skip_serializing_if = "Option::is_none")]
    response: Option<HttpResponse>,
}

impl PageRecord {
    /// The records on this page
    pub fn records(&self) -> &[Map<String, Value>] {
        &self.records
    }

    /// The request that produced this page
    pub fn request(&self) -> Option<&HttpRequest> {
        self.request.as_ref()
    }

    /// The response this page was read from
    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }
}

impl Record for PageRecord {
    const NAME: &'static str = "PageRecord";
    const FIELDS: &'static [Field] = &[
        Field::required("records", "records", FieldKind::Array(&FieldKind::Object)),
        Field::optional("request", "request", FieldKind::Record(HttpRequest::NAME)),
        Field::optional("response", "response", FieldKind::Record(HttpResponse::NAME)),
    ];
}

/// HTTP verbs a connector may issue
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl HttpMethod {
    /// The literals accepted on the wire
    pub const VARIANTS: &'static [&'static str] = &["GET", "POST"];
}

/// An outgoing request as recorded during a test read
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct HttpRequest {
    #[serde(rename = "url")]
    url: String,
    #[serde(rename = "http_method")]
    method: HttpMethod,
    #[serde(rename = "parameters", default, skip_serializing_if = "Option::is_none")]
    parameters: Option<Map<String, Value>>,
    #[serde(rename = "headers", default, skip_serializing_if = "Option::is_none")]
    headers: Option<Map<String, Value>>,
    #[serde(rename = "body", default, skip_serializing_if = "Option::is_none")]
    body: Option<Map<String, Value>>,
}

impl HttpRequest {
    /// The requested URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP verb
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Query parameters
    pub fn parameters(&self) -> Option<&Map<String, Value>> {
        self.parameters.as_ref()
    }

    /// Request headers
    pub fn headers(&self) -> Option<&Map<String, Value>> {
        self.headers.as_ref()
    }

    /// Request body
    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }
}

impl Record for HttpRequest {
    const NAME: &'static str = "HttpRequest";
    const FIELDS: &'static [Field] = &[
        Field::required("url", "url", FieldKind::String),
        Field::required("method", "http_method", FieldKind::OneOf(HttpMethod::VARIANTS)),
        Field::optional("parameters", "parameters", FieldKind::Object),
        Field::optional("headers", "headers", FieldKind::Object),
        Field::optional("body", "body", FieldKind::Object),
    ];
}

/// A response as recorded during a test read
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, new)]
pub struct HttpResponse {
    #[serde(rename = "status")]
    status: u16,
    #[serde(rename = "body", default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(rename = "headers", default, skip_serializing_if = "Option::is_none")]
    headers: Option<Map<String, Value>>,
}

impl HttpResponse {
    /// The HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw body text
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Response headers
    pub fn headers(&self) -> Option<&Map<String, Value>> {
        self.headers.as_ref()
    }

    /// The body parsed as JSON, or as a JSON string when it is not valid JSON
    pub fn parsed_body(&self) -> Option<Value> {
        self.body.as_deref().map(|body| {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
        })
    }
}

impl Record for HttpResponse {
    const NAME: &'static str = "HttpResponse";
    const FIELDS: &'static [Field] = &[
        Field::required("status", "status", FieldKind::Integer),
        Field::optional("body", "body", FieldKind::String),
        Field::optional("headers", "headers", FieldKind::Object),
    ];
}
