//! HTTP request and response values as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and parses `HttpResponse` values;
//! only [`crate::transport`] touches the network. Keeping the request and
//! response as inert data makes every operation testable without a socket
//! and keeps the execution layer swappable.
//!
//! Headers are an ordered `Vec` of pairs rather than a map: the contract
//! never sends duplicate header names and tests want deterministic order.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `EntityClient::build_*` methods. `path` is the full URL, already
/// joined with the configured base. `body` holds serialized JSON when the
/// operation sends one.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by [`crate::transport::execute`] (or constructed directly in
/// tests), then handed to `EntityClient::parse_*` methods.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
