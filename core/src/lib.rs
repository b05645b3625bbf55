//! Synchronous client for the entities API of a natural-language
//! understanding service.
//!
//! # Overview
//! Translates typed method calls into authenticated HTTP requests against the
//! service's REST endpoint and translates responses back into typed values or
//! errors. Every operation is an independent one-shot round trip: no shared
//! state, no retries, no pooling.
//!
//! # Design
//! - `EntityClient` holds only configuration (base URL, bearer token,
//!   optional proxy URL) and may be shared freely across threads.
//! - Each operation is split into `build_*` (produces an [`HttpRequest`]) and
//!   `parse_*` (consumes an [`HttpResponse`]); the plain-named method wires
//!   both through the ureq-backed [`transport`]. Tests exercise build/parse
//!   without a socket.
//! - 200 is the only success status; any other status surfaces as
//!   [`ApiError::Service`] with the raw code and body.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::EntityClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreationResponse, Entity, EntityDescription, Entry, ResponseStatus};
