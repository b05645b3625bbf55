//! Error types for the entities API client.
//!
//! # Design
//! One terminal error per call, no retries and no recovery. The service's
//! contract treats 200 as the only success status, so every other status —
//! 404 included — lands in `Service` with the raw status code and body; the
//! client performs no status-specific branching. The remaining variants
//! separate failures by the phase they occur in: building the request,
//! moving bytes, or converting JSON.

use thiserror::Error;

/// Errors returned by `EntityClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be constructed (malformed URL).
    #[error("invalid request URL: {0}")]
    Build(String),

    /// The network round trip failed; the request may never have been sent.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON. Nothing was sent.
    #[error("could not encode request body: {0}")]
    Encode(String),

    /// The response body could not be deserialized into the expected type.
    #[error("could not decode response body: {0}")]
    Decode(String),

    /// The service answered with a non-200 status.
    #[error("service returned status {status}")]
    Service { status: u16, body: String },
}
