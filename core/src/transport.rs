//! ureq-backed executor for [`HttpRequest`] values.
//!
//! # Design
//! Each call builds a fresh `ureq::Agent`, so calls stay fully independent
//! and a proxy configured on one client never leaks into another. The agent
//! is configured with `http_status_as_error(false)` so 4xx/5xx responses come
//! back as data and status interpretation stays in the client layer.
//!
//! When a proxy URL is configured but does not parse, the call degrades to a
//! direct connection instead of failing; a warning records the dropped proxy.

use tracing::warn;
use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Execute one request, optionally through a proxy, and return the raw
/// response. Never retries.
pub fn execute(request: &HttpRequest, proxy_url: Option<&str>) -> Result<HttpResponse, ApiError> {
    let uri = request
        .path
        .parse::<ureq::http::Uri>()
        .map_err(|e| ApiError::Build(e.to_string()))?;
    // A relative or scheme-less path parses as a valid Uri; require a full
    // URL so misconfiguration surfaces as Build, not Transport.
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(ApiError::Build(format!(
            "not an absolute URL: {}",
            request.path
        )));
    }

    let agent = build_agent(proxy_url);

    let result = match (&request.method, request.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(&request.path), &request.headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&request.path), &request.headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => {
            with_headers(agent.post(&request.path), &request.headers).send_empty()
        }
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(&request.path), &request.headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => {
            with_headers(agent.put(&request.path), &request.headers).send_empty()
        }
        (HttpMethod::Delete, Some(body)) => {
            with_headers(agent.delete(&request.path), &request.headers)
                .force_send_body()
                .send(body.as_bytes())
        }
        (HttpMethod::Delete, None) => {
            with_headers(agent.delete(&request.path), &request.headers).call()
        }
    };

    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    // The body may be empty or unreadable on error statuses; never fail the
    // call over it.
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn build_agent(proxy_url: Option<&str>) -> Agent {
    let mut config = Agent::config_builder().http_status_as_error(false);
    if let Some(proxy) = resolve_proxy(proxy_url) {
        config = config.proxy(Some(proxy));
    }
    config.build().new_agent()
}

/// Parse the configured proxy URL, degrading to a direct connection (`None`)
/// when it is absent or unparseable.
pub(crate) fn resolve_proxy(proxy_url: Option<&str>) -> Option<ureq::Proxy> {
    let raw = proxy_url?;
    match ureq::Proxy::new(raw) {
        Ok(proxy) => Some(proxy),
        Err(err) => {
            warn!(proxy = raw, error = %err, "ignoring unparseable proxy URL, connecting directly");
            None
        }
    }
}

fn with_headers<Any>(
    mut builder: ureq::RequestBuilder<Any>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<Any> {
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}
