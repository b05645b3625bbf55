//! Stateless request builder, response parser, and executing surface for the
//! entities API.
//!
//! # Design
//! `EntityClient` holds only configuration (`base_url`, bearer `token`,
//! optional `proxy_url`) and carries no mutable state between calls, so a
//! single client may be shared across threads. Each remote operation is split
//! into a `build_*` method that produces an [`HttpRequest`] and a `parse_*`
//! method that consumes an [`HttpResponse`]; the plain-named method
//! (`list_entities`, `get_entity`, ...) composes build → execute → parse
//! through [`crate::transport`]. Tests exercise build/parse directly without
//! a socket.
//!
//! Status handling is uniform: 200 is the only success code, every other
//! status becomes [`ApiError::Service`] with no per-status branching. The
//! entries-mutation endpoints additionally log the response body on failure,
//! since the service reports per-entry validation problems there.

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport;
use crate::types::{CreationResponse, Entity, EntityDescription, Entry};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Synchronous client for the entities API.
///
/// Every operation is a stateless one-shot round trip: no retries, no
/// connection reuse, no caching. Callers needing deadlines impose them
/// externally.
#[derive(Debug, Clone)]
pub struct EntityClient {
    base_url: String,
    token: String,
    proxy_url: Option<String>,
}

impl EntityClient {
    /// Create a client for the service at `base_url`, authenticating every
    /// request with the given bearer token.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            proxy_url: None,
        }
    }

    /// Route all outbound requests through the given proxy.
    ///
    /// An unparseable proxy URL does not fail the call; the transport falls
    /// back to a direct connection and logs a warning.
    pub fn with_proxy_url(mut self, proxy_url: &str) -> Self {
        self.proxy_url = Some(proxy_url.to_string());
        self
    }

    fn auth_header(&self) -> (String, String) {
        (
            "authorization".to_string(),
            format!("Bearer {}", self.token),
        )
    }

    fn json_headers(&self) -> Vec<(String, String)> {
        vec![
            ("content-type".to_string(), JSON_CONTENT_TYPE.to_string()),
            self.auth_header(),
        ]
    }

    // -----------------------------------------------------------------------
    // List entities
    // -----------------------------------------------------------------------

    pub fn build_list_entities(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: build_url(&self.base_url, "entities", &[]),
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    pub fn parse_list_entities(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<EntityDescription>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET the collection of entity summaries.
    pub fn list_entities(&self) -> Result<Vec<EntityDescription>, ApiError> {
        let request = self.build_list_entities();
        self.parse_list_entities(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Get entity
    // -----------------------------------------------------------------------

    pub fn build_get_entity(&self, id_or_name: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: build_url(&self.base_url, &format!("entities/{id_or_name}"), &[]),
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    pub fn parse_get_entity(&self, response: HttpResponse) -> Result<Entity, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET a single entity by id or name.
    pub fn get_entity(&self, id_or_name: &str) -> Result<Entity, ApiError> {
        let request = self.build_get_entity(id_or_name);
        self.parse_get_entity(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Create entity
    // -----------------------------------------------------------------------

    pub fn build_create_entity(&self, entity: &Entity) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(entity).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: build_url(&self.base_url, "entities", &[]),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_create_entity(
        &self,
        response: HttpResponse,
    ) -> Result<CreationResponse, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST a new entity. The service assigns the id and reports it in the
    /// creation response.
    pub fn create_entity(&self, entity: &Entity) -> Result<CreationResponse, ApiError> {
        let request = self.build_create_entity(entity)?;
        self.parse_create_entity(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Add entries
    // -----------------------------------------------------------------------

    pub fn build_add_entries(
        &self,
        id_or_name: &str,
        entries: &[Entry],
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(entries).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: build_url(&self.base_url, &format!("entities/{id_or_name}/entries"), &[]),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_add_entries(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.status != 200 {
            warn!(status = response.status, body = %response.body, "add entries rejected");
        }
        check_status(&response)
    }

    /// POST entries to an existing entity. An empty slice still sends `[]`.
    pub fn add_entries(&self, id_or_name: &str, entries: &[Entry]) -> Result<(), ApiError> {
        let request = self.build_add_entries(id_or_name, entries)?;
        self.parse_add_entries(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Update entities (bulk)
    // -----------------------------------------------------------------------

    pub fn build_update_entities(&self, entities: &[Entity]) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(entities).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: build_url(&self.base_url, "entities", &[]),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_update_entities(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// PUT a batch of entities to the collection endpoint.
    pub fn update_entities(&self, entities: &[Entity]) -> Result<(), ApiError> {
        let request = self.build_update_entities(entities)?;
        self.parse_update_entities(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Update entity
    // -----------------------------------------------------------------------

    pub fn build_update_entity(
        &self,
        id_or_name: &str,
        entity: &Entity,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(entity).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: build_url(&self.base_url, &format!("entities/{id_or_name}"), &[]),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_update_entity(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// PUT a replacement definition for one entity.
    pub fn update_entity(&self, id_or_name: &str, entity: &Entity) -> Result<(), ApiError> {
        let request = self.build_update_entity(id_or_name, entity)?;
        self.parse_update_entity(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Update entries
    // -----------------------------------------------------------------------

    pub fn build_update_entries(
        &self,
        id_or_name: &str,
        entries: &[Entry],
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(entries).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: build_url(&self.base_url, &format!("entities/{id_or_name}/entries"), &[]),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_update_entries(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.status != 200 {
            warn!(status = response.status, body = %response.body, "update entries rejected");
        }
        check_status(&response)
    }

    /// PUT replacement entries for an existing entity.
    pub fn update_entries(&self, id_or_name: &str, entries: &[Entry]) -> Result<(), ApiError> {
        let request = self.build_update_entries(id_or_name, entries)?;
        self.parse_update_entries(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Delete entity
    // -----------------------------------------------------------------------

    pub fn build_delete_entity(&self, id_or_name: &str) -> HttpRequest {
        // The service expects the JSON content type even on this body-less
        // call.
        HttpRequest {
            method: HttpMethod::Delete,
            path: build_url(&self.base_url, &format!("entities/{id_or_name}"), &[]),
            headers: self.json_headers(),
            body: None,
        }
    }

    pub fn parse_delete_entity(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// DELETE one entity by id or name.
    pub fn delete_entity(&self, id_or_name: &str) -> Result<(), ApiError> {
        let request = self.build_delete_entity(id_or_name);
        self.parse_delete_entity(transport::execute(&request, self.proxy_url.as_deref())?)
    }

    // -----------------------------------------------------------------------
    // Delete entries
    // -----------------------------------------------------------------------

    pub fn build_delete_entries(
        &self,
        id_or_name: &str,
        values: &[String],
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(values).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: build_url(&self.base_url, &format!("entities/{id_or_name}/entries"), &[]),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_delete_entries(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// DELETE entries by canonical value. The values travel as a JSON array
    /// in the request body.
    pub fn delete_entries(&self, id_or_name: &str, values: &[String]) -> Result<(), ApiError> {
        let request = self.build_delete_entries(id_or_name, values)?;
        self.parse_delete_entries(transport::execute(&request, self.proxy_url.as_deref())?)
    }
}

/// Join the base URL, a relative path, and optional query parameters.
///
/// Pure string composition. The operations in this contract use no query
/// parameters; a malformed base or path is a programming error, caught when
/// the transport parses the final URL.
fn build_url(base: &str, path: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{base}/{path}");
    if !params.is_empty() {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}

/// 200 is the only success status; anything else is a service error carrying
/// the raw status and body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::Service {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EntityClient {
        EntityClient::new("http://localhost:3000", "test-token")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn status(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_entities_produces_correct_request() {
        let req = client().build_list_entities();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/entities");
        assert_eq!(req.header("authorization"), Some("Bearer test-token"));
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_entity_addresses_by_id_or_name() {
        let req = client().build_get_entity("colors");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/entities/colors");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_entity_produces_correct_request() {
        let entity = Entity {
            name: "colors".to_string(),
            entries: vec![Entry {
                value: "red".to_string(),
                synonyms: vec!["crimson".to_string()],
            }],
            is_enum: true,
            ..Entity::default()
        };
        let req = client().build_create_entity(&entity).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/entities");
        assert_eq!(
            req.header("content-type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(req.header("authorization"), Some("Bearer test-token"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "colors");
        assert_eq!(body["isEnum"], true);
        assert_eq!(body["entries"][0]["synonyms"][0], "crimson");
    }

    #[test]
    fn build_add_entries_with_empty_list_sends_empty_array() {
        let req = client().build_add_entries("42", &[]).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/entities/42/entries");
        assert_eq!(req.body.as_deref(), Some("[]"));
    }

    #[test]
    fn build_update_entities_targets_collection_endpoint() {
        let req = client().build_update_entities(&[]).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/entities");
        assert_eq!(req.body.as_deref(), Some("[]"));
    }

    #[test]
    fn build_delete_entity_keeps_json_content_type() {
        let req = client().build_delete_entity("42");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/entities/42");
        assert_eq!(
            req.header("content-type"),
            Some("application/json; charset=utf-8")
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_entries_sends_values_as_json_array() {
        let values = vec!["red".to_string(), "blue".to_string()];
        let req = client().build_delete_entries("42", &values).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/entities/42/entries");
        assert_eq!(req.body.as_deref(), Some(r#"["red","blue"]"#));
    }

    #[test]
    fn parse_get_entity_decodes_full_record() {
        let body = r#"{"id":"42","name":"colors","entries":[{"value":"red","synonyms":["crimson"]}],"isEnum":true,"automatedExpansion":false}"#;
        let entity = client().parse_get_entity(ok(body)).unwrap();
        assert_eq!(entity.id, "42");
        assert_eq!(entity.name, "colors");
        assert_eq!(entity.entries.len(), 1);
        assert_eq!(entity.entries[0].value, "red");
        assert_eq!(entity.entries[0].synonyms, vec!["crimson".to_string()]);
        assert!(entity.is_enum);
        assert!(!entity.automated_expansion);
    }

    #[test]
    fn parse_list_entities_success() {
        let body = r#"[{"id":"42","name":"colors","count":1,"preview":"red"}]"#;
        let list = client().parse_list_entities(ok(body)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "colors");
        assert_eq!(list[0].count, 1);
    }

    #[test]
    fn parse_list_entities_bad_json_is_decode_error() {
        let err = client().parse_list_entities(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_create_entity_success() {
        let body = r#"{"id":"abc","status":{"code":200,"errorType":"success"}}"#;
        let cr = client().parse_create_entity(ok(body)).unwrap();
        assert_eq!(cr.id, "abc");
    }

    #[test]
    fn every_non_200_status_is_a_service_error() {
        for code in [201u16, 204, 301, 400, 401, 404, 500] {
            let err = client().parse_get_entity(status(code, "")).unwrap_err();
            match err {
                ApiError::Service { status, .. } => assert_eq!(status, code),
                other => panic!("expected Service error for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_add_entries_failure_carries_body() {
        let err = client()
            .parse_add_entries(status(400, r#"{"error":"bad entry"}"#))
            .unwrap_err();
        match err {
            ApiError::Service { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad entry"));
            }
            other => panic!("expected Service error, got {other:?}"),
        }
    }

    #[test]
    fn parse_delete_entries_handles_500_with_empty_body() {
        let err = client().parse_delete_entries(status(500, "")).unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn parse_update_entries_success_on_empty_body() {
        assert!(client().parse_update_entries(ok("")).is_ok());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = EntityClient::new("http://localhost:3000/", "test-token");
        let req = client.build_list_entities();
        assert_eq!(req.path, "http://localhost:3000/entities");
    }

    #[test]
    fn build_url_appends_query_parameters() {
        let url = build_url("http://localhost:3000", "entities", &[("v", "20150910")]);
        assert_eq!(url, "http://localhost:3000/entities?v=20150910");
    }
}
