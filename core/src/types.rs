//! Domain DTOs for the entities API.
//!
//! # Design
//! These types mirror the service's wire schema but are defined independently
//! from the mock-server crate; integration tests catch schema drift. Wire
//! names are camelCase where the service uses camelCase (`isEnum`,
//! `automatedExpansion`, `errorType`). Containers opt into `#[serde(default)]`
//! so fields the service omits deserialize to their zero value, and every
//! field is serialized on the way out — the service tolerates empty strings
//! but not missing keys.

use serde::{Deserialize, Serialize};

/// Summary record returned by the list operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntityDescription {
    pub id: String,
    pub name: String,
    pub count: i64,
    pub preview: String,
}

/// One enumerable value of an entity together with its synonyms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Entry {
    pub value: String,
    pub synonyms: Vec<String>,
}

/// A named collection of entries.
///
/// `is_enum` restricts matching to canonical values only; with
/// `automated_expansion` the service may recognize values beyond the listed
/// synonyms. When creating an entity the service assigns `id`, so callers
/// leave it empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub entries: Vec<Entry>,
    pub is_enum: bool,
    pub automated_expansion: bool,
}

/// Status envelope the service attaches to creation responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseStatus {
    pub code: i64,
    pub error_type: String,
}

/// Result of a create call. Opaque to the client beyond the assigned id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreationResponse {
    pub id: String,
    pub status: Option<ResponseStatus>,
}
