//! In-memory entities service used by the client's tests.
//!
//! Mirrors the real service's wire contract: camelCase field names,
//! id-or-name addressing on single-resource routes, 200 as the success
//! status for every operation (including create), and empty bodies on
//! mutations.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub value: String,
    pub synonyms: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub entries: Vec<Entry>,
    pub is_enum: bool,
    pub automated_expansion: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStatus {
    pub code: i64,
    pub error_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreationResponse {
    pub id: String,
    pub status: ResponseStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityDescription {
    pub id: String,
    pub name: String,
    pub count: i64,
    pub preview: String,
}

pub type Db = Arc<RwLock<HashMap<String, Entity>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/entities",
            get(list_entities).post(create_entity).put(update_entities),
        )
        .route(
            "/entities/{key}",
            get(get_entity).put(update_entity).delete(delete_entity),
        )
        .route(
            "/entities/{key}/entries",
            axum::routing::post(add_entries)
                .put(update_entries)
                .delete(delete_entries),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Resolve id-or-name addressing: exact id wins, then the first entity with
/// a matching name.
fn resolve_id(db: &HashMap<String, Entity>, key: &str) -> Option<String> {
    if db.contains_key(key) {
        return Some(key.to_string());
    }
    db.values().find(|e| e.name == key).map(|e| e.id.clone())
}

fn describe(entity: &Entity) -> EntityDescription {
    EntityDescription {
        id: entity.id.clone(),
        name: entity.name.clone(),
        count: entity.entries.len() as i64,
        preview: entity
            .entries
            .first()
            .map(|e| e.value.clone())
            .unwrap_or_default(),
    }
}

async fn list_entities(State(db): State<Db>) -> Json<Vec<EntityDescription>> {
    let entities = db.read().await;
    let mut descriptions: Vec<EntityDescription> = entities.values().map(describe).collect();
    descriptions.sort_by(|a, b| a.name.cmp(&b.name));
    Json(descriptions)
}

async fn create_entity(
    State(db): State<Db>,
    Json(mut input): Json<Entity>,
) -> (StatusCode, Json<CreationResponse>) {
    input.id = Uuid::new_v4().to_string();
    let id = input.id.clone();
    db.write().await.insert(id.clone(), input);
    (
        StatusCode::OK,
        Json(CreationResponse {
            id,
            status: ResponseStatus {
                code: 200,
                error_type: "success".to_string(),
            },
        }),
    )
}

async fn get_entity(
    State(db): State<Db>,
    Path(key): Path<String>,
) -> Result<Json<Entity>, StatusCode> {
    let entities = db.read().await;
    let id = resolve_id(&entities, &key).ok_or(StatusCode::NOT_FOUND)?;
    entities.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

// All-or-nothing: every target must resolve before anything is applied.
async fn update_entities(
    State(db): State<Db>,
    Json(input): Json<Vec<Entity>>,
) -> Result<StatusCode, StatusCode> {
    let mut entities = db.write().await;
    let mut targets = Vec::with_capacity(input.len());
    for submitted in &input {
        let key = if submitted.id.is_empty() {
            &submitted.name
        } else {
            &submitted.id
        };
        targets.push(resolve_id(&entities, key).ok_or(StatusCode::NOT_FOUND)?);
    }
    for (id, submitted) in targets.into_iter().zip(input) {
        let stored = entities.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
        stored.name = submitted.name;
        stored.entries = submitted.entries;
        stored.is_enum = submitted.is_enum;
        stored.automated_expansion = submitted.automated_expansion;
    }
    Ok(StatusCode::OK)
}

async fn update_entity(
    State(db): State<Db>,
    Path(key): Path<String>,
    Json(input): Json<Entity>,
) -> Result<StatusCode, StatusCode> {
    let mut entities = db.write().await;
    let id = resolve_id(&entities, &key).ok_or(StatusCode::NOT_FOUND)?;
    let stored = entities.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    stored.name = input.name;
    stored.entries = input.entries;
    stored.is_enum = input.is_enum;
    stored.automated_expansion = input.automated_expansion;
    Ok(StatusCode::OK)
}

async fn delete_entity(
    State(db): State<Db>,
    Path(key): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut entities = db.write().await;
    let id = resolve_id(&entities, &key).ok_or(StatusCode::NOT_FOUND)?;
    entities.remove(&id).map(|_| StatusCode::OK).ok_or(StatusCode::NOT_FOUND)
}

async fn add_entries(
    State(db): State<Db>,
    Path(key): Path<String>,
    Json(input): Json<Vec<Entry>>,
) -> Result<StatusCode, StatusCode> {
    let mut entities = db.write().await;
    let id = resolve_id(&entities, &key).ok_or(StatusCode::NOT_FOUND)?;
    let stored = entities.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    stored.entries.extend(input);
    Ok(StatusCode::OK)
}

// Replaces entries matched by canonical value; unmatched ones are appended.
async fn update_entries(
    State(db): State<Db>,
    Path(key): Path<String>,
    Json(input): Json<Vec<Entry>>,
) -> Result<StatusCode, StatusCode> {
    let mut entities = db.write().await;
    let id = resolve_id(&entities, &key).ok_or(StatusCode::NOT_FOUND)?;
    let stored = entities.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    for entry in input {
        match stored.entries.iter_mut().find(|e| e.value == entry.value) {
            Some(existing) => *existing = entry,
            None => stored.entries.push(entry),
        }
    }
    Ok(StatusCode::OK)
}

async fn delete_entries(
    State(db): State<Db>,
    Path(key): Path<String>,
    Json(values): Json<Vec<String>>,
) -> Result<StatusCode, StatusCode> {
    let mut entities = db.write().await;
    let id = resolve_id(&entities, &key).ok_or(StatusCode::NOT_FOUND)?;
    let stored = entities.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    stored.entries.retain(|e| !values.contains(&e.value));
    Ok(StatusCode::OK)
}
