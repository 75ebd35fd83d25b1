//! In-memory stand-in for the MitSMK API.

use super::constants::*;
use super::fixtures::{fresh_token, naive_now, smk_artworks, Claims};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

type Failure = (StatusCode, Json<Value>);
type Reply = Result<Json<Value>, Failure>;

fn fail(status: StatusCode, detail: &str) -> Failure {
    (status, Json(json!({ "detail": detail })))
}

struct StoredUser {
    id: Uuid,
    username: String,
    email: String,
    password: String,
    created_at: String,
}

impl StoredUser {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
            "created_at": self.created_at,
        })
    }
}

struct StoredItem {
    id: Uuid,
    artwork: Value,
    note: Option<String>,
    added_at: String,
}

struct StoredCollection {
    id: Uuid,
    owner: Uuid,
    name: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
    items: Vec<StoredItem>,
}

impl StoredCollection {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    fn detail_json(&self) -> Value {
        let mut detail = self.to_json();
        detail["artworks"] = self.items.iter().map(item_json).collect();
        detail
    }
}

fn item_json(item: &StoredItem) -> Value {
    json!({
        "id": item.id,
        "artwork": item.artwork,
        "note": item.note,
        "added_at": item.added_at,
    })
}

struct SmkData {
    users: Vec<StoredUser>,
    artworks: Vec<Value>,
    collections: Vec<StoredCollection>,
}

impl SmkData {
    fn owned_mut(&mut self, owner: Uuid, id: Uuid) -> Result<&mut StoredCollection, Failure> {
        self.collections
            .iter_mut()
            .find(|c| c.id == id && c.owner == owner)
            .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Collection not found"))
    }
}

type Shared = Arc<Mutex<SmkData>>;

fn authenticate(data: &SmkData, headers: &HeaderMap) -> Result<Uuid, Failure> {
    let unauthorized = || fail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET),
        &Validation::default(),
    )
    .map_err(|_| unauthorized())?
    .claims;
    data.users
        .iter()
        .find(|u| u.username == claims.sub)
        .map(|u| u.id)
        .ok_or_else(unauthorized)
}

pub fn router() -> Router {
    let data = SmkData {
        users: vec![StoredUser {
            id: Uuid::new_v4(),
            username: TEST_USER.to_string(),
            email: TEST_EMAIL.to_string(),
            password: TEST_PASS.to_string(),
            created_at: naive_now(),
        }],
        artworks: smk_artworks(),
        collections: Vec::new(),
    };
    let state: Shared = Arc::new(Mutex::new(data));

    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/artworks/search", get(search_artworks))
        .route("/artworks/{object_number}", get(get_artwork))
        .route("/collections", get(list_collections).post(create_collection))
        .route(
            "/collections/{id}",
            get(get_collection)
                .put(update_collection)
                .delete(delete_collection),
        )
        .route("/collections/{id}/artworks", post(add_artwork))
        .route(
            "/collections/{id}/artworks/{artwork_id}",
            delete(remove_artwork),
        );

    Router::new().nest("/api", api).with_state(state)
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct RegisterBody {
    username: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn register(
    State(state): State<Shared>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut data = state.lock().unwrap();
    if data.users.iter().any(|u| u.username == body.username) {
        return Err(fail(StatusCode::BAD_REQUEST, "Username already registered"));
    }
    let user = StoredUser {
        id: Uuid::new_v4(),
        username: body.username,
        email: body.email,
        password: body.password,
        created_at: naive_now(),
    };
    let reply = user.to_json();
    data.users.push(user);
    Ok((StatusCode::CREATED, Json(reply)))
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Reply {
    let data = state.lock().unwrap();
    let user = data
        .users
        .iter()
        .find(|u| u.username == body.username && u.password == body.password)
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Incorrect username or password"))?;
    Ok(Json(json!({
        "access_token": fresh_token(&user.username),
        "token_type": "bearer",
        "user": user.to_json(),
    })))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let data = state.lock().unwrap();
    let user_id = authenticate(&data, &headers)?;
    let user = data
        .users
        .iter()
        .find(|u| u.id == user_id)
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))?;
    Ok(Json(user.to_json()))
}

// =============================================================================
// Artworks
// =============================================================================

#[derive(Deserialize)]
struct SearchParams {
    q: String,
    #[serde(default)]
    offset: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    20
}

fn matches(artwork: &Value, query: &str) -> bool {
    let query = query.to_lowercase();
    ["title", "artist_name", "object_number"].iter().any(|field| {
        artwork[*field]
            .as_str()
            .map(|v| v.to_lowercase().contains(&query))
            .unwrap_or(false)
    })
}

async fn search_artworks(
    State(state): State<Shared>,
    Query(params): Query<SearchParams>,
) -> Reply {
    let data = state.lock().unwrap();
    let hits: Vec<&Value> = data
        .artworks
        .iter()
        .filter(|a| matches(a, &params.q))
        .collect();
    let page: Vec<Value> = hits
        .iter()
        .skip(params.offset)
        .take(params.limit)
        .map(|a| (*a).clone())
        .collect();
    Ok(Json(json!({
        "artworks": page,
        "total": hits.len(),
        "offset": params.offset,
        "limit": params.limit,
    })))
}

async fn get_artwork(State(state): State<Shared>, Path(object_number): Path<String>) -> Reply {
    let data = state.lock().unwrap();
    data.artworks
        .iter()
        .find(|a| a["object_number"] == object_number.as_str())
        .cloned()
        .map(Json)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Artwork not found"))
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Deserialize)]
struct CollectionBody {
    name: String,
    description: Option<String>,
}

#[derive(Deserialize)]
struct AddArtworkBody {
    artwork_id: Uuid,
    note: Option<String>,
}

async fn list_collections(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let list: Vec<Value> = data
        .collections
        .iter()
        .filter(|c| c.owner == owner)
        .map(StoredCollection::to_json)
        .collect();
    Ok(Json(Value::Array(list)))
}

async fn create_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CollectionBody>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let now = naive_now();
    let collection = StoredCollection {
        id: Uuid::new_v4(),
        owner,
        name: body.name,
        description: body.description,
        created_at: now.clone(),
        updated_at: now,
        items: Vec::new(),
    };
    let reply = collection.to_json();
    data.collections.push(collection);
    Ok((StatusCode::CREATED, Json(reply)))
}

async fn get_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    Ok(Json(data.owned_mut(owner, id)?.detail_json()))
}

async fn update_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<CollectionBody>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let collection = data.owned_mut(owner, id)?;
    collection.name = body.name;
    collection.description = body.description;
    collection.updated_at = naive_now();
    Ok(Json(collection.to_json()))
}

async fn delete_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Failure> {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    data.owned_mut(owner, id)?;
    data.collections.retain(|c| c.id != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_artwork(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<AddArtworkBody>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let artwork_id = body.artwork_id.to_string();
    let artwork = data
        .artworks
        .iter()
        .find(|a| a["id"] == artwork_id.as_str())
        .cloned()
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Artwork not found"))?;
    let collection = data.owned_mut(owner, id)?;
    if collection
        .items
        .iter()
        .any(|i| i.artwork["id"] == artwork_id.as_str())
    {
        return Err(fail(StatusCode::BAD_REQUEST, "Artwork already in collection"));
    }
    let item = StoredItem {
        id: Uuid::new_v4(),
        artwork,
        note: body.note,
        added_at: naive_now(),
    };
    let reply = item_json(&item);
    collection.items.push(item);
    Ok((StatusCode::CREATED, Json(reply)))
}

async fn remove_artwork(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, artwork_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Failure> {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let collection = data.owned_mut(owner, id)?;
    let artwork_id = artwork_id.to_string();
    let before = collection.items.len();
    collection
        .items
        .retain(|i| i.artwork["id"] != artwork_id.as_str());
    if collection.items.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Artwork not in collection"));
    }
    Ok(StatusCode::NO_CONTENT)
}
