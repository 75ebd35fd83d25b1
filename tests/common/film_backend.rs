//! In-memory stand-in for the Filmkassen API.

use super::constants::*;
use super::fixtures::{film_directors, film_movies, fresh_token, movie_summary, naive_now, Claims};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Failure = (StatusCode, Json<Value>);
type Reply = Result<Json<Value>, Failure>;

fn fail(status: StatusCode, detail: &str) -> Failure {
    (status, Json(json!({ "detail": detail })))
}

struct StoredUser {
    id: i64,
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

struct StoredEntry {
    id: i64,
    movie_id: i64,
    note: Option<String>,
    added_at: String,
}

struct StoredCollection {
    id: i64,
    owner: String,
    name: String,
    description: Option<String>,
    created_at: String,
    updated_at: Option<String>,
    entries: Vec<StoredEntry>,
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
}

#[derive(Default)]
struct FilmData {
    users: Vec<StoredUser>,
    collections: Vec<StoredCollection>,
    next_id: i64,
}

impl FilmData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn movie(&self, movie_id: i64) -> Option<Value> {
        film_movies().into_iter().find(|m| m["id"] == movie_id)
    }

    fn entry_json(&self, entry: &StoredEntry) -> Value {
        let movie = self.movie(entry.movie_id).unwrap_or(Value::Null);
        json!({
            "id": entry.id,
            "movie": movie_summary(&movie),
            "note": entry.note,
            "added_at": entry.added_at,
        })
    }

    fn detail_json(&self, collection: &StoredCollection) -> Value {
        let mut detail = collection.to_json();
        detail["movies"] = collection
            .entries
            .iter()
            .map(|e| self.entry_json(e))
            .collect();
        detail
    }

    fn owned_mut(&mut self, owner: &str, id: i64) -> Result<&mut StoredCollection, Failure> {
        self.collections
            .iter_mut()
            .find(|c| c.id == id && c.owner == owner)
            .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Collection not found"))
    }
}

type Shared = Arc<Mutex<FilmData>>;

/// Username behind a valid bearer token, otherwise 401.
fn authenticate(data: &FilmData, headers: &HeaderMap) -> Result<String, Failure> {
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
    if data.users.iter().any(|u| u.username == claims.sub) {
        Ok(claims.sub)
    } else {
        Err(unauthorized())
    }
}

pub fn router() -> Router {
    let mut data = FilmData::default();
    let id = data.next_id();
    data.users.push(StoredUser {
        id,
        username: TEST_USER.to_string(),
        email: TEST_EMAIL.to_string(),
        password: TEST_PASS.to_string(),
        created_at: naive_now(),
    });
    let state: Shared = Arc::new(Mutex::new(data));

    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/movies/search", get(search_movies))
        .route("/movies/{id}", get(get_movie))
        .route("/directors/search", get(search_directors))
        .route("/directors/{id}/movies", get(director_movies))
        .route("/collections", get(list_collections).post(create_collection))
        .route(
            "/collections/{id}",
            get(get_collection)
                .put(update_collection)
                .delete(delete_collection),
        )
        .route("/collections/{id}/movies", post(add_movie))
        .route(
            "/collections/{id}/movies/{movie_id}",
            put(update_note).delete(remove_movie),
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

async fn register(State(state): State<Shared>, Json(body): Json<RegisterBody>) -> Reply {
    let mut data = state.lock().unwrap();
    if data.users.iter().any(|u| u.username == body.username) {
        return Err(fail(StatusCode::BAD_REQUEST, "Username already registered"));
    }
    let id = data.next_id();
    let user = StoredUser {
        id,
        username: body.username,
        email: body.email,
        password: body.password,
        created_at: naive_now(),
    };
    let reply = json!({
        "user": user.to_json(),
        "access_token": fresh_token(&user.username),
        "token_type": "bearer",
        "message": "User registered successfully",
    });
    data.users.push(user);
    Ok(Json(reply))
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Reply {
    let data = state.lock().unwrap();
    let user = data
        .users
        .iter()
        .find(|u| u.username == body.username && u.password == body.password)
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Incorrect username or password"))?;
    Ok(Json(json!({
        "user": user.to_json(),
        "access_token": fresh_token(&user.username),
        "token_type": "bearer",
    })))
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let data = state.lock().unwrap();
    authenticate(&data, &headers)?;
    Ok(Json(json!({ "message": "Successfully logged out" })))
}

// =============================================================================
// Movies and directors
// =============================================================================

fn contains_ci(haystack: &Value, needle: &str) -> bool {
    haystack
        .as_str()
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

async fn search_movies(Query(params): Query<HashMap<String, String>>) -> Reply {
    let title = params.get("title").cloned().unwrap_or_default();
    let director = params.get("director");
    let movies: Vec<Value> = film_movies()
        .iter()
        .filter(|m| contains_ci(&m["title"], &title))
        .filter(|m| director.map_or(true, |d| contains_ci(&m["director"], d)))
        .map(movie_summary)
        .collect();
    Ok(Json(json!({ "total": movies.len(), "movies": movies })))
}

async fn get_movie(Path(id): Path<i64>) -> Reply {
    film_movies()
        .into_iter()
        .find(|m| m["id"] == id)
        .map(Json)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Movie not found"))
}

async fn search_directors(Query(params): Query<HashMap<String, String>>) -> Reply {
    let name = params.get("name").cloned().unwrap_or_default();
    let directors: Vec<Value> = film_directors()
        .into_iter()
        .filter(|d| contains_ci(&d["name"], &name))
        .collect();
    Ok(Json(json!({ "total": directors.len(), "directors": directors })))
}

async fn director_movies(Path(id): Path<i64>) -> Reply {
    let director = film_directors()
        .into_iter()
        .find(|d| d["id"] == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Director not found"))?;
    let movies: Vec<Value> = film_movies()
        .iter()
        .filter(|m| m["director_id"] == id)
        .map(movie_summary)
        .collect();
    Ok(Json(json!({ "director": director, "movies": movies })))
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Deserialize)]
struct CollectionBody {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct AddMovieBody {
    movie_id: i64,
    note: Option<String>,
}

#[derive(Deserialize)]
struct NoteBody {
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
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let name = body
        .name
        .ok_or_else(|| fail(StatusCode::UNPROCESSABLE_ENTITY, "name is required"))?;
    let id = data.next_id();
    let collection = StoredCollection {
        id,
        owner,
        name,
        description: body.description,
        created_at: naive_now(),
        updated_at: None,
        entries: Vec::new(),
    };
    let reply = collection.to_json();
    data.collections.push(collection);
    Ok(Json(reply))
}

async fn get_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    data.owned_mut(&owner, id)?;
    let data = &*data;
    let collection = data
        .collections
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Collection not found"))?;
    Ok(Json(data.detail_json(collection)))
}

async fn update_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<CollectionBody>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let collection = data.owned_mut(&owner, id)?;
    if let Some(name) = body.name {
        collection.name = name;
    }
    if let Some(description) = body.description {
        collection.description = Some(description);
    }
    collection.updated_at = Some(naive_now());
    Ok(Json(collection.to_json()))
}

async fn delete_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    data.owned_mut(&owner, id)?;
    data.collections.retain(|c| c.id != id);
    Ok(Json(json!({ "message": "Collection deleted successfully" })))
}

async fn add_movie(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<AddMovieBody>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    if data.movie(body.movie_id).is_none() {
        return Err(fail(StatusCode::NOT_FOUND, "Movie not found"));
    }
    let entry_id = data.next_id();
    let collection = data.owned_mut(&owner, id)?;
    if collection.entries.iter().any(|e| e.movie_id == body.movie_id) {
        return Err(fail(StatusCode::BAD_REQUEST, "Movie already in collection"));
    }
    collection.entries.push(StoredEntry {
        id: entry_id,
        movie_id: body.movie_id,
        note: body.note,
        added_at: naive_now(),
    });
    let data = &*data;
    let entry = data
        .collections
        .iter()
        .find(|c| c.id == id)
        .and_then(|c| c.entries.last())
        .map(|e| data.entry_json(e))
        .unwrap_or(Value::Null);
    Ok(Json(entry))
}

async fn remove_movie(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, movie_id)): Path<(i64, i64)>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let collection = data.owned_mut(&owner, id)?;
    let before = collection.entries.len();
    collection.entries.retain(|e| e.movie_id != movie_id);
    if collection.entries.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Movie not in collection"));
    }
    Ok(Json(json!({ "message": "Movie removed from collection" })))
}

async fn update_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, movie_id)): Path<(i64, i64)>,
    Json(body): Json<NoteBody>,
) -> Reply {
    let mut data = state.lock().unwrap();
    let owner = authenticate(&data, &headers)?;
    let collection = data.owned_mut(&owner, id)?;
    let entry = collection
        .entries
        .iter_mut()
        .find(|e| e.movie_id == movie_id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Movie not in collection"))?;
    entry.note = body.note;
    let data = &*data;
    let entry = data
        .collections
        .iter()
        .find(|c| c.id == id)
        .and_then(|c| c.entries.iter().find(|e| e.movie_id == movie_id))
        .map(|e| data.entry_json(e))
        .unwrap_or(Value::Null);
    Ok(Json(entry))
}
