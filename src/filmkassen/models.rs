//! Filmkassen API data models.
//!
//! These types match the JSON structure of the Filmkassen backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::timestamp;

// =============================================================================
// Users
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Absent on the minimal user rebuilt from a stored token.
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct UserCreate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct UserLogin<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Returned by both register and login.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub user: User,
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// =============================================================================
// Movies and directors
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MovieSummary {
    pub id: i64,
    pub dfi_id: i64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub cast: Option<Vec<String>>,
    #[serde(default)]
    pub clips: Option<Vec<String>>,
    #[serde(default)]
    pub videotek_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub cached_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Director {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub dfi_id: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub cached_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MovieSearchResponse {
    #[serde(default)]
    pub movies: Vec<MovieSummary>,
    pub total: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DirectorSearchResponse {
    #[serde(default)]
    pub directors: Vec<Director>,
    pub total: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DirectorMovies {
    pub director: Director,
    #[serde(default)]
    pub movies: Vec<MovieSummary>,
}

// =============================================================================
// Collections ("filmkasser")
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CollectionMovie {
    pub id: i64,
    pub movie: MovieSummary,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(with = "timestamp")]
    pub added_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub collection: Collection,
    #[serde(default)]
    pub movies: Vec<CollectionMovie>,
}

impl CollectionDetail {
    pub fn id(&self) -> i64 {
        self.collection.id
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CollectionCreate<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CollectionUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CollectionMovieAdd<'a> {
    pub movie_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'a str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CollectionMovieUpdate<'a> {
    pub note: Option<&'a str>,
}
