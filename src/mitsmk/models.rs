//! MitSMK API data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::timestamp;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
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

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// An artwork as cached by the backend from the SMK open API.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Artwork {
    pub id: Uuid,
    pub object_number: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Free text, e.g. "1885" or "ca. 1620-1625".
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub image_thumbnail: Option<String>,
    #[serde(default)]
    pub image_iiif_id: Option<String>,
    #[serde(default)]
    pub public_domain: bool,
    #[serde(default)]
    pub object_names: Option<Vec<String>>,
    #[serde(default)]
    pub has_image: bool,
    #[serde(with = "timestamp")]
    pub cached_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArtworkSearchResponse {
    pub artworks: Vec<Artwork>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CollectionItem {
    pub id: Uuid,
    pub artwork: Artwork,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(with = "timestamp")]
    pub added_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CollectionDetails {
    #[serde(flatten)]
    pub collection: Collection,
    #[serde(default)]
    pub artworks: Vec<CollectionItem>,
}

impl CollectionDetails {
    pub fn id(&self) -> Uuid {
        self.collection.id
    }
}

/// Used for both create and update; the name is always required.
#[derive(Clone, Debug, Serialize)]
pub struct CollectionWrite<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CollectionItemCreate<'a> {
    pub artwork_id: Uuid,
    pub note: Option<&'a str>,
}
