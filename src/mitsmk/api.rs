//! Typed endpoints of the MitSMK backend.

use std::sync::Arc;
use uuid::Uuid;

use super::models::*;
use crate::api::{segment, ApiClient, ApiError};

/// Storage key of the MitSMK bearer token.
pub const TOKEN_KEY: &str = "token";

pub struct MitSmkApi {
    client: Arc<ApiClient>,
}

impl MitSmkApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// POST /auth/register
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        self.client
            .post(
                "/auth/register",
                &UserCreate {
                    username,
                    email,
                    password,
                },
            )
            .await
    }

    /// POST /auth/login
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.client
            .post("/auth/login", &UserLogin { username, password })
            .await
    }

    /// GET /auth/me
    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me").await
    }

    // ========================================================================
    // Artworks
    // ========================================================================

    /// GET /artworks/search?q=...&offset=...&limit=...
    pub async fn search_artworks(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<ArtworkSearchResponse, ApiError> {
        let offset = offset.to_string();
        let limit = limit.to_string();
        self.client
            .get_with_query(
                "/artworks/search",
                &[("q", query), ("offset", &offset), ("limit", &limit)],
            )
            .await
    }

    /// GET /artworks/{object_number}
    pub async fn get_artwork(&self, object_number: &str) -> Result<Artwork, ApiError> {
        self.client
            .get(&format!("/artworks/{}", segment(object_number)))
            .await
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// GET /collections
    pub async fn list_collections(&self) -> Result<Vec<Collection>, ApiError> {
        self.client.get("/collections").await
    }

    /// POST /collections
    pub async fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Collection, ApiError> {
        self.client
            .post("/collections", &CollectionWrite { name, description })
            .await
    }

    /// GET /collections/{id}
    pub async fn get_collection(
        &self,
        collection_id: Uuid,
    ) -> Result<CollectionDetails, ApiError> {
        self.client
            .get(&format!("/collections/{}", collection_id))
            .await
    }

    /// PUT /collections/{id}
    pub async fn update_collection(
        &self,
        collection_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Collection, ApiError> {
        self.client
            .put(
                &format!("/collections/{}", collection_id),
                &CollectionWrite { name, description },
            )
            .await
    }

    /// DELETE /collections/{id}
    pub async fn delete_collection(&self, collection_id: Uuid) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/collections/{}", collection_id))
            .await
    }

    /// POST /collections/{id}/artworks
    pub async fn add_artwork(
        &self,
        collection_id: Uuid,
        artwork_id: Uuid,
        note: Option<&str>,
    ) -> Result<CollectionItem, ApiError> {
        self.client
            .post(
                &format!("/collections/{}/artworks", collection_id),
                &CollectionItemCreate { artwork_id, note },
            )
            .await
    }

    /// DELETE /collections/{id}/artworks/{artwork_id}
    pub async fn remove_artwork(
        &self,
        collection_id: Uuid,
        artwork_id: Uuid,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!(
                "/collections/{}/artworks/{}",
                collection_id, artwork_id
            ))
            .await
    }
}
