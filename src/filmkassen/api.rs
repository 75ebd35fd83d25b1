//! Typed endpoints of the Filmkassen backend.

use std::sync::Arc;

use super::models::*;
use crate::api::{ApiClient, ApiError};

/// Storage key of the Filmkassen bearer token.
pub const TOKEN_KEY: &str = "access_token";

pub struct FilmkassenApi {
    client: Arc<ApiClient>,
}

impl FilmkassenApi {
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
    ) -> Result<UserResponse, ApiError> {
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
    pub async fn login(&self, username: &str, password: &str) -> Result<UserResponse, ApiError> {
        self.client
            .post("/auth/login", &UserLogin { username, password })
            .await
    }

    /// POST /auth/logout
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.post_empty("/auth/logout").await
    }

    // ========================================================================
    // Movies and directors
    // ========================================================================

    /// GET /movies/search?title=...[&director=...]
    pub async fn search_movies(
        &self,
        title: &str,
        director: Option<&str>,
    ) -> Result<MovieSearchResponse, ApiError> {
        let mut query = vec![("title", title)];
        if let Some(director) = director.filter(|d| !d.is_empty()) {
            query.push(("director", director));
        }
        self.client.get_with_query("/movies/search", &query).await
    }

    /// GET /movies/{id}
    pub async fn get_movie(&self, movie_id: i64) -> Result<Movie, ApiError> {
        self.client.get(&format!("/movies/{}", movie_id)).await
    }

    /// GET /directors/search?name=...
    pub async fn search_directors(&self, name: &str) -> Result<DirectorSearchResponse, ApiError> {
        self.client
            .get_with_query("/directors/search", &[("name", name)])
            .await
    }

    /// GET /directors/{id}/movies
    pub async fn get_director_movies(&self, director_id: i64) -> Result<DirectorMovies, ApiError> {
        self.client
            .get(&format!("/directors/{}/movies", director_id))
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
            .post("/collections", &CollectionCreate { name, description })
            .await
    }

    /// GET /collections/{id}
    pub async fn get_collection(&self, collection_id: i64) -> Result<CollectionDetail, ApiError> {
        self.client
            .get(&format!("/collections/{}", collection_id))
            .await
    }

    /// PUT /collections/{id}
    pub async fn update_collection(
        &self,
        collection_id: i64,
        update: &CollectionUpdate<'_>,
    ) -> Result<Collection, ApiError> {
        self.client
            .put(&format!("/collections/{}", collection_id), update)
            .await
    }

    /// DELETE /collections/{id}
    pub async fn delete_collection(&self, collection_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/collections/{}", collection_id))
            .await
    }

    /// POST /collections/{id}/movies
    pub async fn add_movie(
        &self,
        collection_id: i64,
        movie_id: i64,
        note: Option<&str>,
    ) -> Result<CollectionMovie, ApiError> {
        self.client
            .post(
                &format!("/collections/{}/movies", collection_id),
                &CollectionMovieAdd { movie_id, note },
            )
            .await
    }

    /// DELETE /collections/{id}/movies/{movie_id}
    pub async fn remove_movie(&self, collection_id: i64, movie_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/collections/{}/movies/{}", collection_id, movie_id))
            .await
    }

    /// PUT /collections/{id}/movies/{movie_id}
    pub async fn update_movie_note(
        &self,
        collection_id: i64,
        movie_id: i64,
        note: Option<&str>,
    ) -> Result<CollectionMovie, ApiError> {
        self.client
            .put(
                &format!("/collections/{}/movies/{}", collection_id, movie_id),
                &CollectionMovieUpdate { note },
            )
            .await
    }
}
