//! HTTP client for the collection backends.
//!
//! Every request reads the bearer token from storage at send time, so a
//! login or logout is picked up by the next call without rebuilding the
//! client.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::session::{SessionEvent, TokenStorage};

/// What the client does when the backend answers 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedPolicy {
    /// Hand the error back to the caller untouched.
    Surface,
    /// Drop the stored token and publish [`SessionEvent::Unauthorized`].
    ClearSession,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    storage: Arc<dyn TokenStorage>,
    token_key: String,
    unauthorized_policy: UnauthorizedPolicy,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "http://localhost:8000/api")
    /// * `timeout` - Request ceiling, `None` to wait indefinitely
    /// * `storage` - Where the bearer token lives
    /// * `token_key` - Storage key of the bearer token
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        storage: Arc<dyn TokenStorage>,
        token_key: &str,
        unauthorized_policy: UnauthorizedPolicy,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Transport)?;
        let (events, _) = broadcast::channel(16);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
            token_key: token_key.to_string(),
            unauthorized_policy,
            events,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.storage
    }

    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(&self.token_key)
    }

    pub fn store_token(&self, token: &str) -> Result<(), ApiError> {
        self.storage
            .set(&self.token_key, token)
            .map_err(|e| ApiError::Storage(e.to_string()))
    }

    pub fn clear_token(&self) -> Result<(), ApiError> {
        self.storage
            .remove(&self.token_key)
            .map_err(|e| ApiError::Storage(e.to_string()))
    }

    /// Subscribe to session invalidation events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        decode(response).await
    }

    /// POST without a body, discarding whatever comes back.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        decode(response).await
    }

    /// DELETE; both `204 No Content` and JSON acknowledgements are accepted.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match self.token() {
            Some(token) => {
                debug!("Attaching bearer token to request for {}", path);
                builder.bearer_auth(token)
            }
            None => {
                debug!("No bearer token available for request to {}", path);
                builder
            }
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        warn!("API error on {}: {}", url, err);

        if status == StatusCode::UNAUTHORIZED
            && self.unauthorized_policy == UnauthorizedPolicy::ClearSession
        {
            if let Err(e) = self.storage.remove(&self.token_key) {
                warn!("Failed to drop rejected token: {}", e);
            }
            // Nobody listening is fine.
            let _ = self.events.send(SessionEvent::Unauthorized);
        }
        Err(err)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Percent-encodes a caller supplied path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
