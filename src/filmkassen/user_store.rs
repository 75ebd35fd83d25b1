use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::api::FilmkassenApi;
use super::messages::*;
use super::models::{User, UserResponse};
use crate::api::ApiError;
use crate::session::TokenClaims;
use crate::store::{detail_or, HasStatus, Status, Store};

#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub status: Status,
}

impl UserState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

impl HasStatus for UserState {
    fn status(&self) -> &Status {
        &self.status
    }
    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }
}

pub struct UserStore {
    api: Arc<FilmkassenApi>,
    state: Store<UserState>,
}

impl UserStore {
    pub fn new(api: Arc<FilmkassenApi>) -> Self {
        Self {
            api,
            state: Store::default(),
        }
    }

    pub fn state(&self) -> &Store<UserState> {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read(UserState::is_logged_in)
    }

    pub fn clear_error(&self) {
        self.state.clear_error();
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<UserResponse, ApiError> {
        let request = async {
            let response = self.api.login(username, password).await?;
            self.api.client().store_token(&response.access_token)?;
            Ok(response)
        };
        self.state
            .track(request, detail_or(LOGIN_FAILED), |s, response| {
                s.user = Some(response.user.clone());
                s.access_token = Some(response.access_token.clone());
            })
            .await
    }

    /// Creates the account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, ApiError> {
        self.state
            .track(
                self.api.register(username, email, password),
                detail_or(REGISTER_FAILED),
                |_, _| {},
            )
            .await
    }

    /// Tells the backend, then forgets the session locally. When the backend
    /// call fails the session is kept and the error is handed back.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.state.update(|s| {
            s.status.loading = true;
            s.status.error = None;
        });
        let result = self.api.logout().await;
        match &result {
            Ok(()) => self.clear_session(),
            Err(err) => error!("Logout error: {}", err),
        }
        self.state.update(|s| s.status.loading = false);
        result
    }

    /// Checks the stored token without a network round trip.
    ///
    /// Returns false, and forgets the token, when it is missing, unreadable
    /// or past its expiry. Otherwise rebuilds a minimal user from the
    /// token's subject.
    pub fn verify_token_at(&self, now: DateTime<Utc>) -> bool {
        let Some(token) = self.api.client().token() else {
            return false;
        };

        match TokenClaims::decode(&token) {
            Ok(claims) if claims.is_expired_at(now) => {
                debug!("Stored token expired at {:?}", claims.exp);
                self.clear_session();
                false
            }
            Ok(claims) => {
                self.state.update(|s| {
                    s.access_token = Some(token);
                    s.user = Some(User {
                        id: 0,
                        username: claims.sub.unwrap_or_default(),
                        email: String::new(),
                        created_at: None,
                    });
                });
                true
            }
            Err(err) => {
                warn!("Error verifying token: {}", err);
                self.clear_session();
                false
            }
        }
    }

    pub fn verify_token(&self) -> bool {
        self.verify_token_at(Utc::now())
    }

    fn clear_session(&self) {
        if let Err(err) = self.api.client().clear_token() {
            warn!("Failed to remove stored token: {}", err);
        }
        self.state.update(|s| {
            s.user = None;
            s.access_token = None;
        });
    }
}
