use std::sync::Arc;
use tracing::{debug, info, warn};

use super::api::MitSmkApi;
use super::messages::*;
use super::models::{LoginResponse, User};
use crate::api::ApiError;
use crate::store::{detail_or, HasStatus, Status, Store};

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub status: Status,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

impl HasStatus for AuthState {
    fn status(&self) -> &Status {
        &self.status
    }
    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }
}

pub struct AuthStore {
    api: Arc<MitSmkApi>,
    state: Store<AuthState>,
}

impl AuthStore {
    /// Picks up a token left in storage by an earlier session. The user stays
    /// unknown until [`AuthStore::check_auth`] confirms it.
    pub fn new(api: Arc<MitSmkApi>) -> Self {
        let token = api.client().token();
        Self {
            api,
            state: Store::new(AuthState {
                token,
                ..AuthState::default()
            }),
        }
    }

    pub fn state(&self) -> &Store<AuthState> {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read(AuthState::is_authenticated)
    }

    pub fn clear_error(&self) {
        self.state.clear_error();
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = async {
            let response = self.api.login(username, password).await?;
            self.api.client().store_token(&response.access_token)?;
            Ok(response)
        };
        self.state
            .track(request, detail_or(LOGIN_FAILED), |s, response| {
                s.token = Some(response.access_token.clone());
                s.user = Some(response.user.clone());
            })
            .await
    }

    /// Creates the account and returns it. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        self.state
            .track(
                self.api.register(username, email, password),
                detail_or(REGISTER_FAILED),
                |_, _| {},
            )
            .await
    }

    /// Local only; the backend keeps no session to end.
    pub fn logout(&self) {
        if let Err(err) = self.api.client().clear_token() {
            warn!("Failed to remove stored token: {}", err);
        }
        self.state.update(|s| {
            s.user = None;
            s.token = None;
        });
    }

    /// Confirms the stored token with `/auth/me`. Any failure logs out.
    pub async fn check_auth(&self) -> bool {
        if self.state.read(|s| s.token.is_none()) {
            return false;
        }

        match self.api.me().await {
            Ok(user) => {
                info!("Session restored for {}", user.username);
                self.state.update(|s| s.user = Some(user));
                true
            }
            Err(err) => {
                debug!("Stored session rejected: {}", err);
                self.logout();
                false
            }
        }
    }
}
