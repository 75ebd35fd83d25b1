//! Token payload inspection.
//!
//! The signature is never checked here, the backend does that. The client
//! only reads the payload to decide whether a stored token is worth sending.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("Token has no payload segment")]
    MissingPayload,

    #[error("Token payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Username the token was issued to.
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry, unix seconds.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let payload = token
            .split('.')
            .nth(1)
            .filter(|s| !s.is_empty())
            .ok_or(ClaimsError::MissingPayload)?;
        let bytes = PAYLOAD_ENGINE.decode(payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Tokens without `exp` never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => exp < now.timestamp(),
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
