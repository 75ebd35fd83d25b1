//! Client-side session: persisted bearer token, its claims, and the events
//! emitted when the backend rejects it.

mod claims;
mod token_storage;

pub use claims::{ClaimsError, TokenClaims};
pub use token_storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};

/// Published by the HTTP client when the session is invalidated remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A request came back 401 and the stored token was dropped.
    Unauthorized,
}
