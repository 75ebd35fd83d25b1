//! Kassen client library
//!
//! Typed clients, state stores and route tables for the Filmkassen and MitSMK
//! collection browsers. The two binaries are thin shells over this library.

pub mod api;
pub mod cli_style;
pub mod config;
pub mod filmkassen;
pub mod mitsmk;
pub mod routing;
pub mod session;
pub mod shell;
pub mod store;

// Re-export commonly used types for convenience
pub use api::{ApiClient, ApiError, UnauthorizedPolicy};
pub use config::{AppConfig, AppKind, CliConfig, FileConfig};
pub use routing::{RouteParams, RoutePattern, Router};
pub use session::{
    FileTokenStorage, MemoryTokenStorage, SessionEvent, TokenClaims, TokenStorage,
};
pub use store::{HasStatus, Status, Store};
