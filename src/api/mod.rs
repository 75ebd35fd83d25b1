mod client;
mod error;
pub mod timestamp;

pub use client::{ApiClient, UnauthorizedPolicy};
pub(crate) use client::segment;
pub use error::{ApiError, ErrorBody};
