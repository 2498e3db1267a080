//! http handlers for classhub api endpoints.

pub mod api_v1;
mod auth_context;
mod envelope;
mod error;
mod health;
mod json_body;

pub use auth_context::{AuthContext, AuthError};
pub use envelope::{ApiResponse, ErrorBody};
pub use error::{ApiError, OptionExt, ResultExt};
pub use health::health;
pub use json_body::JsonBody;
