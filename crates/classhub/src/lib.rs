//! classhub library - HTTP handlers and application setup.
//!
//! this crate provides the http server and handlers for the classhub school
//! management backend:
//! - [`handlers`]: http request handlers for the rest api
//! - [`cli`]: command-line interface implementation
//! - [`token`]: jwt issuing and verification

#![warn(missing_docs)]

/// command-line interface implementation.
pub mod cli;
/// http request handlers for the rest api.
pub mod handlers;
/// jwt issuing and verification.
pub mod token;

use axum::{routing::get, Router};
use classhub_db::ClasshubDb;
use classhub_types::Config;

/// shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// database connection for persistent storage.
    pub db: ClasshubDb,
    /// server configuration.
    pub config: Config,
}

/// create the axum application with all routes.
pub fn create_app(db: ClasshubDb, config: Config) -> Router {
    let state = AppState { db, config };

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", handlers::api_v1::router())
        .with_state(state)
}
