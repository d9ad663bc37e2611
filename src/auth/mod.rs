use axum::routing::post;
use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod error;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
}
