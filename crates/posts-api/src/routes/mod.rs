//! Route definitions

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, posts, users};
use crate::state::AppState;

/// Create the API router (health routes excluded so they bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().merge(user_routes()).merge(post_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(users::signup))
        .route("/users/login", post(users::login))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/:id", put(posts::edit_post).delete(posts::delete_post))
        .route("/posts/:id/like", put(posts::put_like))
}
