//! Test fixtures and data generators
//!
//! Provides reusable request and response shapes for integration tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for test data; combines the process id so reruns against
/// the same database do not collide
pub fn unique_suffix() -> String {
    format!(
        "{}x{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// Signup request
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Fulano {suffix}"),
            email: format!("fulano{suffix}@email.com"),
            password: "fulano123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Token response for signup and login
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Create or edit post request
#[derive(Debug, Serialize)]
pub struct ContentRequest {
    pub content: String,
}

impl ContentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Content carrying a marker that listing filters can find
    pub fn tagged() -> (String, Self) {
        let tag = format!("tag{}", unique_suffix());
        let request = Self::new(format!("Lindo dia {tag}."));
        (tag, request)
    }
}

/// Like request
#[derive(Debug, Serialize)]
pub struct LikeRequest {
    pub like: bool,
}

/// Confirmation with the new post's id
#[derive(Debug, Deserialize)]
pub struct PostCreatedResponse {
    pub message: String,
    pub id: String,
}

/// Plain confirmation
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Post creator summary
#[derive(Debug, Deserialize)]
pub struct CreatorResponse {
    pub id: String,
    pub name: String,
}

/// Post as listed
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub content: String,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator: CreatorResponse,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
