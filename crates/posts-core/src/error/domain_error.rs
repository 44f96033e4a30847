//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    // =========================================================================
    // Bad Request Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Only the creator can modify this post")]
    NotPostCreator,

    #[error("Cannot react to your own post")]
    SelfReaction,

    #[error("Post id already in use: {0}")]
    PostIdCollision(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",

            // Bad Request
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NotPostCreator => "NOT_POST_CREATOR",
            Self::SelfReaction => "SELF_REACTION",
            Self::PostIdCollision(_) => "POST_ID_COLLISION",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::PostNotFound(_))
    }

    /// Check if this is a bad-request error (malformed input or a broken business rule)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::NotPostCreator
                | Self::SelfReaction
                | Self::PostIdCollision(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// Map to an HTTP status code
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_bad_request() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
