//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Post, PostWithCreator, Reaction, ReactionKind, ReactionTransition, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: &str) -> RepoResult<Option<String>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List posts joined with creator name, newest first.
    /// `query` filters on content (case-insensitive substring).
    async fn find_all(&self, query: Option<&str>) -> RepoResult<Vec<PostWithCreator>>;

    /// Find post by ID
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>>;

    /// Check if a post ID is taken
    async fn exists(&self, id: &str) -> RepoResult<bool>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update content and `updated_at` of a post owned by `creator_id`.
    ///
    /// Fails with `PostNotFound` when no row matches both id and creator.
    async fn update_content(
        &self,
        id: &str,
        creator_id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Delete a post owned by `creator_id`; reactions cascade.
    ///
    /// Fails with `PostNotFound` when no row matches both id and creator.
    async fn delete(&self, id: &str, creator_id: &str) -> RepoResult<()>;

    /// Find the reaction of `user_id` on `post_id`
    async fn find_reaction(&self, user_id: &str, post_id: &str) -> RepoResult<Option<Reaction>>;

    /// Apply a like/dislike request as one atomic unit.
    ///
    /// Reads the current reaction, computes the transition with
    /// `ReactionState::transition`, writes the reaction row and the counter
    /// delta together. Concurrent calls on the same post are serialized.
    async fn apply_reaction(
        &self,
        user_id: &str,
        post_id: &str,
        requested: ReactionKind,
    ) -> RepoResult<ReactionTransition>;
}
