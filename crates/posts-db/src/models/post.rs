//! Post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: String,
    pub creator_id: String,
    pub content: String,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row joined with its creator's name
#[derive(Debug, Clone, FromRow)]
pub struct PostWithCreatorModel {
    #[sqlx(flatten)]
    pub post: PostModel,
    pub creator_name: String,
}
