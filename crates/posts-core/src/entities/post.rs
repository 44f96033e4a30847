//! Post entity - a piece of user content with like/dislike counters

use chrono::{DateTime, Utc};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub creator_id: String,
    pub content: String,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with zeroed counters
    pub fn new(id: String, creator_id: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            creator_id,
            content,
            likes: 0,
            dislikes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `user_id` created this post
    #[inline]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }

    /// Replace the content and bump `updated_at`
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Check if the post has been edited since creation
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Post joined with its creator's display name (listing row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithCreator {
    pub post: Post,
    pub creator_name: String,
}
