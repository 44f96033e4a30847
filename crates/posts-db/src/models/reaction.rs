//! Like/dislike database model

use sqlx::FromRow;

/// Database model for the likes_dislikes table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub user_id: String,
    pub post_id: String,
    pub like: bool,
}
