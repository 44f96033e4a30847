//! Entity to DTO mappers

use posts_core::PostWithCreator;

use super::responses::{CreatorResponse, PostResponse};

impl From<PostWithCreator> for PostResponse {
    fn from(row: PostWithCreator) -> Self {
        let post = row.post;
        Self {
            id: post.id,
            content: post.content,
            likes: post.likes,
            dislikes: post.dislikes,
            created_at: post.created_at,
            updated_at: post.updated_at,
            creator: CreatorResponse {
                id: post.creator_id,
                name: row.creator_name,
            },
        }
    }
}
