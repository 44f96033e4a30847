//! Post entity <-> model mapper

use posts_core::{Post, PostWithCreator};

use crate::models::{PostModel, PostWithCreatorModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            creator_id: model.creator_id,
            content: model.content,
            likes: model.likes,
            dislikes: model.dislikes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PostWithCreatorModel> for PostWithCreator {
    fn from(model: PostWithCreatorModel) -> Self {
        PostWithCreator {
            post: Post::from(model.post),
            creator_name: model.creator_name,
        }
    }
}

/// Column values for inserting a post
pub struct PostInsert<'a> {
    pub id: &'a str,
    pub creator_id: &'a str,
    pub content: &'a str,
    pub likes: i64,
    pub dislikes: i64,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: &post.id,
            creator_id: &post.creator_id,
            content: &post.content,
            likes: post.likes,
            dislikes: post.dislikes,
        }
    }
}
