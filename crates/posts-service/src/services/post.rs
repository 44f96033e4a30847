//! Post service
//!
//! Listing, creation, editing, deletion and the like/dislike toggle.
//! Every operation authenticates the token before touching the store.

use chrono::Utc;
use posts_core::{DomainError, Post, ReactionKind};
use tracing::{info, instrument, warn};

use crate::dto::{
    CreatePostRequest, EditPostRequest, MessageResponse, PostCreatedResponse, PostResponse,
    PutLikeRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List posts, newest first, optionally filtered by a content substring
    #[instrument(skip(self, token))]
    pub async fn list_posts(
        &self,
        token: &str,
        query: Option<&str>,
    ) -> ServiceResult<Vec<PostResponse>> {
        self.ctx.authenticate(token)?;

        let posts = self.ctx.post_repo().find_all(query).await?;

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// Create a post owned by the caller
    #[instrument(skip(self, token, request))]
    pub async fn create_post(
        &self,
        token: &str,
        request: CreatePostRequest,
    ) -> ServiceResult<PostCreatedResponse> {
        let payload = self.ctx.authenticate(token)?;

        let id = self.ctx.generate_id();
        if self.ctx.post_repo().exists(&id).await? {
            warn!(post_id = %id, "Generated post id already exists");
            return Err(DomainError::PostIdCollision(id).into());
        }

        let post = Post::new(id, payload.id, request.content);
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, user_id = %post.creator_id, "Post created");

        Ok(PostCreatedResponse {
            message: "Post created".to_string(),
            id: post.id,
        })
    }

    /// Replace the content of a post; only its creator may do this
    #[instrument(skip(self, token, request))]
    pub async fn edit_post(
        &self,
        token: &str,
        post_id: &str,
        request: EditPostRequest,
    ) -> ServiceResult<MessageResponse> {
        let payload = self.ctx.authenticate(token)?;
        let post = self.require_post(post_id).await?;

        if !post.is_owned_by(&payload.id) {
            warn!(post_id, user_id = %payload.id, "Edit rejected: not the creator");
            return Err(DomainError::NotPostCreator.into());
        }

        self.ctx
            .post_repo()
            .update_content(post_id, &payload.id, &request.content, Utc::now())
            .await?;

        info!(post_id, user_id = %payload.id, "Post edited");

        Ok(MessageResponse::new("Post updated"))
    }

    /// Delete a post and its reactions; only its creator may do this
    #[instrument(skip(self, token))]
    pub async fn delete_post(&self, token: &str, post_id: &str) -> ServiceResult<MessageResponse> {
        let payload = self.ctx.authenticate(token)?;
        let post = self.require_post(post_id).await?;

        if !post.is_owned_by(&payload.id) {
            warn!(post_id, user_id = %payload.id, "Delete rejected: not the creator");
            return Err(DomainError::NotPostCreator.into());
        }

        self.ctx.post_repo().delete(post_id, &payload.id).await?;

        info!(post_id, user_id = %payload.id, "Post deleted");

        Ok(MessageResponse::new("Post deleted"))
    }

    /// Like or dislike a post, toggling per the reaction state machine
    #[instrument(skip(self, token))]
    pub async fn put_like(
        &self,
        token: &str,
        post_id: &str,
        request: PutLikeRequest,
    ) -> ServiceResult<MessageResponse> {
        let payload = self.ctx.authenticate(token)?;
        let post = self.require_post(post_id).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(&payload.id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(payload.id.clone()))?;

        if post.is_owned_by(&user.id) {
            warn!(post_id, user_id = %user.id, "Reaction rejected: own post");
            return Err(DomainError::SelfReaction.into());
        }

        let requested = ReactionKind::from_like(request.like);
        let transition = self
            .ctx
            .post_repo()
            .apply_reaction(&user.id, post_id, requested)
            .await?;

        info!(
            post_id,
            user_id = %user.id,
            action = transition.action(),
            kind = %requested,
            "Reaction applied"
        );

        Ok(MessageResponse::new(transition.message()))
    }

    async fn require_post(&self, post_id: &str) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::PostNotFound(post_id.to_string())))
    }
}
