//! Post handlers
//!
//! Endpoints for listing, creating, editing, deleting and reacting to posts.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use posts_service::dto::{
    CreatePostRequest, EditPostRequest, ListPostsQuery, MessageResponse, PostCreatedResponse,
    PostResponse, PutLikeRequest,
};
use posts_service::PostService;

use crate::extractors::{BearerToken, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// List posts, optionally filtered by `q`
///
/// GET /posts?q=
pub async fn list_posts(
    State(state): State<AppState>,
    token: BearerToken,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let service = PostService::new(state.service_context());
    let posts = service.list_posts(token.as_str(), query.q.as_deref()).await?;
    Ok(Json(posts))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    token: BearerToken,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostCreatedResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(token.as_str(), request).await?;
    Ok(Created(Json(response)))
}

/// Edit a post's content
///
/// PUT /posts/{id}
pub async fn edit_post(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<EditPostRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.edit_post(token.as_str(), &id, request).await?;
    Ok(Json(response))
}

/// Delete a post
///
/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.delete_post(token.as_str(), &id).await?;
    Ok(Json(response))
}

/// Like or dislike a post
///
/// PUT /posts/{id}/like
pub async fn put_like(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<PutLikeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.put_like(token.as_str(), &id, request).await?;
    Ok(Json(response))
}
