//! User handlers
//!
//! Signup and login; both answer with a token.

use axum::{extract::State, Json};
use posts_service::dto::{LoginRequest, SignupRequest, TokenResponse};
use posts_service::UserService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create an account
///
/// POST /users/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<TokenResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.signup(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}
