//! User service
//!
//! Account creation and login; both return a signed token.

use posts_common::auth::{PasswordService, TokenPayload};
use posts_common::AppError;
use posts_core::{DomainError, User};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, SignupRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Emails are compared case-insensitively
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
    passwords: PasswordService,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            passwords: PasswordService::new(),
        }
    }

    /// Register a new user with the `NORMAL` role
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<TokenResponse> {
        let email = normalize_email(&request.email);

        if self.ctx.user_repo().email_exists(&email).await? {
            warn!("Signup rejected: email already registered");
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.passwords.hash(&request.password)?;

        let user = User::new(self.ctx.generate_id(), request.name.trim().to_string(), email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User signed up");

        self.issue_token(&user)
    }

    /// Exchange email and password for a token
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(&user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        self.passwords
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: wrong password"))?;

        info!(user_id = %user.id, "User logged in");

        self.issue_token(&user)
    }

    fn issue_token(&self, user: &User) -> ServiceResult<TokenResponse> {
        let token = self
            .ctx
            .jwt_service()
            .generate_token(&TokenPayload::from(user))?;

        Ok(TokenResponse { token })
    }
}
