use std::sync::Arc;

use uuid::Uuid;

use crate::core::{AppError, Result, Valid};
use crate::middleware::{token_digest, SessionContext};
use crate::modules::auth::models::{
    AuthResponse, LoginRequest, RegisterRequest, Session, User, UserResponse,
};
use crate::modules::auth::repositories::{SessionRepository, UserRepository};

use super::password;

/// Account registration and session issuance
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    session_ttl_hours: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        session_ttl_hours: u32,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl_hours,
        }
    }

    /// Create an account and log it in, returning the first session.
    pub async fn register(&self, request: Valid<RegisterRequest>) -> Result<AuthResponse> {
        let request = request.into_inner();

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::validation("Email already in use."));
        }

        let password_hash = password::hash_password(&request.password)?;
        let user = User::new(request.email, password_hash);
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "account registered");

        self.issue_session(&user).await
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown email and wrong password produce the identical error so the
    /// response never reveals which one was at fault.
    pub async fn login(&self, request: Valid<LoginRequest>) -> Result<AuthResponse> {
        let request = request.into_inner();

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !password::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        // Opportunistic cleanup of this user's stale sessions
        self.sessions.delete_expired(&user.id).await.ok();

        self.issue_session(&user).await
    }

    pub async fn logout(&self, ctx: &SessionContext) -> Result<()> {
        self.sessions.delete(&ctx.session_id).await
    }

    pub async fn current_user(&self, ctx: &SessionContext) -> Result<UserResponse> {
        let user = self
            .users
            .find_by_id(&ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(UserResponse::from(&user))
    }

    async fn issue_session(&self, user: &User) -> Result<AuthResponse> {
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let session = Session::new(user.id.clone(), token_digest(&token), self.session_ttl_hours);
        self.sessions.create(&session).await?;

        Ok(AuthResponse {
            token,
            expires_at: session.expires_at.to_rfc3339(),
            user: UserResponse::from(user),
        })
    }
}
