use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;

use crate::core::AppError;

/// Paths reachable without a session
const PUBLIC_PATHS: &[&str] = &["/", "/health", "/ready", "/auth/login", "/auth/register"];

/// The authenticated caller, resolved once per request and handed to
/// handlers explicitly. There is no process-wide current-user singleton.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: String,
    pub session_id: String,
}

impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionContext>()
                .cloned()
                .ok_or_else(|| Error::from(AppError::Unauthorized)),
        )
    }
}

/// Bearer-token session authentication middleware
pub struct SessionAuth {
    pool: MySqlPool,
}

impl SessionAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.path()) {
                return svc.call(req).await;
            }

            let token = bearer_token(&req).ok_or_else(|| Error::from(AppError::Unauthorized))?;

            let session = resolve_session(&pool, &token)
                .await
                .map_err(Error::from)?;

            req.extensions_mut().insert(session);

            svc.call(req).await
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Hex digest stored in the sessions table; the raw token never touches disk.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_id: String,
}

async fn resolve_session(pool: &MySqlPool, token: &str) -> crate::core::Result<SessionContext> {
    let digest = token_digest(token);

    let row = sqlx::query_as::<_, SessionRow>(
        r#"
        SELECT id, user_id
        FROM sessions
        WHERE token_hash = ? AND expires_at > ?
        LIMIT 1
        "#,
    )
    .bind(&digest)
    .bind(chrono::Utc::now())
    .fetch_optional(pool)
    .await
    .map_err(AppError::db("resolve session"))?
    .ok_or(AppError::Unauthorized)?;

    Ok(SessionContext {
        user_id: row.user_id,
        session_id: row.id,
    })
}
