use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Malformed or missing required fields
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Login failure; the same message regardless of which credential was wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Storage failure; surfaced generically, detail goes to the log
    #[error("Failed to {action}")]
    Persistence {
        action: String,
        #[source]
        source: sqlx::Error,
    },

    /// Too many requests
    #[error("Too many requests")]
    RateLimited,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors; detail goes to the log
    #[error("Internal server error")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Persistence { action, source } => {
                tracing::error!(action = %action, error = %source, "storage operation failed");
            }
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Error mapper for repository calls: `.map_err(AppError::db("create invoice"))`
    pub fn db(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Persistence {
            action: action.to_string(),
            source,
        }
    }
}
