use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service domain error variants.
///
/// Callers key on [`AccountsError::kind`]; messages are human-facing only.
#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    #[error("malformed input")]
    ValidationFailed,
    #[error("verification code is invalid or expired")]
    InvalidOrExpiredCode,
    #[error("a verification code is still valid")]
    CodeStillValid,
    #[error("channel does not support code delivery")]
    UnsupportedChannel,
    #[error("invalid token")]
    InvalidToken,
    #[error("unauthorized")]
    Unauthorized,
    #[error("user not found")]
    UserNotFound,
    #[error("contact identity already registered")]
    Conflict,
    #[error("store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            Self::CodeStillValid => "CODE_STILL_VALID",
            Self::UnsupportedChannel => "UNSUPPORTED_CHANNEL",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ValidationFailed
            | Self::InvalidOrExpiredCode
            | Self::CodeStillValid
            | Self::UnsupportedChannel => StatusCode::BAD_REQUEST,
            Self::InvalidToken | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        match &self {
            Self::StoreUnavailable(e) => {
                tracing::error!(error = %e, kind = "STORE_UNAVAILABLE", "store unavailable");
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
