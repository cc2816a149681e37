use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::{Deserialize, Serialize};

use orzu_domain::account::AuthStatus;

use crate::error::AccountsError;
use crate::handlers::require_auth;
use crate::state::AppState;
use crate::usecase::token::{LoginInput, LoginUseCase, LogoutUseCase, RefreshSessionUseCase};

#[derive(Serialize)]
pub struct SessionResponse {
    pub auth_status: AuthStatus,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

// ── POST /accounts/login ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub identity: String,
    pub secret: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AccountsError> {
    let usecase = LoginUseCase {
        repo: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            identity: body.identity,
            secret: body.secret,
        })
        .await?;
    Ok(Json(SessionResponse {
        auth_status: out.auth_status,
        access_token: out.pair.access_token,
        access_token_exp: out.pair.access_token_exp,
        refresh_token: out.pair.refresh_token,
    }))
}

// ── POST /accounts/login/refresh ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn refresh_session(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<SessionResponse>, AccountsError> {
    let usecase = RefreshSessionUseCase {
        repo: state.account_repo(),
        denylist: state.token_denylist(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&body.refresh_token).await?;
    Ok(Json(SessionResponse {
        auth_status: out.auth_status,
        access_token: out.pair.access_token,
        access_token_exp: out.pair.access_token_exp,
        refresh_token: out.pair.refresh_token,
    }))
}

// ── POST /accounts/logout ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

pub async fn logout(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<LogoutRequest>,
) -> Result<StatusCode, AccountsError> {
    require_auth(&state, bearer)?;
    let usecase = LogoutUseCase {
        denylist: state.token_denylist(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(&body.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
