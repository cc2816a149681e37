use axum::{Json, extract::State};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::{Deserialize, Serialize};

use orzu_domain::account::AuthStatus;

use crate::error::AccountsError;
use crate::handlers::require_auth;
use crate::state::AppState;
use crate::usecase::password::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

// ── POST /accounts/password/forgot ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub identity: String,
}

#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub success: bool,
    pub message: &'static str,
    pub auth_status: AuthStatus,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// No auth required: password reset must stay reachable without a session.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>, AccountsError> {
    let usecase = ForgotPasswordUseCase {
        repo: state.account_repo(),
        codes: state.verify_code_repo(),
        notifier: state.notifier(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(ForgotPasswordInput {
            identity: body.identity,
        })
        .await?;
    Ok(Json(ForgotPasswordResponse {
        success: true,
        message: "reset code sent if the channel supports delivery",
        auth_status: out.auth_status,
        access_token: out.pair.access_token,
        access_token_exp: out.pair.access_token_exp,
        refresh_token: out.pair.refresh_token,
    }))
}

// ── PATCH /accounts/password/reset ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub new_secret: String,
}

#[derive(Serialize)]
pub struct ResetPasswordResponse {
    pub success: bool,
    pub message: &'static str,
    pub auth_status: AuthStatus,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<ResetPasswordResponse>, AccountsError> {
    let identity = require_auth(&state, bearer)?;
    let usecase = ResetPasswordUseCase {
        repo: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(
            identity.user_id,
            ResetPasswordInput {
                new_secret: body.new_secret,
            },
        )
        .await?;
    Ok(Json(ResetPasswordResponse {
        success: true,
        message: "password changed",
        auth_status: out.auth_status,
        access_token: out.pair.access_token,
        access_token_exp: out.pair.access_token_exp,
        refresh_token: out.pair.refresh_token,
    }))
}
