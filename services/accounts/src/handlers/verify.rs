use axum::{Json, extract::State};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::{Deserialize, Serialize};

use orzu_domain::account::AuthStatus;

use crate::error::AccountsError;
use crate::handlers::require_auth;
use crate::state::AppState;
use crate::usecase::verify::{CheckVerifyInput, CheckVerifyUseCase, ResendCodeUseCase};

// ── POST /accounts/verify ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub auth_status: AuthStatus,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub async fn check_verify(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AccountsError> {
    let identity = require_auth(&state, bearer)?;
    let usecase = CheckVerifyUseCase {
        repo: state.account_repo(),
        codes: state.verify_code_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(identity.user_id, CheckVerifyInput { code: body.code })
        .await?;
    Ok(Json(VerifyResponse {
        success: true,
        auth_status: out.auth_status,
        access_token: out.pair.access_token,
        access_token_exp: out.pair.access_token_exp,
        refresh_token: out.pair.refresh_token,
    }))
}

// ── GET /accounts/verify/new ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResendResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn resend_code(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<ResendResponse>, AccountsError> {
    let identity = require_auth(&state, bearer)?;
    let usecase = ResendCodeUseCase {
        repo: state.account_repo(),
        codes: state.verify_code_repo(),
        notifier: state.notifier(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(Json(ResendResponse {
        success: true,
        message: "verification code resent",
    }))
}
