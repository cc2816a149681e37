use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::{Deserialize, Serialize};

use orzu_domain::account::{AuthStatus, AuthType};

use crate::error::AccountsError;
use crate::handlers::require_auth;
use crate::state::AppState;
use crate::usecase::profile::{
    GetAccountUseCase, UpdatePhotoUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::usecase::signup::{SignUpInput, SignUpUseCase};

// ── POST /accounts/signup ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub contact: String,
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub id: String,
    pub auth_status: AuthStatus,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AccountsError> {
    let usecase = SignUpUseCase {
        repo: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(SignUpInput { contact: body.contact }).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            id: out.user_id.to_string(),
            auth_status: out.auth_status,
            access_token: out.pair.access_token,
            access_token_exp: out.pair.access_token_exp,
            refresh_token: out.pair.refresh_token,
        }),
    ))
}

// ── GET /accounts/me ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub contact: String,
    pub auth_type: AuthType,
    pub auth_status: AuthStatus,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo: Option<String>,
    #[serde(serialize_with = "orzu_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "orzu_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_me(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<AccountResponse>, AccountsError> {
    let identity = require_auth(&state, bearer)?;
    let usecase = GetAccountUseCase {
        repo: state.account_repo(),
    };
    let account = usecase.execute(identity.user_id).await?;
    Ok(Json(AccountResponse {
        id: account.id.to_string(),
        auth_type: account.auth_type(),
        auth_status: account.auth_status,
        contact: account.contact.as_str().to_owned(),
        first_name: account.first_name,
        last_name: account.last_name,
        username: account.username,
        photo: account.photo,
        created_at: account.created_at,
        updated_at: account.updated_at,
    }))
}

// ── PATCH /accounts/me ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateMeResponse {
    pub success: bool,
    pub message: &'static str,
    pub auth_status: AuthStatus,
}

pub async fn update_me(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UpdateMeResponse>, AccountsError> {
    let identity = require_auth(&state, bearer)?;
    let usecase = UpdateProfileUseCase {
        repo: state.account_repo(),
    };
    let out = usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                first_name: body.first_name,
                last_name: body.last_name,
                username: body.username,
            },
        )
        .await?;
    Ok(Json(UpdateMeResponse {
        success: true,
        message: "profile updated",
        auth_status: out.auth_status,
    }))
}

// ── PUT /accounts/me/photo ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePhotoRequest {
    pub photo: String,
}

#[derive(Serialize)]
pub struct UpdatePhotoResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn update_photo(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(body): Json<UpdatePhotoRequest>,
) -> Result<Json<UpdatePhotoResponse>, AccountsError> {
    let identity = require_auth(&state, bearer)?;
    let usecase = UpdatePhotoUseCase {
        repo: state.account_repo(),
    };
    usecase.execute(identity.user_id, body.photo).await?;
    Ok(Json(UpdatePhotoResponse {
        success: true,
        message: "photo updated",
    }))
}
