pub mod accounts;
pub mod password;
pub mod token;
pub mod verify;

use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use orzu_auth_types::token::TokenInfo;

use crate::error::AccountsError;
use crate::state::AppState;

/// Extract and validate the bearer access token. A missing header and an
/// invalid token both surface as `Unauthorized`.
pub(crate) fn require_auth(
    state: &AppState,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<TokenInfo, AccountsError> {
    let TypedHeader(auth) = bearer.ok_or(AccountsError::Unauthorized)?;
    state.authenticate(auth.token())
}
