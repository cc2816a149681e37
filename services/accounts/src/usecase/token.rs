use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use orzu_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims, REFRESH_TOKEN_EXP, validate_token};
use orzu_domain::account::AuthStatus;

use crate::domain::repository::{AccountRepository, TokenDenylist};
use crate::domain::types::{Account, ContactIdentity};
use crate::error::AccountsError;
use crate::usecase::password::verify_secret;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn sign(claims: &JwtClaims, secret: &str) -> Result<String, AccountsError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AccountsError::Internal(e.into()))
}

pub fn issue_access_token(
    account: &Account,
    secret: &str,
) -> Result<(String, u64), AccountsError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: account.id.to_string(),
        status: account.auth_status.as_i16(),
        jti: Uuid::new_v4().to_string(),
        exp,
    };
    Ok((sign(&claims, secret)?, exp))
}

pub fn issue_refresh_token(account: &Account, secret: &str) -> Result<String, AccountsError> {
    let claims = JwtClaims {
        sub: account.id.to_string(),
        status: account.auth_status.as_i16(),
        // Keys the denylist: revoking this id is what ends the session.
        jti: Uuid::new_v4().to_string(),
        exp: now_secs() + REFRESH_TOKEN_EXP,
    };
    sign(&claims, secret)
}

/// An access/refresh pair representing one session. The access token carries
/// the auth-status snapshot taken at issuance.
#[derive(Debug)]
pub struct CredentialPair {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub fn issue_pair(account: &Account, secret: &str) -> Result<CredentialPair, AccountsError> {
    let (access_token, access_token_exp) = issue_access_token(account, secret)?;
    let refresh_token = issue_refresh_token(account, secret)?;
    Ok(CredentialPair {
        access_token,
        access_token_exp,
        refresh_token,
    })
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub identity: String,
    pub secret: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub auth_status: AuthStatus,
    pub pair: CredentialPair,
}

pub struct LoginUseCase<R: AccountRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: AccountRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AccountsError> {
        let contact =
            ContactIdentity::parse(&input.identity).ok_or(AccountsError::ValidationFailed)?;

        // Unknown identity, no password set, and wrong secret are deliberately
        // indistinguishable to the caller.
        let account = self
            .repo
            .find_by_contact(&contact)
            .await?
            .ok_or(AccountsError::Unauthorized)?;

        let hash = account
            .password_hash
            .as_deref()
            .ok_or(AccountsError::Unauthorized)?;
        if !verify_secret(&input.secret, hash) {
            return Err(AccountsError::Unauthorized);
        }

        let pair = issue_pair(&account, &self.jwt_secret)?;
        Ok(LoginOutput {
            user_id: account.id,
            auth_status: account.auth_status,
            pair,
        })
    }
}

// ── RefreshSession ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshSessionOutput {
    pub user_id: Uuid,
    pub auth_status: AuthStatus,
    pub pair: CredentialPair,
}

pub struct RefreshSessionUseCase<R: AccountRepository, D: TokenDenylist> {
    pub repo: R,
    pub denylist: D,
    pub jwt_secret: String,
}

impl<R: AccountRepository, D: TokenDenylist> RefreshSessionUseCase<R, D> {
    /// Rotate the session: the presented refresh token is denylisted and a
    /// fresh pair is issued. Of two concurrent refreshes with the same token,
    /// exactly one wins; the loser gets `InvalidToken`.
    pub async fn execute(
        &self,
        refresh_token_value: &str,
    ) -> Result<RefreshSessionOutput, AccountsError> {
        let claims = validate_token(refresh_token_value, &self.jwt_secret)
            .map_err(|_| AccountsError::InvalidToken)?;

        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AccountsError::InvalidToken)?;

        let account = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::InvalidToken)?;

        // Keep the denylist entry alive for the token's remaining lifetime;
        // after that the exp check alone rejects it.
        let ttl = claims.exp.saturating_sub(now_secs()).max(1);
        if !self.denylist.revoke(&claims.jti, ttl).await? {
            return Err(AccountsError::InvalidToken);
        }

        let pair = issue_pair(&account, &self.jwt_secret)?;
        Ok(RefreshSessionOutput {
            user_id: account.id,
            auth_status: account.auth_status,
            pair,
        })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<D: TokenDenylist> {
    pub denylist: D,
    pub jwt_secret: String,
}

impl<D: TokenDenylist> LogoutUseCase<D> {
    /// Permanently revoke a refresh token. Already-revoked, expired, and
    /// malformed tokens all fail with `InvalidToken`. Access tokens issued
    /// before the revocation stay usable until their natural expiry.
    pub async fn execute(&self, refresh_token_value: &str) -> Result<(), AccountsError> {
        let claims = validate_token(refresh_token_value, &self.jwt_secret)
            .map_err(|_| AccountsError::InvalidToken)?;

        let ttl = claims.exp.saturating_sub(now_secs()).max(1);
        if !self.denylist.revoke(&claims.jti, ttl).await? {
            return Err(AccountsError::InvalidToken);
        }
        Ok(())
    }
}
