use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use orzu_domain::account::{AuthStatus, AuthType};

use crate::domain::repository::{AccountRepository, Notifier, VerifyCodeRepository};
use crate::domain::types::{VERIFY_CODE_LEN, VERIFY_CODE_TTL_SECS, VerifyCode};
use crate::error::AccountsError;
use crate::usecase::token::{CredentialPair, issue_pair};

/// Charset for generating verification codes (decimal digits).
const CHARSET: &[u8] = b"0123456789";

pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..VERIFY_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

pub fn new_verify_code(user_id: Uuid) -> VerifyCode {
    let now = Utc::now();
    VerifyCode {
        id: Uuid::new_v4(),
        user_id,
        code: generate_code(),
        expires_at: now + Duration::seconds(VERIFY_CODE_TTL_SECS),
        is_confirmed: false,
        created_at: now,
    }
}

// ── CheckVerify ──────────────────────────────────────────────────────────────

pub struct CheckVerifyInput {
    pub code: String,
}

#[derive(Debug)]
pub struct CheckVerifyOutput {
    pub auth_status: AuthStatus,
    pub pair: CredentialPair,
}

pub struct CheckVerifyUseCase<R, V>
where
    R: AccountRepository,
    V: VerifyCodeRepository,
{
    pub repo: R,
    pub codes: V,
    pub jwt_secret: String,
}

impl<R, V> CheckVerifyUseCase<R, V>
where
    R: AccountRepository,
    V: VerifyCodeRepository,
{
    /// Confirm a submitted code and advance the account from New to
    /// CodeVerified when applicable. Confirming while already past New only
    /// marks the code confirmed; status never moves. The returned pair
    /// reflects the post-confirmation status.
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CheckVerifyInput,
    ) -> Result<CheckVerifyOutput, AccountsError> {
        let confirmed = self.codes.confirm(user_id, &input.code).await?;
        if confirmed == 0 {
            return Err(AccountsError::InvalidOrExpiredCode);
        }

        let mut account = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        if account.auth_status == AuthStatus::New {
            self.repo
                .update_status(user_id, AuthStatus::CodeVerified)
                .await?;
            account.auth_status = AuthStatus::CodeVerified;
        }

        let pair = issue_pair(&account, &self.jwt_secret)?;
        Ok(CheckVerifyOutput {
            auth_status: account.auth_status,
            pair,
        })
    }
}

// ── ResendCode ───────────────────────────────────────────────────────────────

pub struct ResendCodeUseCase<R, V, N>
where
    R: AccountRepository,
    V: VerifyCodeRepository,
    N: Notifier,
{
    pub repo: R,
    pub codes: V,
    pub notifier: N,
}

impl<R, V, N> ResendCodeUseCase<R, V, N>
where
    R: AccountRepository,
    V: VerifyCodeRepository,
    N: Notifier,
{
    /// Issue a fresh code for an account whose previous code expired.
    /// The throttle check runs before the channel check, so an email account
    /// with a still-active code reports `CodeStillValid`, not
    /// `UnsupportedChannel`. Email-channel resend is unsupported.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), AccountsError> {
        let account = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        if self.codes.has_active(user_id).await? {
            return Err(AccountsError::CodeStillValid);
        }

        if account.auth_type() != AuthType::ViaPhone {
            return Err(AccountsError::UnsupportedChannel);
        }

        let code = new_verify_code(user_id);
        if !self.codes.create_if_none_active(&code).await? {
            // Lost the race against a concurrent issue.
            return Err(AccountsError::CodeStillValid);
        }

        if let Err(e) = self.notifier.send(account.contact.as_str(), &code.code).await {
            tracing::warn!(error = %e, user_id = %user_id, "code delivery failed");
        }
        Ok(())
    }
}
