use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use uuid::Uuid;

use orzu_domain::account::AuthStatus;

use crate::domain::repository::{AccountRepository, Notifier, VerifyCodeRepository};
use crate::domain::types::{ContactIdentity, MIN_SECRET_LEN};
use crate::error::AccountsError;
use crate::usecase::token::{CredentialPair, issue_pair};
use crate::usecase::verify::new_verify_code;

/// Hash a secret with Argon2id default parameters, returning a PHC string.
pub fn hash_secret(secret: &str) -> Result<String, AccountsError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AccountsError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Verify a secret against a stored PHC string. Unparseable hashes verify
/// as false rather than erroring — a corrupt hash must not open the account.
pub fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}

// ── ForgotPassword ───────────────────────────────────────────────────────────

pub struct ForgotPasswordInput {
    pub identity: String,
}

#[derive(Debug)]
pub struct ForgotPasswordOutput {
    pub user_id: Uuid,
    pub auth_status: AuthStatus,
    pub pair: CredentialPair,
}

pub struct ForgotPasswordUseCase<R, V, N>
where
    R: AccountRepository,
    V: VerifyCodeRepository,
    N: Notifier,
{
    pub repo: R,
    pub codes: V,
    pub notifier: N,
    pub jwt_secret: String,
}

impl<R, V, N> ForgotPasswordUseCase<R, V, N>
where
    R: AccountRepository,
    V: VerifyCodeRepository,
    N: Notifier,
{
    /// Unauthenticated entry point. Issues a reset code for phone-classified
    /// identities only; email-classified identities get no code but still
    /// succeed. Either way the resolved account receives a fresh credential
    /// pair — reset initiation is gated solely by knowledge of the contact
    /// identity.
    pub async fn execute(
        &self,
        input: ForgotPasswordInput,
    ) -> Result<ForgotPasswordOutput, AccountsError> {
        let contact =
            ContactIdentity::parse(&input.identity).ok_or(AccountsError::ValidationFailed)?;

        let account = self
            .repo
            .find_by_contact(&contact)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        if let ContactIdentity::Phone(destination) = &contact {
            let code = new_verify_code(account.id);
            if !self.codes.create_if_none_active(&code).await? {
                return Err(AccountsError::CodeStillValid);
            }
            if let Err(e) = self.notifier.send(destination, &code.code).await {
                tracing::warn!(error = %e, user_id = %account.id, "code delivery failed");
            }
        }

        let pair = issue_pair(&account, &self.jwt_secret)?;
        Ok(ForgotPasswordOutput {
            user_id: account.id,
            auth_status: account.auth_status,
            pair,
        })
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub new_secret: String,
}

#[derive(Debug)]
pub struct ResetPasswordOutput {
    pub auth_status: AuthStatus,
    pub pair: CredentialPair,
}

pub struct ResetPasswordUseCase<R: AccountRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: AccountRepository> ResetPasswordUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: ResetPasswordInput,
    ) -> Result<ResetPasswordOutput, AccountsError> {
        if input.new_secret.len() < MIN_SECRET_LEN {
            return Err(AccountsError::ValidationFailed);
        }

        let hash = hash_secret(&input.new_secret)?;
        self.repo.update_password(user_id, &hash).await?;

        // Re-fetch after the write: the account may have been deleted
        // concurrently, and the fresh pair must reflect current status.
        let account = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        let pair = issue_pair(&account, &self.jwt_secret)?;
        Ok(ResetPasswordOutput {
            auth_status: account.auth_status,
            pair,
        })
    }
}
