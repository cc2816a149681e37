#![allow(async_fn_in_trait)]

use uuid::Uuid;

use orzu_domain::account::AuthStatus;

use crate::domain::types::{Account, ContactIdentity, VerifyCode};
use crate::error::AccountsError;

/// Repository for accounts. Contact-identity uniqueness is enforced here.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsError>;

    async fn find_by_contact(
        &self,
        contact: &ContactIdentity,
    ) -> Result<Option<Account>, AccountsError>;

    /// Insert a new account. Fails with `Conflict` when the contact identity
    /// is already registered.
    async fn create(&self, account: &Account) -> Result<(), AccountsError>;

    async fn update_status(&self, id: Uuid, status: AuthStatus) -> Result<(), AccountsError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AccountsError>;

    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        username: Option<&str>,
    ) -> Result<(), AccountsError>;

    async fn update_photo(&self, id: Uuid, photo: &str) -> Result<(), AccountsError>;
}

/// Repository for one-time verification codes.
pub trait VerifyCodeRepository: Send + Sync {
    /// Any unconfirmed, unexpired code for this user?
    async fn has_active(&self, user_id: Uuid) -> Result<bool, AccountsError>;

    /// Insert a new code under the single-active-code guard. Returns `false`
    /// (nothing inserted) when an active code already exists. The check and
    /// insert are serialized per user — concurrent callers cannot both
    /// succeed.
    async fn create_if_none_active(&self, code: &VerifyCode) -> Result<bool, AccountsError>;

    /// Mark every unconfirmed, unexpired code matching `code` as confirmed,
    /// returning the number of rows affected (0 = no valid match). Updating
    /// all matching rows tolerates duplicate issuance.
    async fn confirm(&self, user_id: Uuid, code: &str) -> Result<u64, AccountsError>;
}

/// Permanent denylist for refresh-token ids.
pub trait TokenDenylist: Send + Sync {
    /// Revoke a token id, keeping the entry for `ttl_secs` (the token's
    /// remaining lifetime). Returns `false` when the id was already revoked.
    /// Atomic per id: of two concurrent callers exactly one gets `true`.
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<bool, AccountsError>;
}

/// Out-of-band code delivery. Best-effort: callers log failures and carry on;
/// a delivery failure never rolls back code issuance.
pub trait Notifier: Send + Sync {
    async fn send(&self, destination: &str, code: &str) -> Result<(), AccountsError>;
}
