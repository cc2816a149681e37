use uuid::Uuid;

use orzu_domain::account::AuthStatus;

use crate::domain::repository::AccountRepository;
use crate::domain::types::Account;
use crate::error::AccountsError;

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> GetAccountUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Account, AccountsError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug)]
pub struct UpdateProfileOutput {
    pub auth_status: AuthStatus,
}

pub struct UpdateProfileUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> UpdateProfileUseCase<R> {
    /// Pass-through profile update. The response echoes the auth status;
    /// advancing to `Done` is profile-completion logic outside this service.
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<UpdateProfileOutput, AccountsError> {
        if input.first_name.is_none() && input.last_name.is_none() && input.username.is_none() {
            return Err(AccountsError::ValidationFailed);
        }

        self.repo
            .update_profile(
                user_id,
                input.first_name.as_deref(),
                input.last_name.as_deref(),
                input.username.as_deref(),
            )
            .await?;

        let account = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        Ok(UpdateProfileOutput {
            auth_status: account.auth_status,
        })
    }
}

// ── UpdatePhoto ──────────────────────────────────────────────────────────────

pub struct UpdatePhotoUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> UpdatePhotoUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, photo: String) -> Result<(), AccountsError> {
        if photo.is_empty() {
            return Err(AccountsError::ValidationFailed);
        }
        self.repo.update_photo(user_id, &photo).await
    }
}
