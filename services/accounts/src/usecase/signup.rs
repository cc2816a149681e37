use orzu_domain::account::AuthStatus;
use uuid::Uuid;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, ContactIdentity};
use crate::error::AccountsError;
use crate::usecase::token::{CredentialPair, issue_pair};

pub struct SignUpInput {
    pub contact: String,
}

#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: Uuid,
    pub auth_status: AuthStatus,
    pub pair: CredentialPair,
}

pub struct SignUpUseCase<R: AccountRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: AccountRepository> SignUpUseCase<R> {
    /// Register a new account in `New` status. Does not issue a verification
    /// code — that is a separate, explicit step. The response carries a fresh
    /// credential pair so the client can reach the authenticated verify
    /// endpoint.
    pub async fn execute(&self, input: SignUpInput) -> Result<SignUpOutput, AccountsError> {
        let contact =
            ContactIdentity::parse(&input.contact).ok_or(AccountsError::ValidationFailed)?;

        let account = Account::new(contact);
        self.repo.create(&account).await?;

        let pair = issue_pair(&account, &self.jwt_secret)?;
        Ok(SignUpOutput {
            user_id: account.id,
            auth_status: account.auth_status,
            pair,
        })
    }
}
