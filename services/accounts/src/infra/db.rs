use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, SqlErr, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use orzu_accounts_schema::{users, verify_codes};
use orzu_domain::account::{AuthStatus, AuthType};

use crate::domain::repository::{AccountRepository, VerifyCodeRepository};
use crate::domain::types::{Account, ContactIdentity, VerifyCode};
use crate::error::AccountsError;

/// Transient store failure — surfaced as `StoreUnavailable` for retry.
fn store_err(e: impl std::error::Error + Send + Sync + 'static, op: &'static str) -> AccountsError {
    AccountsError::StoreUnavailable(anyhow::Error::new(e).context(op))
}

// ── Account repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| store_err(e, "find account by id"))?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_contact(
        &self,
        contact: &ContactIdentity,
    ) -> Result<Option<Account>, AccountsError> {
        let query = match contact {
            ContactIdentity::Email(email) => {
                users::Entity::find().filter(users::Column::Email.eq(email))
            }
            ContactIdentity::Phone(phone) => {
                users::Entity::find().filter(users::Column::Phone.eq(phone))
            }
        };
        let model = query
            .one(&self.db)
            .await
            .map_err(|e| store_err(e, "find account by contact"))?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &Account) -> Result<(), AccountsError> {
        let (email, phone) = match &account.contact {
            ContactIdentity::Email(email) => (Some(email.clone()), None),
            ContactIdentity::Phone(phone) => (None, Some(phone.clone())),
        };
        users::ActiveModel {
            id: Set(account.id),
            email: Set(email),
            phone: Set(phone),
            auth_type: Set(account.auth_type().as_i16()),
            auth_status: Set(account.auth_status.as_i16()),
            password_hash: Set(account.password_hash.clone()),
            first_name: Set(account.first_name.clone()),
            last_name: Set(account.last_name.clone()),
            username: Set(account.username.clone()),
            photo: Set(account.photo.clone()),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AccountsError::Conflict,
            _ => store_err(e, "create account"),
        })?;
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: AuthStatus) -> Result<(), AccountsError> {
        users::ActiveModel {
            id: Set(id),
            auth_status: Set(status.as_i16()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_err(e, "update auth status"))?;
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AccountsError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(Some(password_hash.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_err(e, "update password"))?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        username: Option<&str>,
    ) -> Result<(), AccountsError> {
        let mut model = users::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            model.first_name = Set(Some(first_name.to_owned()));
        }
        if let Some(last_name) = last_name {
            model.last_name = Set(Some(last_name.to_owned()));
        }
        if let Some(username) = username {
            model.username = Set(Some(username.to_owned()));
        }
        model
            .update(&self.db)
            .await
            .map_err(|e| update_err(e, "update profile"))?;
        Ok(())
    }

    async fn update_photo(&self, id: Uuid, photo: &str) -> Result<(), AccountsError> {
        users::ActiveModel {
            id: Set(id),
            photo: Set(Some(photo.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| update_err(e, "update photo"))?;
        Ok(())
    }
}

/// Updates against a deleted account surface as `UserNotFound`, not a 5xx.
fn update_err(e: DbErr, op: &'static str) -> AccountsError {
    match e {
        DbErr::RecordNotUpdated => AccountsError::UserNotFound,
        e => store_err(e, op),
    }
}

fn account_from_model(model: users::Model) -> Result<Account, AccountsError> {
    let contact = match (AuthType::from_i16(model.auth_type), model.email, model.phone) {
        (Some(AuthType::ViaEmail), Some(email), _) => ContactIdentity::Email(email),
        (Some(AuthType::ViaPhone), _, Some(phone)) => ContactIdentity::Phone(phone),
        _ => {
            return Err(AccountsError::Internal(anyhow::anyhow!(
                "corrupt contact identity for user {}",
                model.id
            )));
        }
    };
    let auth_status = AuthStatus::from_i16(model.auth_status).ok_or_else(|| {
        anyhow::anyhow!("unknown auth_status {} for user {}", model.auth_status, model.id)
    })?;
    Ok(Account {
        id: model.id,
        contact,
        auth_status,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        username: model.username,
        photo: model.photo,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── VerifyCode repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerifyCodeRepository {
    pub db: DatabaseConnection,
}

impl VerifyCodeRepository for DbVerifyCodeRepository {
    async fn has_active(&self, user_id: Uuid) -> Result<bool, AccountsError> {
        let now = Utc::now();
        let count = verify_codes::Entity::find()
            .filter(verify_codes::Column::UserId.eq(user_id))
            .filter(verify_codes::Column::IsConfirmed.eq(false))
            .filter(verify_codes::Column::ExpiresAt.gte(now))
            .count(&self.db)
            .await
            .map_err(|e| store_err(e, "count active verify codes"))?;
        Ok(count > 0)
    }

    async fn create_if_none_active(&self, code: &VerifyCode) -> Result<bool, AccountsError> {
        let created = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let code = code.clone();
                Box::pin(async move {
                    // Exclusive lock on the owning user row serializes
                    // concurrent issuance; a bare check-then-insert races.
                    users::Entity::find_by_id(code.user_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?;

                    let now = Utc::now();
                    let active = verify_codes::Entity::find()
                        .filter(verify_codes::Column::UserId.eq(code.user_id))
                        .filter(verify_codes::Column::IsConfirmed.eq(false))
                        .filter(verify_codes::Column::ExpiresAt.gte(now))
                        .count(txn)
                        .await?;
                    if active > 0 {
                        return Ok(false);
                    }

                    verify_codes::ActiveModel {
                        id: Set(code.id),
                        user_id: Set(code.user_id),
                        code: Set(code.code.clone()),
                        expires_at: Set(code.expires_at),
                        is_confirmed: Set(false),
                        created_at: Set(code.created_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .map_err(|e| store_err(e, "create verify code"))?;
        Ok(created)
    }

    async fn confirm(&self, user_id: Uuid, code: &str) -> Result<u64, AccountsError> {
        let now = Utc::now();
        let result = verify_codes::Entity::update_many()
            .col_expr(verify_codes::Column::IsConfirmed, Expr::value(true))
            .filter(verify_codes::Column::UserId.eq(user_id))
            .filter(verify_codes::Column::Code.eq(code))
            .filter(verify_codes::Column::IsConfirmed.eq(false))
            .filter(verify_codes::Column::ExpiresAt.gte(now))
            .exec(&self.db)
            .await
            .map_err(|e| store_err(e, "confirm verify code"))?;
        Ok(result.rows_affected)
    }
}
