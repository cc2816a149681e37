use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use orzu_auth_types::token::{TokenInfo, validate_access_token};

use crate::error::AccountsError;
use crate::infra::db::{DbAccountRepository, DbVerifyCodeRepository};
use crate::infra::denylist::RedisTokenDenylist;
use crate::infra::notify::TracingNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn verify_code_repo(&self) -> DbVerifyCodeRepository {
        DbVerifyCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_denylist(&self) -> RedisTokenDenylist {
        RedisTokenDenylist {
            pool: self.redis.clone(),
        }
    }

    pub fn notifier(&self) -> TracingNotifier {
        TracingNotifier
    }

    /// Validate a bearer access token, returning the caller's identity.
    pub fn authenticate(&self, token: &str) -> Result<TokenInfo, AccountsError> {
        validate_access_token(token, &self.jwt_secret).map_err(|_| AccountsError::Unauthorized)
    }
}
