use deadpool_redis::Pool;

use crate::domain::repository::TokenDenylist;
use crate::error::AccountsError;

#[derive(Clone)]
pub struct RedisTokenDenylist {
    pub pool: Pool,
}

fn revoked_key(jti: &str) -> String {
    format!("revoked_jti:{jti}")
}

impl TokenDenylist for RedisTokenDenylist {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<bool, AccountsError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AccountsError::StoreUnavailable(e.into()))?;
        // SET NX: the first revocation wins; an existing entry means the
        // token id was already revoked. The TTL matches the token's remaining
        // lifetime, after which the exp check alone rejects it.
        let set: Option<String> = deadpool_redis::redis::cmd("SET")
            .arg(revoked_key(jti))
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(|e| AccountsError::StoreUnavailable(e.into()))?;
        Ok(set.is_some())
    }
}
