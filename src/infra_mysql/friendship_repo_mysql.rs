use super::util::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode, MySqlPool, Type};

impl<'r, DB: Database> Decode<'r, DB> for FriendshipState
where
    &'r str: Decode<'r, DB>,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<DB>>::decode(value)?;
        Ok(s.parse()?)
    }
}

impl<'q, DB: Database> Encode<'q, DB> for FriendshipState
where
    String: Encode<'q, DB>,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        self.to_string().encode_by_ref(buf)
    }
}

impl<DB: Database> Type<DB> for FriendshipState
where
    String: Type<DB>,
{
    fn type_info() -> <DB as Database>::TypeInfo {
        <String as Type<DB>>::type_info()
    }

    fn compatible(ty: &<DB as Database>::TypeInfo) -> bool {
        <String as Type<DB>>::compatible(ty)
    }
}

/// One row per unordered pair, keyed by `(user_min, user_max)`.
pub struct MySqlFriendshipRepo {
    pool: MySqlPool,
    retry: RetryPolicy,
}

impl MySqlFriendshipRepo {
    pub fn new(pool: MySqlPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    async fn insert(&self, pair: UserPair, state: FriendshipState) -> Result<bool, StoreError> {
        let res = with_write_retry(self.retry, "insert friendship", move || {
            sqlx::query(
                r#"
INSERT INTO friendship (user_min, user_max, status)
VALUES (?, ?, ?)
"#,
            )
            .bind(pair.min())
            .bind(pair.max())
            .bind(state)
            .execute(&self.pool)
        })
        .await;

        match res {
            Ok(_) => Ok(true),
            // someone else created the row first
            Err(e) if is_dup_key(&e) => Ok(false),
            Err(e) => Err(to_store_error("insert friendship", e)),
        }
    }

    async fn update(
        &self,
        pair: UserPair,
        expected: FriendshipState,
        next: FriendshipState,
    ) -> Result<bool, StoreError> {
        let res = with_write_retry(self.retry, "update friendship", move || {
            sqlx::query(
                r#"
UPDATE friendship
SET status = ?, updated_at = CURRENT_TIMESTAMP(3)
WHERE user_min = ? AND user_max = ? AND status = ?
"#,
            )
            .bind(next)
            .bind(pair.min())
            .bind(pair.max())
            .bind(expected)
            .execute(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("update friendship", e))?;

        Ok(res.rows_affected() == 1)
    }

    async fn delete(&self, pair: UserPair, expected: FriendshipState) -> Result<bool, StoreError> {
        let res = with_write_retry(self.retry, "delete friendship", move || {
            sqlx::query("DELETE FROM friendship WHERE user_min = ? AND user_max = ? AND status = ?")
                .bind(pair.min())
                .bind(pair.max())
                .bind(expected)
                .execute(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("delete friendship", e))?;

        Ok(res.rows_affected() == 1)
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MySqlFriendshipRepo {
    async fn get(&self, pair: UserPair) -> Result<Option<FriendshipState>, StoreError> {
        with_retry(self.retry, "select friendship", move || {
            sqlx::query_scalar::<_, FriendshipState>(
                "SELECT status FROM friendship WHERE user_min = ? AND user_max = ?",
            )
            .bind(pair.min())
            .bind(pair.max())
            .fetch_optional(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select friendship", e))
    }

    async fn compare_and_swap(
        &self,
        pair: UserPair,
        expected: Option<FriendshipState>,
        next: Option<FriendshipState>,
    ) -> Result<bool, StoreError> {
        match (expected, next) {
            (None, None) => Ok(self.get(pair).await?.is_none()),
            (None, Some(state)) => self.insert(pair, state).await,
            (Some(want), Some(state)) if want == state => Ok(self.get(pair).await? == Some(want)),
            (Some(want), Some(state)) => self.update(pair, want, state).await,
            (Some(want), None) => self.delete(pair, want).await,
        }
    }

    async fn list_confirmed(&self, user_id: UserId) -> Result<Vec<UserId>, StoreError> {
        with_retry(self.retry, "list confirmed friends", move || {
            sqlx::query_scalar::<_, UserId>(
                r#"
SELECT IF(user_min = ?, user_max, user_min) AS other_user
FROM friendship
WHERE status = 'confirmed'
  AND (user_min = ? OR user_max = ?)
ORDER BY other_user
"#,
            )
            .bind(user_id)
            .bind(user_id)
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("list confirmed friends", e))
    }
}
