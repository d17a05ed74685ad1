use super::util::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::{MySqlPool, Row};
use std::collections::{BTreeMap, BTreeSet};

pub struct MySqlLikeRepo {
    pool: MySqlPool,
    retry: RetryPolicy,
}

impl MySqlLikeRepo {
    pub fn new(pool: MySqlPool, retry: RetryPolicy) -> Self {
        MySqlLikeRepo { pool, retry }
    }
}

#[async_trait::async_trait]
impl LikeRepo for MySqlLikeRepo {
    async fn likes_of(&self, user_id: UserId) -> Result<BTreeSet<FilmId>, StoreError> {
        let films = with_retry(self.retry, "select likes of user", move || {
            sqlx::query_scalar::<_, FilmId>("SELECT film_id FROM likes WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select likes of user", e))?;

        Ok(films.into_iter().collect())
    }

    async fn likers_of(&self, film_id: FilmId) -> Result<BTreeSet<UserId>, StoreError> {
        let users = with_retry(self.retry, "select likers of film", move || {
            sqlx::query_scalar::<_, UserId>("SELECT user_id FROM likes WHERE film_id = ?")
                .bind(film_id)
                .fetch_all(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select likers of film", e))?;

        Ok(users.into_iter().collect())
    }

    async fn all_users_with_likes(&self) -> Result<Vec<(UserId, BTreeSet<FilmId>)>, StoreError> {
        let rows = with_retry(self.retry, "select all likes", move || {
            sqlx::query("SELECT user_id, film_id FROM likes ORDER BY user_id, film_id")
                .fetch_all(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select all likes", e))?;

        let mut by_user: BTreeMap<UserId, BTreeSet<FilmId>> = BTreeMap::new();
        for r in &rows {
            let user_id: UserId = r
                .try_get("user_id")
                .map_err(|e| to_store_error("decode like", e))?;
            let film_id: FilmId = r
                .try_get("film_id")
                .map_err(|e| to_store_error("decode like", e))?;
            by_user.entry(user_id).or_default().insert(film_id);
        }

        Ok(by_user.into_iter().collect())
    }

    async fn add_like(&self, user_id: UserId, film_id: FilmId) -> Result<bool, StoreError> {
        let res = with_write_retry(self.retry, "insert like", move || {
            sqlx::query("INSERT INTO likes (user_id, film_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(film_id)
                .execute(&self.pool)
        })
        .await;

        match res {
            Ok(_) => Ok(true),
            Err(e) if is_dup_key(&e) => Ok(false),
            Err(e) => Err(to_store_error("insert like", e)),
        }
    }

    async fn remove_like(&self, user_id: UserId, film_id: FilmId) -> Result<bool, StoreError> {
        let res = with_write_retry(self.retry, "delete like", move || {
            sqlx::query("DELETE FROM likes WHERE user_id = ? AND film_id = ?")
                .bind(user_id)
                .bind(film_id)
                .execute(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("delete like", e))?;

        Ok(res.rows_affected() > 0)
    }
}
