use super::util::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};

pub struct MySqlUserRepo {
    pool: MySqlPool,
    retry: RetryPolicy,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool, retry: RetryPolicy) -> Self {
        MySqlUserRepo { pool, retry }
    }

    fn row_to_user(r: &MySqlRow) -> Result<User, sqlx::Error> {
        Ok(User {
            id: r.try_get("user_id")?,
            email: r.try_get("email")?,
            login: r.try_get("login")?,
            name: r.try_get("name")?,
            birthday: r.try_get("birthday")?,
        })
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let new_user = &user;
        let res = with_write_retry(self.retry, "insert user", move || {
            sqlx::query("INSERT INTO users (email, login, name, birthday) VALUES (?, ?, ?, ?)")
                .bind(&new_user.email)
                .bind(&new_user.login)
                .bind(&new_user.name)
                .bind(new_user.birthday)
                .execute(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("insert user", e))?;

        Ok(user.stored(UserId(res.last_insert_id() as i64)))
    }

    async fn exists(&self, user_id: UserId) -> Result<bool, StoreError> {
        let count: i64 = with_retry(self.retry, "user exists", move || {
            sqlx::query_scalar("SELECT COUNT(1) FROM users WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("user exists", e))?;

        Ok(count > 0)
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        let row = with_retry(self.retry, "select user", move || {
            sqlx::query(
                "SELECT user_id, email, login, name, birthday FROM users WHERE user_id = ?",
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select user", e))?;

        row.as_ref()
            .map(Self::row_to_user)
            .transpose()
            .map_err(|e| to_store_error("decode user", e))
    }

    async fn get_many(&self, user_ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = with_retry(self.retry, "select users", move || async move {
            let mut qb = QueryBuilder::<MySql>::new(
                "SELECT user_id, email, login, name, birthday FROM users WHERE user_id IN (",
            );
            let mut ids = qb.separated(", ");
            for id in user_ids {
                ids.push_bind(*id);
            }
            ids.push_unseparated(") ORDER BY user_id");
            qb.build().fetch_all(&self.pool).await
        })
        .await
        .map_err(|e| to_store_error("select users", e))?;

        rows.iter()
            .map(Self::row_to_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| to_store_error("decode user", e))
    }
}
