use super::util::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlFeedRepo {
    pool: MySqlPool,
    retry: RetryPolicy,
}

impl MySqlFeedRepo {
    pub fn new(pool: MySqlPool, retry: RetryPolicy) -> Self {
        MySqlFeedRepo { pool, retry }
    }

    fn row_to_event(r: &MySqlRow) -> Result<Event, StoreError> {
        let decode = |e: sqlx::Error| to_store_error("decode event", e);
        let event_type: String = r.try_get("event_type").map_err(decode)?;
        let operation: String = r.try_get("operation").map_err(decode)?;

        Ok(Event {
            event_id: r.try_get("event_id").map_err(decode)?,
            timestamp: r.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
            user_id: r.try_get("user_id").map_err(decode)?,
            event_type: event_type
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("event type: {e}")))?,
            operation: operation
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("event operation: {e}")))?,
            entity_id: r.try_get("entity_id").map_err(decode)?,
        })
    }
}

#[async_trait::async_trait]
impl FeedRepo for MySqlFeedRepo {
    async fn append(&self, event: NewEvent) -> Result<Event, StoreError> {
        let ev = &event;
        let res = with_write_retry(self.retry, "insert event", move || {
            sqlx::query(
                r#"
INSERT INTO feed_events (created_at, user_id, event_type, operation, entity_id)
VALUES (?, ?, ?, ?, ?)
"#,
            )
            .bind(ev.timestamp)
            .bind(ev.user_id)
            .bind(ev.event_type.to_string())
            .bind(ev.operation.to_string())
            .bind(ev.entity_id)
            .execute(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("insert event", e))?;

        Ok(Event::stored(EventId(res.last_insert_id() as i64), event))
    }

    async fn feed_for(&self, user_id: UserId) -> Result<Vec<Event>, StoreError> {
        let rows = with_retry(self.retry, "select feed", move || {
            sqlx::query(
                r#"
SELECT event_id, created_at, user_id, event_type, operation, entity_id
FROM feed_events
WHERE user_id = ?
ORDER BY event_id
"#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select feed", e))?;

        rows.iter().map(Self::row_to_event).collect()
    }
}
