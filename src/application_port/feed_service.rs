use crate::domain_model::*;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for FeedError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(e) => FeedError::StorageUnavailable(e),
            e => FeedError::Internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait FeedService: Send + Sync {
    /// Fire-and-forget. A failed append is logged, never returned.
    async fn record(
        &self,
        actor: UserId,
        event_type: EventType,
        operation: Operation,
        entity_id: i64,
    );
    async fn feed_for_user(&self, user_id: UserId) -> Result<Vec<Event>, FeedError>;
}
