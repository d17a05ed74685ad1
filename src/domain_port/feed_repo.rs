use crate::domain_model::*;
use crate::domain_port::StoreError;

#[async_trait::async_trait]
pub trait FeedRepo: Send + Sync {
    async fn append(&self, event: NewEvent) -> Result<Event, StoreError>;

    /// Events emitted by `user_id`, oldest first.
    async fn feed_for(&self, user_id: UserId) -> Result<Vec<Event>, StoreError>;
}
