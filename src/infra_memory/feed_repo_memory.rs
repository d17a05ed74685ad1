use super::MemoryDb;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct MemoryFeedRepo {
    db: Arc<MemoryDb>,
}

impl MemoryFeedRepo {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        MemoryFeedRepo { db }
    }
}

#[async_trait::async_trait]
impl FeedRepo for MemoryFeedRepo {
    async fn append(&self, event: NewEvent) -> Result<Event, StoreError> {
        if !self.db.has_user(event.user_id) {
            return Err(StoreError::ForeignKey(format!(
                "event actor {} does not exist",
                event.user_id
            )));
        }
        let mut events = self.db.events.lock().await;
        let event_id = EventId(events.len() as i64 + 1);
        let stored = Event::stored(event_id, event);
        events.push(stored.clone());
        Ok(stored)
    }

    async fn feed_for(&self, user_id: UserId) -> Result<Vec<Event>, StoreError> {
        let events = self.db.events.lock().await;
        Ok(events
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }
}
