use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealFeedService {
    user_repo: Arc<dyn UserRepo>,
    feed_repo: Arc<dyn FeedRepo>,
}

impl RealFeedService {
    pub fn new(user_repo: Arc<dyn UserRepo>, feed_repo: Arc<dyn FeedRepo>) -> Self {
        Self {
            user_repo,
            feed_repo,
        }
    }
}

#[async_trait::async_trait]
impl FeedService for RealFeedService {
    async fn record(
        &self,
        actor: UserId,
        event_type: EventType,
        operation: Operation,
        entity_id: i64,
    ) {
        let event = NewEvent::new(actor, event_type, operation, entity_id);
        match self.feed_repo.append(event).await {
            Ok(stored) => debug!(?stored, "feed event appended"),
            // the mutation that triggered the event stands regardless
            Err(e) => warn!("append {event_type} {operation} event for user {actor}: {e}"),
        }
    }

    async fn feed_for_user(&self, user_id: UserId) -> Result<Vec<Event>, FeedError> {
        if !self.user_repo.exists(user_id).await? {
            return Err(FeedError::UserNotFound(user_id));
        }
        let events = self.feed_repo.feed_for(user_id).await?;
        debug!("feed of user {user_id} holds {} events", events.len());
        Ok(events)
    }
}
