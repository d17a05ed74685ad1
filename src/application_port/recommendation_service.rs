use crate::domain_model::*;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for RecommendationError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(e) => RecommendationError::StorageUnavailable(e),
            e => RecommendationError::Internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    /// Films liked by the peer with the largest like overlap, minus the ones
    /// `user_id` already likes. Empty when nobody overlaps.
    async fn recommend(&self, user_id: UserId) -> Result<Vec<Film>, RecommendationError>;
}
