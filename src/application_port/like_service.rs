use crate::domain_model::*;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum LikeError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("film {0} not found")]
    FilmNotFound(FilmId),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for LikeError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(e) => LikeError::StorageUnavailable(e),
            e => LikeError::Internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait LikeService: Send + Sync {
    async fn like_film(&self, film_id: FilmId, user_id: UserId) -> Result<(), LikeError>;
    async fn unlike_film(&self, film_id: FilmId, user_id: UserId) -> Result<(), LikeError>;
}
