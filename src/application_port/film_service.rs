use crate::domain_model::*;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum FilmError {
    #[error("film {0} not found")]
    FilmNotFound(FilmId),
    #[error("invalid film: {0}")]
    InvalidInput(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for FilmError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(e) => FilmError::StorageUnavailable(e),
            StoreError::ForeignKey(_) => {
                FilmError::InvalidInput("unknown genre or MPA rating".to_string())
            }
            e => FilmError::Internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait FilmService: Send + Sync {
    async fn create_film(&self, film: NewFilm) -> Result<Film, FilmError>;
    /// The film with its current likers.
    async fn get_film(&self, film_id: FilmId) -> Result<Film, FilmError>;
}
