use crate::domain_model::*;
use crate::domain_port::StoreError;

#[async_trait::async_trait]
pub trait FilmRepo: Send + Sync {
    /// Stores `film` under a fresh id. Unknown genre or MPA ids fail with
    /// [`StoreError::ForeignKey`].
    async fn insert(&self, film: NewFilm) -> Result<Film, StoreError>;

    async fn exists(&self, film_id: FilmId) -> Result<bool, StoreError>;

    /// Genres and MPA are resolved, `likes` is left empty.
    async fn get(&self, film_id: FilmId) -> Result<Option<Film>, StoreError>;
}
