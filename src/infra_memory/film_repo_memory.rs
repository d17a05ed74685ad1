use super::MemoryDb;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct MemoryFilmRepo {
    db: Arc<MemoryDb>,
}

impl MemoryFilmRepo {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        MemoryFilmRepo { db }
    }
}

#[async_trait::async_trait]
impl FilmRepo for MemoryFilmRepo {
    async fn insert(&self, mut film: NewFilm) -> Result<Film, StoreError> {
        film.genres.sort_by_key(|g| g.id);
        film.genres.dedup_by_key(|g| g.id);
        let film = film.stored(self.db.next_film_id());
        self.db.insert_film(film.clone());
        Ok(film)
    }

    async fn exists(&self, film_id: FilmId) -> Result<bool, StoreError> {
        Ok(self.db.has_film(film_id))
    }

    async fn get(&self, film_id: FilmId) -> Result<Option<Film>, StoreError> {
        Ok(self.db.films.get(&film_id).map(|f| f.value().clone()))
    }
}
