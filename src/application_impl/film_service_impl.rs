use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealFilmService {
    film_repo: Arc<dyn FilmRepo>,
    like_repo: Arc<dyn LikeRepo>,
}

impl RealFilmService {
    pub fn new(film_repo: Arc<dyn FilmRepo>, like_repo: Arc<dyn LikeRepo>) -> RealFilmService {
        RealFilmService {
            film_repo,
            like_repo,
        }
    }
}

#[async_trait::async_trait]
impl FilmService for RealFilmService {
    async fn create_film(&self, film: NewFilm) -> Result<Film, FilmError> {
        film.validate().map_err(FilmError::InvalidInput)?;
        let film = self.film_repo.insert(film).await?;
        info!("created film {} ({})", film.id, film.name);
        Ok(film)
    }

    async fn get_film(&self, film_id: FilmId) -> Result<Film, FilmError> {
        let mut film = self
            .film_repo
            .get(film_id)
            .await?
            .ok_or(FilmError::FilmNotFound(film_id))?;
        film.likes = self.like_repo.likers_of(film_id).await?.into_iter().collect();
        Ok(film)
    }
}
