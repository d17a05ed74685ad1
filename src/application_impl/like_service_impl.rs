use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealLikeService {
    user_repo: Arc<dyn UserRepo>,
    film_repo: Arc<dyn FilmRepo>,
    like_repo: Arc<dyn LikeRepo>,
    feed_service: Arc<dyn FeedService>,
}

impl RealLikeService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        film_repo: Arc<dyn FilmRepo>,
        like_repo: Arc<dyn LikeRepo>,
        feed_service: Arc<dyn FeedService>,
    ) -> Self {
        Self {
            user_repo,
            film_repo,
            like_repo,
            feed_service,
        }
    }

    async fn ensure_exists(&self, film_id: FilmId, user_id: UserId) -> Result<(), LikeError> {
        if !self.user_repo.exists(user_id).await? {
            return Err(LikeError::UserNotFound(user_id));
        }
        if !self.film_repo.exists(film_id).await? {
            return Err(LikeError::FilmNotFound(film_id));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl LikeService for RealLikeService {
    async fn like_film(&self, film_id: FilmId, user_id: UserId) -> Result<(), LikeError> {
        self.ensure_exists(film_id, user_id).await?;
        let added = match self.like_repo.add_like(user_id, film_id).await {
            Ok(added) => added,
            Err(StoreError::ForeignKey(e)) => {
                warn!("like of film {film_id} by user {user_id} rejected: {e}");
                // the user or the film vanished after the existence check
                self.ensure_exists(film_id, user_id).await?;
                return Err(LikeError::Internal(e));
            }
            Err(e) => return Err(e.into()),
        };
        if added {
            info!("user {user_id} likes film {film_id}");
            self.feed_service
                .record(user_id, EventType::Like, Operation::Add, film_id.0)
                .await;
        } else {
            info!("user {user_id} already likes film {film_id}");
        }
        Ok(())
    }

    async fn unlike_film(&self, film_id: FilmId, user_id: UserId) -> Result<(), LikeError> {
        self.ensure_exists(film_id, user_id).await?;
        if self.like_repo.remove_like(user_id, film_id).await? {
            info!("user {user_id} no longer likes film {film_id}");
            self.feed_service
                .record(user_id, EventType::Like, Operation::Remove, film_id.0)
                .await;
        }
        Ok(())
    }
}
