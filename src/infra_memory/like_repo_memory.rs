use super::MemoryDb;
use crate::domain_model::*;
use crate::domain_port::*;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct MemoryLikeRepo {
    db: Arc<MemoryDb>,
}

impl MemoryLikeRepo {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        MemoryLikeRepo { db }
    }
}

#[async_trait::async_trait]
impl LikeRepo for MemoryLikeRepo {
    async fn likes_of(&self, user_id: UserId) -> Result<BTreeSet<FilmId>, StoreError> {
        Ok(self
            .db
            .likes
            .get(&user_id)
            .map(|films| films.value().clone())
            .unwrap_or_default())
    }

    async fn likers_of(&self, film_id: FilmId) -> Result<BTreeSet<UserId>, StoreError> {
        Ok(self
            .db
            .likes
            .iter()
            .filter(|entry| entry.value().contains(&film_id))
            .map(|entry| *entry.key())
            .collect())
    }

    async fn all_users_with_likes(&self) -> Result<Vec<(UserId, BTreeSet<FilmId>)>, StoreError> {
        let mut all: Vec<(UserId, BTreeSet<FilmId>)> = self
            .db
            .likes
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        all.sort_by_key(|(user_id, _)| *user_id);
        Ok(all)
    }

    async fn add_like(&self, user_id: UserId, film_id: FilmId) -> Result<bool, StoreError> {
        if !self.db.has_user(user_id) || !self.db.has_film(film_id) {
            return Err(StoreError::ForeignKey(format!(
                "like ({user_id}, {film_id}) references a missing row"
            )));
        }
        Ok(self.db.likes.entry(user_id).or_default().insert(film_id))
    }

    async fn remove_like(&self, user_id: UserId, film_id: FilmId) -> Result<bool, StoreError> {
        let removed = {
            match self.db.likes.get_mut(&user_id) {
                Some(mut films) => films.remove(&film_id),
                None => false,
            }
        };
        self.db.likes.remove_if(&user_id, |_, films| films.is_empty());
        Ok(removed)
    }
}
