use crate::domain_model::*;
use crate::domain_port::StoreError;
use std::collections::BTreeSet;

#[async_trait::async_trait]
pub trait LikeRepo: Send + Sync {
    async fn likes_of(&self, user_id: UserId) -> Result<BTreeSet<FilmId>, StoreError>;

    async fn likers_of(&self, film_id: FilmId) -> Result<BTreeSet<UserId>, StoreError>;

    /// Every user with at least one like, sorted by user id ascending.
    async fn all_users_with_likes(&self) -> Result<Vec<(UserId, BTreeSet<FilmId>)>, StoreError>;

    /// Returns `true` if the like was not there before.
    async fn add_like(&self, user_id: UserId, film_id: FilmId) -> Result<bool, StoreError>;

    /// Returns `true` if a like was deleted.
    async fn remove_like(&self, user_id: UserId, film_id: FilmId) -> Result<bool, StoreError>;
}
