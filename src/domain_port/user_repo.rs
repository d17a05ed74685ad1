use crate::domain_model::*;
use crate::domain_port::StoreError;

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Stores `user` under a fresh id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn exists(&self, user_id: UserId) -> Result<bool, StoreError>;

    async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError>;

    /// Unknown ids are skipped. Sorted by id ascending.
    async fn get_many(&self, user_ids: &[UserId]) -> Result<Vec<User>, StoreError>;
}
