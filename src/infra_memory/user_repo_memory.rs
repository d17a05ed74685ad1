use super::MemoryDb;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct MemoryUserRepo {
    db: Arc<MemoryDb>,
}

impl MemoryUserRepo {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        MemoryUserRepo { db }
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.stored(self.db.next_user_id());
        self.db.insert_user(user.clone());
        Ok(user)
    }

    async fn exists(&self, user_id: UserId) -> Result<bool, StoreError> {
        Ok(self.db.has_user(user_id))
    }

    async fn get(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.db.users.get(&user_id).map(|u| u.value().clone()))
    }

    async fn get_many(&self, user_ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = user_ids
            .iter()
            .filter_map(|id| self.db.users.get(id).map(|u| u.value().clone()))
            .collect();
        users.sort_by_key(|u| u.id);
        users.dedup_by_key(|u| u.id);
        Ok(users)
    }
}
