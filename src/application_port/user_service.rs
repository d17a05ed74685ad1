use crate::domain_model::*;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("invalid user: {0}")]
    InvalidInput(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for UserError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(e) => UserError::StorageUnavailable(e),
            e => UserError::Internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserError>;
    async fn get_user(&self, user_id: UserId) -> Result<User, UserError>;
}
