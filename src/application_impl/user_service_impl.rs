use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use chrono::Utc;
use std::sync::Arc;

pub struct RealUserService {
    user_repo: Arc<dyn UserRepo>,
}

impl RealUserService {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> RealUserService {
        RealUserService { user_repo }
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    async fn create_user(&self, user: NewUser) -> Result<User, UserError> {
        let user = user
            .validated(Utc::now().date_naive())
            .map_err(UserError::InvalidInput)?;
        let user = self.user_repo.insert(user).await?;
        info!("created user {} ({})", user.id, user.login);
        Ok(user)
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, UserError> {
        self.user_repo
            .get(user_id)
            .await?
            .ok_or(UserError::UserNotFound(user_id))
    }
}
