use crate::domain_model::*;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("user {0} cannot befriend themselves")]
    InvalidPairing(UserId),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for RelationError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(e) => RelationError::StorageUnavailable(e),
            StoreError::Corrupt(e) => RelationError::ConsistencyViolation(e),
            e @ (StoreError::ForeignKey(_) | StoreError::Other(_)) => {
                RelationError::Internal(e.to_string())
            }
        }
    }
}

#[async_trait::async_trait]
pub trait RelationshipService: Send + Sync {
    /// Sends a request, or confirms the one `other` already sent to `me`.
    async fn add_friend(&self, me: UserId, other: UserId) -> Result<(), RelationError>;
    /// Revokes a confirmation (leaving `other`'s request standing) or
    /// deletes a pending request.
    async fn remove_friend(&self, me: UserId, other: UserId) -> Result<(), RelationError>;
    async fn list_friends(&self, user_id: UserId) -> Result<Vec<User>, RelationError>;
    async fn list_common_friends(
        &self,
        user_id: UserId,
        other: UserId,
    ) -> Result<Vec<User>, RelationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_store_errors_are_unavailable() {
        assert!(matches!(
            RelationError::from(StoreError::Unavailable("timeout".into())),
            RelationError::StorageUnavailable(_)
        ));
        assert!(matches!(
            RelationError::from(StoreError::Other("syntax error".into())),
            RelationError::Internal(_)
        ));
        assert!(matches!(
            RelationError::from(StoreError::Corrupt("status".into())),
            RelationError::ConsistencyViolation(_)
        ));
    }
}
