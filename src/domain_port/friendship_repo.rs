use crate::domain_model::*;
use crate::domain_port::StoreError;

#[async_trait::async_trait]
pub trait FriendshipRepo: Send + Sync {
    async fn get(&self, pair: UserPair) -> Result<Option<FriendshipState>, StoreError>;

    /// Atomically replaces the state of `pair` with `next` if it is still
    /// `expected`. `None` means no row. Returns `false` when the stored state
    /// differs from `expected`; nothing is written in that case.
    ///
    /// Writes referencing an unknown user fail with [`StoreError::ForeignKey`].
    /// [`StoreError::Unavailable`] leaves the outcome unknown: the swap may
    /// have been applied.
    async fn compare_and_swap(
        &self,
        pair: UserPair,
        expected: Option<FriendshipState>,
        next: Option<FriendshipState>,
    ) -> Result<bool, StoreError>;

    /// Counterparts of every confirmed pair containing `user_id`.
    async fn list_confirmed(&self, user_id: UserId) -> Result<Vec<UserId>, StoreError>;
}
