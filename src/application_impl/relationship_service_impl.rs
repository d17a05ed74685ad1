use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Upper bound on read/decide/swap rounds for a single pair mutation.
pub const MAX_CAS_ATTEMPTS: usize = 8;

pub struct RealRelationshipService {
    user_repo: Arc<dyn UserRepo>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    feed_service: Arc<dyn FeedService>,
}

impl RealRelationshipService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        friendship_repo: Arc<dyn FriendshipRepo>,
        feed_service: Arc<dyn FeedService>,
    ) -> Self {
        Self {
            user_repo,
            friendship_repo,
            feed_service,
        }
    }

    async fn ensure_user(&self, user_id: UserId) -> Result<(), RelationError> {
        if self.user_repo.exists(user_id).await? {
            Ok(())
        } else {
            Err(RelationError::UserNotFound(user_id))
        }
    }

    /// Runs `decide` against the current state of the pair and swaps in its
    /// answer. Returns whether the stored state changed.
    async fn mutate<F>(&self, me: UserId, other: UserId, decide: F) -> Result<bool, RelationError>
    where
        F: Fn(UserPair, UserId, Option<FriendshipState>) -> Transition + Send + Sync,
    {
        let pair = UserPair::new(me, other).ok_or(RelationError::InvalidPairing(me))?;
        self.ensure_user(me).await?;
        self.ensure_user(other).await?;

        let mut unavailable: Option<String> = None;
        for attempt in 1..=MAX_CAS_ATTEMPTS {
            let current = self.friendship_repo.get(pair).await?;
            let next = match decide(pair, me, current) {
                Transition::Unchanged => {
                    info!(%pair, ?current, "friendship unchanged");
                    return Ok(false);
                }
                Transition::Changed { next } => next,
            };

            match self
                .friendship_repo
                .compare_and_swap(pair, current, next)
                .await
            {
                Ok(true) => {
                    debug!(%pair, ?current, ?next, "friendship updated");
                    return Ok(true);
                }
                Ok(false) => {
                    unavailable = None;
                    debug!(%pair, attempt, "friendship changed concurrently, retrying");
                }
                Err(StoreError::Unavailable(e)) => {
                    // the swap may have landed before the failure was reported
                    warn!(%pair, attempt, "friendship write outcome unknown: {e}");
                    if self.friendship_repo.get(pair).await? == next {
                        info!(%pair, ?next, "friendship write was applied");
                        return Ok(true);
                    }
                    unavailable = Some(e);
                }
                Err(StoreError::ForeignKey(e)) => {
                    warn!(%pair, "friendship write rejected: {e}");
                    // a user vanished between the existence check and the write
                    self.ensure_user(me).await?;
                    return Err(RelationError::UserNotFound(other));
                }
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(e) = unavailable {
            return Err(RelationError::StorageUnavailable(e));
        }
        let message = format!(
            "pair {pair} changed on each of {MAX_CAS_ATTEMPTS} attempts"
        );
        error!("{message}");
        Err(RelationError::ConsistencyViolation(message))
    }

    async fn confirmed_friend_ids(&self, user_id: UserId) -> Result<BTreeSet<UserId>, RelationError> {
        self.ensure_user(user_id).await?;
        let ids = self.friendship_repo.list_confirmed(user_id).await?;
        Ok(ids.into_iter().collect())
    }
}

#[async_trait::async_trait]
impl RelationshipService for RealRelationshipService {
    async fn add_friend(&self, me: UserId, other: UserId) -> Result<(), RelationError> {
        info!("user {me} befriends {other}");
        if self.mutate(me, other, on_request).await? {
            self.feed_service
                .record(me, EventType::Friend, Operation::Add, other.0)
                .await;
        }
        Ok(())
    }

    async fn remove_friend(&self, me: UserId, other: UserId) -> Result<(), RelationError> {
        info!("user {me} unfriends {other}");
        if self.mutate(me, other, on_remove).await? {
            self.feed_service
                .record(me, EventType::Friend, Operation::Remove, other.0)
                .await;
        }
        Ok(())
    }

    async fn list_friends(&self, user_id: UserId) -> Result<Vec<User>, RelationError> {
        let ids: Vec<UserId> = self.confirmed_friend_ids(user_id).await?.into_iter().collect();
        let friends = self.user_repo.get_many(&ids).await?;
        debug!("user {user_id} has {} friends", friends.len());
        Ok(friends)
    }

    async fn list_common_friends(
        &self,
        user_id: UserId,
        other: UserId,
    ) -> Result<Vec<User>, RelationError> {
        let mine = self.confirmed_friend_ids(user_id).await?;
        let theirs = self.confirmed_friend_ids(other).await?;
        let common: Vec<UserId> = mine.intersection(&theirs).copied().collect();
        Ok(self.user_repo.get_many(&common).await?)
    }
}
