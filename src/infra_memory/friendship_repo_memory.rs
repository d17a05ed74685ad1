use super::MemoryDb;
use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

pub struct MemoryFriendshipRepo {
    db: Arc<MemoryDb>,
}

impl MemoryFriendshipRepo {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        MemoryFriendshipRepo { db }
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MemoryFriendshipRepo {
    async fn get(&self, pair: UserPair) -> Result<Option<FriendshipState>, StoreError> {
        Ok(self.db.friendships.get(&pair).map(|s| *s.value()))
    }

    async fn compare_and_swap(
        &self,
        pair: UserPair,
        expected: Option<FriendshipState>,
        next: Option<FriendshipState>,
    ) -> Result<bool, StoreError> {
        if next.is_some() && !(self.db.has_user(pair.min()) && self.db.has_user(pair.max())) {
            return Err(StoreError::ForeignKey(format!(
                "friendship {pair} references a missing user"
            )));
        }

        // the entry holds the shard lock until it is dropped
        match (self.db.friendships.entry(pair), expected, next) {
            (Entry::Vacant(_), None, None) => Ok(true),
            (Entry::Vacant(vacant), None, Some(state)) => {
                vacant.insert(state);
                Ok(true)
            }
            (Entry::Occupied(mut occupied), Some(want), next) if *occupied.get() == want => {
                match next {
                    Some(state) => {
                        occupied.insert(state);
                    }
                    None => {
                        occupied.remove();
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_confirmed(&self, user_id: UserId) -> Result<Vec<UserId>, StoreError> {
        let mut friends: Vec<UserId> = self
            .db
            .friendships
            .iter()
            .filter(|entry| entry.key().contains(user_id) && entry.value().is_confirmed())
            .map(|entry| entry.key().other(user_id))
            .collect();
        friends.sort();
        Ok(friends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> User {
        User {
            id: UserId(id),
            email: format!("user{id}@example.com"),
            login: format!("user{id}"),
            name: format!("User {id}"),
            birthday: None,
        }
    }

    fn repo_with_users(ids: &[i64]) -> MemoryFriendshipRepo {
        let db = Arc::new(MemoryDb::new());
        for id in ids {
            db.insert_user(user(*id));
        }
        MemoryFriendshipRepo::new(db)
    }

    fn pair(a: i64, b: i64) -> UserPair {
        UserPair::new(UserId(a), UserId(b)).unwrap()
    }

    #[tokio::test]
    async fn swap_requires_expected_state() {
        let repo = repo_with_users(&[1, 2]);
        let p = pair(1, 2);

        assert!(repo
            .compare_and_swap(p, None, Some(FriendshipState::PendingForward))
            .await
            .unwrap());
        assert!(!repo
            .compare_and_swap(p, None, Some(FriendshipState::PendingReverse))
            .await
            .unwrap());
        assert!(!repo
            .compare_and_swap(
                p,
                Some(FriendshipState::PendingReverse),
                Some(FriendshipState::Confirmed)
            )
            .await
            .unwrap());
        assert_eq!(
            repo.get(p).await.unwrap(),
            Some(FriendshipState::PendingForward)
        );

        assert!(repo
            .compare_and_swap(p, Some(FriendshipState::PendingForward), None)
            .await
            .unwrap());
        assert_eq!(repo.get(p).await.unwrap(), None);
    }

    #[tokio::test]
    async fn swap_rejects_unknown_user() {
        let repo = repo_with_users(&[1]);
        let err = repo
            .compare_and_swap(pair(1, 2), None, Some(FriendshipState::PendingForward))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_have_one_winner() {
        let repo = Arc::new(repo_with_users(&[1, 2]));
        let p = pair(1, 2);

        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            let state = if i % 2 == 0 {
                FriendshipState::PendingForward
            } else {
                FriendshipState::PendingReverse
            };
            handles.push(tokio::spawn(async move {
                repo.compare_and_swap(p, None, Some(state)).await.unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn confirmed_lists_only_confirmed_counterparts() {
        let repo = repo_with_users(&[1, 2, 3, 4]);
        repo.compare_and_swap(pair(1, 2), None, Some(FriendshipState::Confirmed))
            .await
            .unwrap();
        repo.compare_and_swap(pair(1, 3), None, Some(FriendshipState::PendingForward))
            .await
            .unwrap();
        repo.compare_and_swap(pair(4, 1), None, Some(FriendshipState::Confirmed))
            .await
            .unwrap();

        assert_eq!(
            repo.list_confirmed(UserId(1)).await.unwrap(),
            vec![UserId(2), UserId(4)]
        );
        assert!(repo.list_confirmed(UserId(3)).await.unwrap().is_empty());
    }
}
