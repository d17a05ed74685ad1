mod common;

use common::*;
use filmgraph::application_impl::*;
use filmgraph::application_port::*;
use filmgraph::domain_model::*;
use filmgraph::domain_port::*;
use filmgraph::infra_memory::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

const A: UserId = UserId(1);
const B: UserId = UserId(2);
const C: UserId = UserId(3);

async fn friend_events(server: &filmgraph::server::Server, user: UserId) -> Vec<Event> {
    server
        .feed_service
        .feed_for_user(user)
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.event_type == EventType::Friend)
        .collect()
}

#[tokio::test]
async fn mutual_requests_make_symmetric_friends() {
    let (_, server) = seeded_server(2, 0);
    let rel = &server.relationship_service;

    rel.add_friend(A, B).await.unwrap();
    rel.add_friend(B, A).await.unwrap();

    assert_eq!(ids(&rel.list_friends(A).await.unwrap()), vec![2]);
    assert_eq!(ids(&rel.list_friends(B).await.unwrap()), vec![1]);
}

#[tokio::test]
async fn one_sided_request_is_not_friendship() {
    let (_, server) = seeded_server(2, 0);
    let rel = &server.relationship_service;

    rel.add_friend(A, B).await.unwrap();

    assert!(rel.list_friends(B).await.unwrap().is_empty());
    assert!(rel.list_friends(A).await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_request_emits_one_event() {
    let (db, server) = seeded_server(2, 0);
    let rel = &server.relationship_service;

    rel.add_friend(A, B).await.unwrap();
    rel.add_friend(A, B).await.unwrap();

    let events = friend_events(&server, A).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, Operation::Add);
    assert_eq!(events[0].entity_id, 2);

    let repo = MemoryFriendshipRepo::new(db);
    let pair = UserPair::new(A, B).unwrap();
    assert_eq!(
        repo.get(pair).await.unwrap(),
        Some(FriendshipState::pending_from(pair, A))
    );
}

#[tokio::test]
async fn confirming_emits_event_for_the_confirmer() {
    let (_, server) = seeded_server(2, 0);
    let rel = &server.relationship_service;

    rel.add_friend(A, B).await.unwrap();
    rel.add_friend(B, A).await.unwrap();
    // already confirmed, nothing changes
    rel.add_friend(B, A).await.unwrap();

    assert_eq!(friend_events(&server, A).await.len(), 1);
    let confirmations = friend_events(&server, B).await;
    assert_eq!(confirmations.len(), 1);
    assert_eq!(confirmations[0].entity_id, 1);
}

#[tokio::test]
async fn unfriending_leaves_counterpart_request_standing() {
    let (db, server) = seeded_server(2, 0);
    let rel = &server.relationship_service;

    rel.add_friend(A, B).await.unwrap();
    rel.add_friend(B, A).await.unwrap();
    rel.remove_friend(A, B).await.unwrap();

    assert!(rel.list_friends(A).await.unwrap().is_empty());
    assert!(rel.list_friends(B).await.unwrap().is_empty());

    let repo = MemoryFriendshipRepo::new(db);
    let pair = UserPair::new(A, B).unwrap();
    let state = repo.get(pair).await.unwrap().unwrap();
    let edge = FriendshipEdge::from_state(pair, state);
    assert_eq!(edge.requester, B);
    assert_eq!(edge.recipient, A);
    assert!(!edge.confirmed);

    // accepting the standing request restores the friendship
    rel.add_friend(A, B).await.unwrap();
    assert_eq!(ids(&rel.list_friends(B).await.unwrap()), vec![1]);

    let removals: Vec<Event> = friend_events(&server, A)
        .await
        .into_iter()
        .filter(|e| e.operation == Operation::Remove)
        .collect();
    assert_eq!(removals.len(), 1);
}

#[tokio::test]
async fn removing_pending_request_deletes_it_from_either_side() {
    let (db, server) = seeded_server(3, 0);
    let rel = &server.relationship_service;
    let repo = MemoryFriendshipRepo::new(db);

    rel.add_friend(A, B).await.unwrap();
    rel.remove_friend(A, B).await.unwrap();
    assert_eq!(repo.get(UserPair::new(A, B).unwrap()).await.unwrap(), None);

    rel.add_friend(A, C).await.unwrap();
    rel.remove_friend(C, A).await.unwrap();
    assert_eq!(repo.get(UserPair::new(A, C).unwrap()).await.unwrap(), None);
}

#[tokio::test]
async fn removing_nothing_is_a_quiet_no_op() {
    let (_, server) = seeded_server(2, 0);

    server.relationship_service.remove_friend(A, B).await.unwrap();

    assert!(friend_events(&server, A).await.is_empty());
}

#[tokio::test]
async fn self_friendship_is_always_rejected() {
    let (_, server) = seeded_server(2, 0);
    let rel = &server.relationship_service;

    let err = rel.add_friend(A, A).await.unwrap_err();
    assert!(matches!(err, RelationError::InvalidPairing(UserId(1))));

    rel.add_friend(A, B).await.unwrap();
    rel.add_friend(B, A).await.unwrap();
    assert!(matches!(
        rel.add_friend(A, A).await,
        Err(RelationError::InvalidPairing(_))
    ));
    assert!(matches!(
        rel.remove_friend(B, B).await,
        Err(RelationError::InvalidPairing(_))
    ));
}

#[tokio::test]
async fn unknown_users_are_reported_without_mutation() {
    let (db, server) = seeded_server(2, 0);
    let rel = &server.relationship_service;

    let err = rel.add_friend(A, UserId(99)).await.unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound(UserId(99))));
    let err = rel.add_friend(UserId(98), A).await.unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound(UserId(98))));
    let err = rel.remove_friend(A, UserId(99)).await.unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound(UserId(99))));
    let err = rel.list_friends(UserId(99)).await.unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound(UserId(99))));
    let err = rel.list_common_friends(A, UserId(99)).await.unwrap_err();
    assert!(matches!(err, RelationError::UserNotFound(UserId(99))));

    let repo = MemoryFriendshipRepo::new(db);
    assert!(repo.list_confirmed(A).await.unwrap().is_empty());
    assert!(friend_events(&server, A).await.is_empty());
}

#[tokio::test]
async fn common_friends_are_sorted_and_commutative() {
    let (_, server) = seeded_server(5, 0);
    let rel = &server.relationship_service;

    let befriend = |a: i64, b: i64| {
        let rel = rel.clone();
        async move {
            rel.add_friend(UserId(a), UserId(b)).await.unwrap();
            rel.add_friend(UserId(b), UserId(a)).await.unwrap();
        }
    };
    befriend(1, 5).await;
    befriend(1, 3).await;
    befriend(2, 3).await;
    befriend(2, 5).await;
    befriend(1, 4).await;
    // pending only, never common
    rel.add_friend(UserId(2), UserId(4)).await.unwrap();

    let ab = rel.list_common_friends(A, B).await.unwrap();
    let ba = rel.list_common_friends(B, A).await.unwrap();
    assert_eq!(ids(&ab), vec![3, 5]);
    assert_eq!(ab, ba);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_crossed_requests_end_confirmed() {
    for _ in 0..20 {
        let (db, server) = seeded_server(2, 0);
        let rel = server.relationship_service.clone();

        let left = {
            let rel = rel.clone();
            tokio::spawn(async move { rel.add_friend(A, B).await })
        };
        let right = {
            let rel = rel.clone();
            tokio::spawn(async move { rel.add_friend(B, A).await })
        };
        left.await.unwrap().unwrap();
        right.await.unwrap().unwrap();

        let repo = MemoryFriendshipRepo::new(db);
        assert_eq!(
            repo.get(UserPair::new(A, B).unwrap()).await.unwrap(),
            Some(FriendshipState::Confirmed)
        );
    }
}

struct UnreachableFeedRepo;

#[async_trait::async_trait]
impl FeedRepo for UnreachableFeedRepo {
    async fn append(&self, _event: NewEvent) -> Result<Event, StoreError> {
        Err(StoreError::Unavailable("feed is down".to_string()))
    }

    async fn feed_for(&self, _user_id: UserId) -> Result<Vec<Event>, StoreError> {
        Err(StoreError::Unavailable("feed is down".to_string()))
    }
}

#[tokio::test]
async fn feed_failure_does_not_undo_friendship() {
    let db = seeded_db(2, 0);
    let user_repo: Arc<dyn UserRepo> = Arc::new(MemoryUserRepo::new(db.clone()));
    let feed: Arc<dyn FeedService> = Arc::new(RealFeedService::new(
        user_repo.clone(),
        Arc::new(UnreachableFeedRepo),
    ));
    let rel = RealRelationshipService::new(
        user_repo,
        Arc::new(MemoryFriendshipRepo::new(db)),
        feed,
    );

    rel.add_friend(A, B).await.unwrap();
    rel.add_friend(B, A).await.unwrap();

    assert_eq!(ids(&rel.list_friends(A).await.unwrap()), vec![2]);
}

/// Every swap loses, as if another writer always got there first.
struct ContendedFriendshipRepo;

#[async_trait::async_trait]
impl FriendshipRepo for ContendedFriendshipRepo {
    async fn get(&self, _pair: UserPair) -> Result<Option<FriendshipState>, StoreError> {
        Ok(None)
    }

    async fn compare_and_swap(
        &self,
        _pair: UserPair,
        _expected: Option<FriendshipState>,
        _next: Option<FriendshipState>,
    ) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn list_confirmed(&self, _user_id: UserId) -> Result<Vec<UserId>, StoreError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn endless_contention_is_surfaced() {
    let db = seeded_db(2, 0);
    let user_repo: Arc<dyn UserRepo> = Arc::new(MemoryUserRepo::new(db.clone()));
    let feed: Arc<dyn FeedService> = Arc::new(RealFeedService::new(
        user_repo.clone(),
        Arc::new(MemoryFeedRepo::new(db)),
    ));
    let rel = RealRelationshipService::new(user_repo, Arc::new(ContendedFriendshipRepo), feed.clone());

    let err = rel.add_friend(A, B).await.unwrap_err();
    assert!(matches!(err, RelationError::ConsistencyViolation(_)));
    assert!(feed.feed_for_user(A).await.unwrap().is_empty());
}

/// Fails the next `failures` swaps with `Unavailable`. With `commit_first`
/// the swap is applied before the failure is reported, as when a connection
/// drops after the server committed.
struct FlakyFriendshipRepo {
    inner: MemoryFriendshipRepo,
    failures: AtomicU32,
    commit_first: bool,
}

impl FlakyFriendshipRepo {
    fn new(db: Arc<MemoryDb>, failures: u32, commit_first: bool) -> Self {
        FlakyFriendshipRepo {
            inner: MemoryFriendshipRepo::new(db),
            failures: AtomicU32::new(failures),
            commit_first,
        }
    }

    fn take_failure(&self) -> bool {
        self.failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for FlakyFriendshipRepo {
    async fn get(&self, pair: UserPair) -> Result<Option<FriendshipState>, StoreError> {
        self.inner.get(pair).await
    }

    async fn compare_and_swap(
        &self,
        pair: UserPair,
        expected: Option<FriendshipState>,
        next: Option<FriendshipState>,
    ) -> Result<bool, StoreError> {
        if !self.take_failure() {
            return self.inner.compare_and_swap(pair, expected, next).await;
        }
        if self.commit_first {
            self.inner.compare_and_swap(pair, expected, next).await?;
        }
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    async fn list_confirmed(&self, user_id: UserId) -> Result<Vec<UserId>, StoreError> {
        self.inner.list_confirmed(user_id).await
    }
}

fn flaky_service(
    failures: u32,
    commit_first: bool,
) -> (RealRelationshipService, Arc<FlakyFriendshipRepo>, Arc<dyn FeedService>) {
    let db = seeded_db(2, 0);
    let user_repo: Arc<dyn UserRepo> = Arc::new(MemoryUserRepo::new(db.clone()));
    let feed: Arc<dyn FeedService> = Arc::new(RealFeedService::new(
        user_repo.clone(),
        Arc::new(MemoryFeedRepo::new(db.clone())),
    ));
    let repo = Arc::new(FlakyFriendshipRepo::new(db, failures, commit_first));
    let rel = RealRelationshipService::new(user_repo, repo.clone(), feed.clone());
    (rel, repo, feed)
}

#[tokio::test]
async fn write_committed_before_failure_is_recorded_once() {
    let (rel, repo, feed) = flaky_service(1, true);

    rel.add_friend(A, B).await.unwrap();

    let pair = UserPair::new(A, B).unwrap();
    assert!(repo.get(pair).await.unwrap().is_some());
    let events = feed.feed_for_user(A).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, Operation::Add);
    assert_eq!(events[0].entity_id, 2);
}

#[tokio::test]
async fn write_lost_before_commit_is_retried() {
    let (rel, repo, feed) = flaky_service(1, false);

    rel.add_friend(A, B).await.unwrap();

    let pair = UserPair::new(A, B).unwrap();
    assert!(repo.get(pair).await.unwrap().is_some());
    assert_eq!(feed.feed_for_user(A).await.unwrap().len(), 1);
}

#[tokio::test]
async fn storage_that_stays_down_is_reported() {
    let (rel, repo, feed) = flaky_service(u32::MAX, false);

    let err = rel.add_friend(A, B).await.unwrap_err();
    assert!(matches!(err, RelationError::StorageUnavailable(_)));

    let pair = UserPair::new(A, B).unwrap();
    assert_eq!(repo.get(pair).await.unwrap(), None);
    assert!(feed.feed_for_user(A).await.unwrap().is_empty());
}
