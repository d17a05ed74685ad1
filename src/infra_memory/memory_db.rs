use crate::domain_model::*;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::Mutex;

/// Shared tables behind the in-memory repos.
#[derive(Default)]
pub struct MemoryDb {
    pub(super) users: DashMap<UserId, User>,
    pub(super) films: DashMap<FilmId, Film>,
    pub(super) likes: DashMap<UserId, BTreeSet<FilmId>>,
    pub(super) friendships: DashMap<UserPair, FriendshipState>,
    pub(super) events: Mutex<Vec<Event>>,
    last_user_id: AtomicI64,
    last_film_id: AtomicI64,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user: User) {
        self.last_user_id.fetch_max(user.id.0, Ordering::SeqCst);
        self.users.insert(user.id, user);
    }

    /// Likes on the record are ignored; the like table is the only source.
    pub fn insert_film(&self, mut film: Film) {
        film.likes.clear();
        self.last_film_id.fetch_max(film.id.0, Ordering::SeqCst);
        self.films.insert(film.id, film);
    }

    /// Ids continue after the highest one seeded so far.
    pub(super) fn next_user_id(&self) -> UserId {
        UserId(self.last_user_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub(super) fn next_film_id(&self) -> FilmId {
        FilmId(self.last_film_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub(super) fn has_user(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    pub(super) fn has_film(&self, film_id: FilmId) -> bool {
        self.films.contains_key(&film_id)
    }
}
