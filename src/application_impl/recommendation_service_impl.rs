use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use futures_util::future::try_join_all;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct RealRecommendationService {
    user_repo: Arc<dyn UserRepo>,
    like_repo: Arc<dyn LikeRepo>,
    film_repo: Arc<dyn FilmRepo>,
}

impl RealRecommendationService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        like_repo: Arc<dyn LikeRepo>,
        film_repo: Arc<dyn FilmRepo>,
    ) -> Self {
        Self {
            user_repo,
            like_repo,
            film_repo,
        }
    }

    async fn hydrate(&self, film_id: FilmId) -> Result<Option<Film>, StoreError> {
        let Some(mut film) = self.film_repo.get(film_id).await? else {
            warn!("recommended film {film_id} no longer exists, skipping");
            return Ok(None);
        };
        film.likes = self.like_repo.likers_of(film_id).await?.into_iter().collect();
        Ok(Some(film))
    }
}

/// Picks the peer sharing the most likes with `target` and returns what that
/// peer likes beyond `target`'s own set.
///
/// Peers are scanned in the order given; on equal overlap the first one wins.
/// Nothing is returned when no peer shares a single like.
pub fn best_peer_candidates(
    target: UserId,
    target_likes: &BTreeSet<FilmId>,
    peers: &[(UserId, BTreeSet<FilmId>)],
) -> BTreeSet<FilmId> {
    let mut best: Option<(usize, &BTreeSet<FilmId>)> = None;

    for (peer, likes) in peers {
        if *peer == target {
            continue;
        }
        let overlap = target_likes.intersection(likes).count();
        if overlap > best.map_or(0, |(count, _)| count) {
            best = Some((overlap, likes));
        }
    }

    match best {
        Some((_, likes)) => likes.difference(target_likes).copied().collect(),
        None => BTreeSet::new(),
    }
}

#[async_trait::async_trait]
impl RecommendationService for RealRecommendationService {
    async fn recommend(&self, user_id: UserId) -> Result<Vec<Film>, RecommendationError> {
        if !self.user_repo.exists(user_id).await? {
            return Err(RecommendationError::UserNotFound(user_id));
        }

        let target_likes = self.like_repo.likes_of(user_id).await?;
        if target_likes.is_empty() {
            debug!("user {user_id} has no likes, nothing to recommend");
            return Ok(Vec::new());
        }

        let mut peers = self.like_repo.all_users_with_likes().await?;
        peers.sort_by_key(|(peer, _)| *peer);

        let candidates = best_peer_candidates(user_id, &target_likes, &peers);
        info!("recommending {} films to user {user_id}", candidates.len());
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let films = try_join_all(candidates.into_iter().map(|film_id| self.hydrate(film_id))).await?;
        Ok(films.into_iter().flatten().collect())
    }
}
