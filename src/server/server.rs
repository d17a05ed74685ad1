use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Storage collaborators the services are built from.
pub struct Repos {
    pub user_repo: Arc<dyn UserRepo>,
    pub like_repo: Arc<dyn LikeRepo>,
    pub film_repo: Arc<dyn FilmRepo>,
    pub friendship_repo: Arc<dyn FriendshipRepo>,
    pub feed_repo: Arc<dyn FeedRepo>,
}

impl Repos {
    pub fn memory(db: Arc<MemoryDb>) -> Self {
        Repos {
            user_repo: Arc::new(MemoryUserRepo::new(db.clone())),
            like_repo: Arc::new(MemoryLikeRepo::new(db.clone())),
            film_repo: Arc::new(MemoryFilmRepo::new(db.clone())),
            friendship_repo: Arc::new(MemoryFriendshipRepo::new(db.clone())),
            feed_repo: Arc::new(MemoryFeedRepo::new(db)),
        }
    }

    pub fn mysql(pool: MySqlPool, retry: RetryPolicy) -> Self {
        Repos {
            user_repo: Arc::new(MySqlUserRepo::new(pool.clone(), retry)),
            like_repo: Arc::new(MySqlLikeRepo::new(pool.clone(), retry)),
            film_repo: Arc::new(MySqlFilmRepo::new(pool.clone(), retry)),
            friendship_repo: Arc::new(MySqlFriendshipRepo::new(pool.clone(), retry)),
            feed_repo: Arc::new(MySqlFeedRepo::new(pool, retry)),
        }
    }
}

pub struct Server {
    pub user_service: Arc<dyn UserService>,
    pub film_service: Arc<dyn FilmService>,
    pub relationship_service: Arc<dyn RelationshipService>,
    pub recommendation_service: Arc<dyn RecommendationService>,
    pub feed_service: Arc<dyn FeedService>,
    pub like_service: Arc<dyn LikeService>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let storage = &settings.storage;
        let server = match storage.backend.as_str() {
            "memory" => Self::from_repos(Repos::memory(Arc::new(MemoryDb::new())), None),
            "mysql" => {
                let pool = MySqlPoolOptions::new()
                    .max_connections(storage.max_connections)
                    .connect(&storage.dsn)
                    .await?;
                let retry = RetryPolicy {
                    attempts: storage.retry_attempts.max(1),
                    backoff: Duration::from_millis(storage.retry_backoff_ms),
                };
                Self::from_repos(Repos::mysql(pool.clone(), retry), Some(pool))
            }
            other => return Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
        };

        info!(backend = %storage.backend, "server started");
        Ok(server)
    }

    /// Server over an existing in-memory database, for tests and demos.
    pub fn in_memory(db: Arc<MemoryDb>) -> Self {
        Self::from_repos(Repos::memory(db), None)
    }

    pub fn from_repos(repos: Repos, pool: Option<MySqlPool>) -> Self {
        let user_service: Arc<dyn UserService> =
            Arc::new(RealUserService::new(repos.user_repo.clone()));

        let film_service: Arc<dyn FilmService> = Arc::new(RealFilmService::new(
            repos.film_repo.clone(),
            repos.like_repo.clone(),
        ));

        let feed_service: Arc<dyn FeedService> = Arc::new(RealFeedService::new(
            repos.user_repo.clone(),
            repos.feed_repo,
        ));

        let relationship_service: Arc<dyn RelationshipService> =
            Arc::new(RealRelationshipService::new(
                repos.user_repo.clone(),
                repos.friendship_repo,
                feed_service.clone(),
            ));

        let recommendation_service: Arc<dyn RecommendationService> =
            Arc::new(RealRecommendationService::new(
                repos.user_repo.clone(),
                repos.like_repo.clone(),
                repos.film_repo.clone(),
            ));

        let like_service: Arc<dyn LikeService> = Arc::new(RealLikeService::new(
            repos.user_repo,
            repos.film_repo,
            repos.like_repo,
            feed_service.clone(),
        ));

        Self {
            user_service,
            film_service,
            relationship_service,
            recommendation_service,
            feed_service,
            like_service,
            pool,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
