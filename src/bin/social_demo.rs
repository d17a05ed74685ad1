//! Seeds an in-memory database and walks through friendship and
//! recommendation flows.
//!
//! $ cargo run --bin social_demo

use chrono::NaiveDate;
use filmgraph::domain_model::*;
use filmgraph::infra_memory::MemoryDb;
use filmgraph::logger::*;
use filmgraph::server::Server;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap()?;
    logger.reload_from_config(&LogConfig {
        filter: "debug".to_string(),
    })?;

    let server = Server::in_memory(Arc::new(MemoryDb::new()));

    let mut users = Vec::new();
    for login in ["ann", "bob", "cid"] {
        let user = server
            .user_service
            .create_user(NewUser {
                email: format!("{login}@example.com"),
                login: login.to_string(),
                name: String::new(),
                birthday: None,
            })
            .await?;
        users.push(user.id);
    }
    let release_date = NaiveDate::from_ymd_opt(1999, 3, 31)
        .ok_or_else(|| anyhow::anyhow!("bad release date"))?;
    let mut films = Vec::new();
    for name in ["Heat", "Alien", "Ronin"] {
        let film = server
            .film_service
            .create_film(NewFilm {
                name: name.to_string(),
                description: format!("{name}, the film"),
                release_date,
                duration: 120,
                mpa: None,
                genres: Vec::new(),
            })
            .await?;
        films.push(film.id);
    }

    let [ann, bob, cid] = users[..] else {
        anyhow::bail!("expected three users");
    };

    server.relationship_service.add_friend(ann, bob).await?;
    info!("ann's friends after asking bob: {:?}", server.relationship_service.list_friends(ann).await?);
    server.relationship_service.add_friend(bob, ann).await?;
    server.relationship_service.add_friend(cid, ann).await?;
    server.relationship_service.add_friend(ann, cid).await?;
    info!(
        "common friends of bob and cid: {:?}",
        server.relationship_service.list_common_friends(bob, cid).await?
    );

    for &film in &films[..2] {
        server.like_service.like_film(film, ann).await?;
    }
    for &film in &films {
        server.like_service.like_film(film, bob).await?;
    }
    let recommended = server.recommendation_service.recommend(ann).await?;
    info!(
        "recommended for ann: {:?}",
        recommended.iter().map(|f| f.name.as_str()).collect::<Vec<_>>()
    );

    for event in server.feed_service.feed_for_user(ann).await? {
        info!(?event);
    }

    Ok(())
}
