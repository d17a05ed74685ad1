#![allow(dead_code)]

use chrono::NaiveDate;
use filmgraph::domain_model::*;
use filmgraph::infra_memory::MemoryDb;
use filmgraph::server::Server;
use std::sync::Arc;

pub fn user(id: i64) -> User {
    User {
        id: UserId(id),
        email: format!("user{id}@example.com"),
        login: format!("user{id}"),
        name: format!("User {id}"),
        birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
    }
}

pub fn film(id: i64) -> Film {
    Film {
        id: FilmId(id),
        name: format!("Film {id}"),
        description: format!("Description of film {id}"),
        release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        duration: 90,
        mpa: Some(Mpa {
            id: 1,
            name: "G".to_string(),
        }),
        genres: vec![Genre {
            id: 1,
            name: "Comedy".to_string(),
        }],
        likes: Vec::new(),
    }
}

/// Memory database with users and films `1..=users` / `1..=films`.
pub fn seeded_db(users: i64, films: i64) -> Arc<MemoryDb> {
    let db = Arc::new(MemoryDb::new());
    for id in 1..=users {
        db.insert_user(user(id));
    }
    for id in 1..=films {
        db.insert_film(film(id));
    }
    db
}

pub fn seeded_server(users: i64, films: i64) -> (Arc<MemoryDb>, Server) {
    let db = seeded_db(users, films);
    let server = Server::in_memory(db.clone());
    (db, server)
}

pub fn ids(users: &[User]) -> Vec<i64> {
    users.iter().map(|u| u.id.0).collect()
}
