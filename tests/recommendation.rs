mod common;

use common::*;
use filmgraph::application_port::*;
use filmgraph::domain_model::*;
use filmgraph::server::Server;

async fn like_all(server: &Server, user: i64, films: &[i64]) {
    for film in films {
        server
            .like_service
            .like_film(FilmId(*film), UserId(user))
            .await
            .unwrap();
    }
}

fn film_ids(films: &[Film]) -> Vec<i64> {
    films.iter().map(|f| f.id.0).collect()
}

#[tokio::test]
async fn peer_with_highest_overlap_is_used() {
    let (_, server) = seeded_server(3, 5);
    like_all(&server, 1, &[1, 2]).await;
    like_all(&server, 2, &[1, 2, 3]).await;
    like_all(&server, 3, &[1, 4]).await;

    let films = server.recommendation_service.recommend(UserId(1)).await.unwrap();

    assert_eq!(film_ids(&films), vec![3]);
}

#[tokio::test]
async fn recommended_films_are_hydrated() {
    let (_, server) = seeded_server(3, 3);
    like_all(&server, 1, &[1]).await;
    like_all(&server, 2, &[1, 3]).await;
    like_all(&server, 3, &[3]).await;

    let films = server.recommendation_service.recommend(UserId(1)).await.unwrap();

    assert_eq!(films.len(), 1);
    let film = &films[0];
    assert_eq!(film.name, "Film 3");
    assert_eq!(film.mpa.as_ref().map(|m| m.name.as_str()), Some("G"));
    assert_eq!(film.genres.len(), 1);
    assert_eq!(film.likes, vec![UserId(2), UserId(3)]);
}

#[tokio::test]
async fn lowest_peer_id_wins_a_tie() {
    let (_, server) = seeded_server(3, 5);
    like_all(&server, 1, &[1]).await;
    like_all(&server, 3, &[1, 5]).await;
    like_all(&server, 2, &[1, 4]).await;

    let films = server.recommendation_service.recommend(UserId(1)).await.unwrap();

    assert_eq!(film_ids(&films), vec![4]);
}

#[tokio::test]
async fn no_likes_means_no_recommendations() {
    let (_, server) = seeded_server(2, 3);
    like_all(&server, 2, &[1, 2, 3]).await;

    let films = server.recommendation_service.recommend(UserId(1)).await.unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn zero_overlap_means_no_recommendations() {
    let (_, server) = seeded_server(3, 4);
    like_all(&server, 1, &[1]).await;
    like_all(&server, 2, &[2, 3]).await;
    like_all(&server, 3, &[4]).await;

    let films = server.recommendation_service.recommend(UserId(1)).await.unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn best_peer_with_nothing_new_does_not_fall_back() {
    let (_, server) = seeded_server(3, 4);
    like_all(&server, 1, &[1, 2]).await;
    like_all(&server, 2, &[1, 2]).await;
    like_all(&server, 3, &[1, 4]).await;

    let films = server.recommendation_service.recommend(UserId(1)).await.unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn lone_user_gets_nothing() {
    let (_, server) = seeded_server(1, 2);
    like_all(&server, 1, &[1, 2]).await;

    let films = server.recommendation_service.recommend(UserId(1)).await.unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn unknown_user_is_an_error() {
    let (_, server) = seeded_server(1, 0);

    let err = server
        .recommendation_service
        .recommend(UserId(42))
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendationError::UserNotFound(UserId(42))));
}

#[tokio::test]
async fn recommendations_follow_unlikes() {
    let (_, server) = seeded_server(2, 3);
    like_all(&server, 1, &[1]).await;
    like_all(&server, 2, &[1, 2]).await;
    assert_eq!(
        film_ids(&server.recommendation_service.recommend(UserId(1)).await.unwrap()),
        vec![2]
    );

    server
        .like_service
        .unlike_film(FilmId(1), UserId(2))
        .await
        .unwrap();

    assert!(server
        .recommendation_service
        .recommend(UserId(1))
        .await
        .unwrap()
        .is_empty());
}
