use super::handler;
use crate::domain_model::{FilmId, UserId};
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let create_user = warp::path!("users")
        .and(warp::post())
        .and(warp::body::json())
        .and(with(server.user_service.clone()))
        .and_then(handler::create_user);

    let get_user = warp::path!("users" / UserId)
        .and(warp::get())
        .and(with(server.user_service.clone()))
        .and_then(handler::get_user);

    let create_film = warp::path!("films")
        .and(warp::post())
        .and(warp::body::json())
        .and(with(server.film_service.clone()))
        .and_then(handler::create_film);

    let get_film = warp::path!("films" / FilmId)
        .and(warp::get())
        .and(with(server.film_service.clone()))
        .and_then(handler::get_film);

    let add_friend = warp::path!("users" / UserId / "friends" / UserId)
        .and(warp::post())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::add_friend);

    let remove_friend = warp::path!("users" / UserId / "friends" / UserId)
        .and(warp::delete())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::remove_friend);

    let friends = warp::path!("users" / UserId / "friends")
        .and(warp::get())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::list_friends);

    let common_friends = warp::path!("users" / UserId / "friends" / "common" / UserId)
        .and(warp::get())
        .and(with(server.relationship_service.clone()))
        .and_then(handler::list_common_friends);

    let recommendations = warp::path!("users" / UserId / "recommendations")
        .and(warp::get())
        .and(with(server.recommendation_service.clone()))
        .and_then(handler::recommend);

    let feed = warp::path!("users" / UserId / "feed")
        .and(warp::get())
        .and(with(server.feed_service.clone()))
        .and_then(handler::feed);

    let like = warp::path!("films" / FilmId / "like" / UserId)
        .and(warp::put())
        .and(with(server.like_service.clone()))
        .and_then(handler::like_film);

    let unlike = warp::path!("films" / FilmId / "like" / UserId)
        .and(warp::delete())
        .and(with(server.like_service.clone()))
        .and_then(handler::unlike_film);

    create_user
        .or(get_user)
        .or(create_film)
        .or(get_film)
        .or(add_friend)
        .or(remove_friend)
        .or(friends)
        .or(common_friends)
        .or(recommendations)
        .or(feed)
        .or(like)
        .or(unlike)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}
