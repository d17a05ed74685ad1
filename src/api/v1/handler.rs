use super::error::*;
use crate::application_port::*;
use crate::domain_model::{FilmId, NewFilm, NewUser, UserId};
use serde::Serialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

pub async fn create_user(
    body: NewUser,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = user_service
        .create_user(body)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::ok(user)),
        StatusCode::CREATED,
    ))
}

pub async fn get_user(
    user_id: UserId,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = user_service
        .get_user(user_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(user)))
}

pub async fn create_film(
    body: NewFilm,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let film = film_service
        .create_film(body)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::ok(film)),
        StatusCode::CREATED,
    ))
}

pub async fn get_film(
    film_id: FilmId,
    film_service: Arc<dyn FilmService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let film = film_service
        .get_film(film_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(film)))
}

pub async fn add_friend(
    user_id: UserId,
    friend_id: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    relationship_service
        .add_friend(user_id, friend_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn remove_friend(
    user_id: UserId,
    friend_id: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    relationship_service
        .remove_friend(user_id, friend_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn list_friends(
    user_id: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let friends = relationship_service
        .list_friends(user_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(friends)))
}

pub async fn list_common_friends(
    user_id: UserId,
    other_id: UserId,
    relationship_service: Arc<dyn RelationshipService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let common = relationship_service
        .list_common_friends(user_id, other_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(common)))
}

pub async fn recommend(
    user_id: UserId,
    recommendation_service: Arc<dyn RecommendationService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let films = recommendation_service
        .recommend(user_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(films)))
}

pub async fn feed(
    user_id: UserId,
    feed_service: Arc<dyn FeedService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let events = feed_service
        .feed_for_user(user_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(events)))
}

pub async fn like_film(
    film_id: FilmId,
    user_id: UserId,
    like_service: Arc<dyn LikeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    like_service
        .like_film(film_id, user_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}

pub async fn unlike_film(
    film_id: FilmId,
    user_id: UserId,
    like_service: Arc<dyn LikeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    like_service
        .unlike_film(film_id, user_id)
        .await
        .map_err(ApiFailure::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(())))
}
