use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use crate::logger::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::filters::body::BodyDeserializeError;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let failure = if let Some(failure) = err.find::<ApiFailure>() {
        failure.clone()
    } else if err.is_not_found() {
        ApiFailure::new(ApiErrorCode::NotFound, "no such route")
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        ApiFailure::new(ApiErrorCode::InvalidInput, e.to_string())
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        ApiFailure::new(ApiErrorCode::MethodNotAllowed, "method not allowed")
    } else {
        ApiFailure::internal(format!("Unhandled error: {:?}", err))
    };

    let status = failure.code.status();
    let json = warp::reply::json(&ApiResponse::<()>::err(failure.code, failure.message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiErrorCode {
    UserNotFound,
    FilmNotFound,
    InvalidPairing,
    InvalidInput,
    StorageUnavailable,
    ConsistencyViolation,
    NotFound,
    MethodNotAllowed,
    InternalError,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::UserNotFound | ApiErrorCode::FilmNotFound | ApiErrorCode::NotFound => {
                StatusCode::NOT_FOUND
            }
            ApiErrorCode::InvalidPairing | ApiErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ApiErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorCode::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::ConsistencyViolation | ApiErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiFailure {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiFailure {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("Internal error: {}", message);
        ApiFailure::new(ApiErrorCode::InternalError, message)
    }
}

impl reject::Reject for ApiFailure {}

impl From<RelationError> for ApiFailure {
    fn from(error: RelationError) -> Self {
        let code = match &error {
            RelationError::UserNotFound(_) => ApiErrorCode::UserNotFound,
            RelationError::InvalidPairing(_) => ApiErrorCode::InvalidPairing,
            RelationError::StorageUnavailable(_) => ApiErrorCode::StorageUnavailable,
            RelationError::ConsistencyViolation(_) => {
                error!("friendship request aborted: {error}");
                ApiErrorCode::ConsistencyViolation
            }
            RelationError::Internal(_) => ApiErrorCode::InternalError,
        };
        ApiFailure::new(code, error.to_string())
    }
}

impl From<RecommendationError> for ApiFailure {
    fn from(error: RecommendationError) -> Self {
        let code = match &error {
            RecommendationError::UserNotFound(_) => ApiErrorCode::UserNotFound,
            RecommendationError::StorageUnavailable(_) => ApiErrorCode::StorageUnavailable,
            RecommendationError::Internal(_) => ApiErrorCode::InternalError,
        };
        ApiFailure::new(code, error.to_string())
    }
}

impl From<FeedError> for ApiFailure {
    fn from(error: FeedError) -> Self {
        let code = match &error {
            FeedError::UserNotFound(_) => ApiErrorCode::UserNotFound,
            FeedError::StorageUnavailable(_) => ApiErrorCode::StorageUnavailable,
            FeedError::Internal(_) => ApiErrorCode::InternalError,
        };
        ApiFailure::new(code, error.to_string())
    }
}

impl From<LikeError> for ApiFailure {
    fn from(error: LikeError) -> Self {
        let code = match &error {
            LikeError::UserNotFound(_) => ApiErrorCode::UserNotFound,
            LikeError::FilmNotFound(_) => ApiErrorCode::FilmNotFound,
            LikeError::StorageUnavailable(_) => ApiErrorCode::StorageUnavailable,
            LikeError::Internal(_) => ApiErrorCode::InternalError,
        };
        ApiFailure::new(code, error.to_string())
    }
}

impl From<UserError> for ApiFailure {
    fn from(error: UserError) -> Self {
        let code = match &error {
            UserError::UserNotFound(_) => ApiErrorCode::UserNotFound,
            UserError::InvalidInput(_) => ApiErrorCode::InvalidInput,
            UserError::StorageUnavailable(_) => ApiErrorCode::StorageUnavailable,
            UserError::Internal(_) => ApiErrorCode::InternalError,
        };
        ApiFailure::new(code, error.to_string())
    }
}

impl From<FilmError> for ApiFailure {
    fn from(error: FilmError) -> Self {
        let code = match &error {
            FilmError::FilmNotFound(_) => ApiErrorCode::FilmNotFound,
            FilmError::InvalidInput(_) => ApiErrorCode::InvalidInput,
            FilmError::StorageUnavailable(_) => ApiErrorCode::StorageUnavailable,
            FilmError::Internal(_) => ApiErrorCode::InternalError,
        };
        ApiFailure::new(code, error.to_string())
    }
}
