mod feed_service;
mod film_service;
mod like_service;
mod recommendation_service;
mod relationship_service;
mod user_service;

pub use feed_service::*;
pub use film_service::*;
pub use like_service::*;
pub use recommendation_service::*;
pub use relationship_service::*;
pub use user_service::*;
