mod feed_service_impl;
mod film_service_impl;
mod like_service_impl;
mod recommendation_service_impl;
mod relationship_service_impl;
mod user_service_impl;

pub use feed_service_impl::*;
pub use film_service_impl::*;
pub use like_service_impl::*;
pub use recommendation_service_impl::*;
pub use relationship_service_impl::*;
pub use user_service_impl::*;
