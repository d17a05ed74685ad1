mod store_error;

pub use store_error::*;

// repo

mod feed_repo;
mod film_repo;
mod friendship_repo;
mod like_repo;
mod user_repo;

pub use feed_repo::*;
pub use film_repo::*;
pub use friendship_repo::*;
pub use like_repo::*;
pub use user_repo::*;
