mod feed_repo_mysql;
mod film_repo_mysql;
mod friendship_repo_mysql;
mod like_repo_mysql;
mod user_repo_mysql;

pub use feed_repo_mysql::*;
pub use film_repo_mysql::*;
pub use friendship_repo_mysql::*;
pub use like_repo_mysql::*;
pub use user_repo_mysql::*;

mod util;

pub use util::RetryPolicy;
