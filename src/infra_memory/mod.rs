//! In-memory storage backend. Used by tests, the demo binary and the
//! `memory` storage setting.

mod memory_db;

pub use memory_db::*;

mod feed_repo_memory;
mod film_repo_memory;
mod friendship_repo_memory;
mod like_repo_memory;
mod user_repo_memory;

pub use feed_repo_memory::*;
pub use film_repo_memory::*;
pub use friendship_repo_memory::*;
pub use like_repo_memory::*;
pub use user_repo_memory::*;
