mod event;
mod film;
mod friendship;
mod user;

pub use event::*;
pub use film::*;
pub use friendship::*;
pub use user::*;
