//! Domain entities.

mod memo;
mod user;

pub use memo::*;
pub use user::*;
