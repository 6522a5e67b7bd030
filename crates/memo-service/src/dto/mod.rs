//! Data Transfer Objects (DTOs).

mod auth_dto;
mod memo_dto;

pub use auth_dto::*;
pub use memo_dto::*;
