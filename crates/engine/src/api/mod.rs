//! API layer - HTTP entry points.

pub mod auth;
mod characters;
pub mod dto;
pub mod error;
pub mod http;
mod monsters;
mod users;

pub use auth::CurrentUser;
pub use error::ApiError;
