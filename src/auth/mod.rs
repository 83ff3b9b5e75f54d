use crate::state::AppState;
use axum::Router;

pub mod claims;
mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use claims::Identity;
pub use extractors::{AdminUser, AuthUser};
pub use repo_types::Role;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
