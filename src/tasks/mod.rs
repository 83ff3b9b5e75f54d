use crate::state::AppState;
use axum::Router;

pub mod access;
mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    handlers::task_routes()
}
