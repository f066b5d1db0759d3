//! Food category reference data. Lives in the catalog database, separate
//! from the tracker tables that reference it by id.

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::catalog_routes()
}
