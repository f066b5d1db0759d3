pub mod aggregator;
mod dto;
pub mod handlers;
pub mod macros;
pub mod resolver;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::nutrition_routes()
}
