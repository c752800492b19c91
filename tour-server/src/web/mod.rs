//! Web layer for the tour planner.
//!
//! Provides HTTP endpoints for browsing activities and searching tours.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
