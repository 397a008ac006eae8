//! JSON web API over the trip search.
//!
//! Exposes the station directory, trip search with filters and carrier
//! details.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
