//! HTTP API module for the Production Incentive Engine.
//!
//! This module provides the REST API endpoint for evaluating a production
//! entry's targets and incentives.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EntryRequest, WorkerRequest};
pub use response::ApiError;
pub use state::AppState;
