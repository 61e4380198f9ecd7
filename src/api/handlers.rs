//! HTTP request handlers for the Production Incentive Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Employee, EntryCalculation};
use crate::session::EntrySession;

use super::request::EntryRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts an entry context with a worker roster and returns the evaluated
/// targets, incentives, and audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Evaluate the entry
    match evaluate_entry(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                building = %result.building,
                nature = %result.nature,
                workers = result.workers.len(),
                total_incentive = %result.totals.total_incentive,
                duration_us = result.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Drives an entry session through the request's selections and roster,
/// then evaluates it.
fn evaluate_entry(state: &AppState, request: &EntryRequest) -> EngineResult<EntryCalculation> {
    let mut session = EntrySession::new(state.config().clone());

    session.select_building(&request.building)?;
    session.select_nature(&request.nature)?;
    session.select_shift(&request.shift)?;

    if let Some(norms) = request.norms {
        session.set_norms(norms)?;
    }
    if let Some(manpower) = request.manpower {
        session.set_manpower(manpower);
    }
    if let Some(production_hrs) = request.production_hrs {
        session.set_production_hrs(production_hrs);
    }

    for worker in &request.workers {
        session.add_worker(Employee::new(&worker.emp_code, &worker.name))?;
        session.set_worked_hrs(&worker.emp_code, worker.worked_hrs)?;
        session.set_produced_qty(&worker.emp_code, worker.produced_qty)?;
    }

    session.calculate()
}
