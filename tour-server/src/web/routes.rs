//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{debug, error, warn};

use crate::domain::TimeError;
use crate::planner::{CancelToken, SearchEngine, SearchError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/activities", get(list_activities))
        .route("/tours/search", post(search_tours))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the activity catalog.
async fn list_activities(State(state): State<AppState>) -> Json<ActivitiesResponse> {
    let activities = state
        .catalog
        .iter()
        .map(|a| ActivityResult::from_activity(a))
        .collect();

    Json(ActivitiesResponse { activities })
}

/// Search for tours matching the request.
///
/// The search runs on a blocking thread. If it outlives the configured
/// timeout it is cancelled and whatever it found so far is returned.
async fn search_tours(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SearchToursResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: SearchToursRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid search request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    if req.people_count == 0 {
        return Err(AppError::BadRequest {
            message: "people_count must be at least 1".to_string(),
        });
    }
    let spec = req.to_spec()?;
    spec.validate()?;

    let mut config = (*state.config).clone();
    if let Some(max_results) = req.max_results {
        config.max_results = max_results;
    }

    let people = spec.people();
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let catalog = Arc::clone(&state.catalog);
    let resolver = Arc::clone(&state.resolver);

    let mut handle = tokio::task::spawn_blocking(move || {
        SearchEngine::new(&catalog, &resolver, &spec, &config).search_with_cancel(&worker_cancel)
    });

    let joined = match tokio::time::timeout(state.search_timeout, &mut handle).await {
        Ok(joined) => joined,
        Err(_) => {
            warn!(
                timeout_secs = state.search_timeout.as_secs_f64(),
                "tour search timed out, cancelling"
            );
            cancel.cancel();
            handle.await
        }
    };

    let outcome = joined.map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })??;

    debug!(
        tours = outcome.tours.len(),
        cancelled = outcome.cancelled,
        "search request complete"
    );
    Ok(Json(SearchToursResponse::from_outcome(&outcome, people)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<TimeError> for AppError {
    fn from(e: TimeError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidSpec(msg) => AppError::BadRequest { message: msg },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
