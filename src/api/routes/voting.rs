//! Voting routes - the execution-view surface
//!
//! - POST /api/v1/votes   - cast the voter's selections (one per item)
//! - GET  /api/v1/results - chart-ready tallies

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{CastVotesRequest, CastVotesResponse, ResultsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::results;

const MAX_SELECTIONS: usize = 1000;

/// POST /api/v1/votes
///
/// Cast one choice per item. Selections naming unknown ids (or arriving
/// while no election is loaded) are ignored, matching the store's no-op
/// semantics; the response reports how many were recorded.
pub async fn cast_votes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CastVotesRequest>,
) -> ApiResult<Json<CastVotesResponse>> {
    if req.selections.is_empty() {
        return Err(ApiError::Validation("No selections to cast".to_string()));
    }

    if req.selections.len() > MAX_SELECTIONS {
        return Err(ApiError::Validation(format!(
            "Number of selections exceeds maximum of {}",
            MAX_SELECTIONS
        )));
    }

    let mut recorded = 0;
    let mut ignored = 0;

    for selection in &req.selections {
        if state.store.save_vote(&selection.item_id, &selection.option_id) {
            recorded += 1;
        } else {
            ignored += 1;
        }
    }

    let status = if ignored == 0 { "ok" } else { "partial" };
    tracing::debug!(recorded, ignored, "Votes cast");

    Ok(Json(CastVotesResponse {
        status: status.to_string(),
        recorded,
        ignored,
    }))
}

/// GET /api/v1/results
///
/// Per-item results (bars, totals, y-axis ticks) for the dashboard, or 404
/// when no election is loaded.
pub async fn get_results(State(state): State<Arc<AppState>>) -> ApiResult<Json<ResultsResponse>> {
    let config = state
        .store
        .current_config()
        .ok_or_else(|| ApiError::NotFound("No election configured".to_string()))?;

    let items = results::election_results(&config);
    let total_votes = items.iter().map(|item| item.total_votes).sum();

    Ok(Json(ResultsResponse {
        title: config.title,
        description: config.description,
        logo_url: config.logo_url,
        total_votes,
        items,
        generated_at: Utc::now(),
    }))
}
