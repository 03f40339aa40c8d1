//! Election routes - the configuration-builder surface
//!
//! - GET    /api/v1/election - current configuration
//! - PUT    /api/v1/election - replace the election wholesale
//! - DELETE /api/v1/election - erase all election state
//!
//! The builder invariants (required title, at least one item, at least one
//! option per item) are enforced here, before the store ever sees the data.
//! Item and option ids are assigned server-side.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::SaveElectionRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{ElectionConfig, VotingItem, VotingOption};

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_QUESTION_LEN: usize = 500;
const MAX_LABEL_LEN: usize = 100;
const MAX_ITEMS: usize = 100;
const MAX_OPTIONS_PER_ITEM: usize = 50;

/// GET /api/v1/election
///
/// Current configuration, or 404 when no election is loaded (the signal for
/// the voting view to redirect to the builder).
pub async fn get_election(State(state): State<Arc<AppState>>) -> ApiResult<Json<ElectionConfig>> {
    state
        .store
        .current_config()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No election configured".to_string()))
}

/// PUT /api/v1/election
///
/// Replace the live election wholesale. Prior tallies are discarded; the
/// returned configuration carries the freshly assigned ids with all counts
/// at zero.
pub async fn save_election(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveElectionRequest>,
) -> ApiResult<Json<ElectionConfig>> {
    validate_save_request(&req)?;

    let config = build_config(req);
    state.store.save_config(config);

    let saved = state
        .store
        .current_config()
        .ok_or_else(|| ApiError::Internal("Election missing after save".to_string()))?;

    tracing::info!(title = %saved.title, items = saved.voting_items.len(), "Election replaced");
    Ok(Json(saved))
}

/// DELETE /api/v1/election
///
/// Erase configuration and tallies.
pub async fn delete_election(State(state): State<Arc<AppState>>) -> StatusCode {
    state.store.reset();
    StatusCode::NO_CONTENT
}

/// Turn a validated request into the aggregate, assigning fresh unique ids.
fn build_config(req: SaveElectionRequest) -> ElectionConfig {
    ElectionConfig {
        title: req.title.trim().to_string(),
        description: req.description,
        logo_url: req.logo_url,
        voting_items: req
            .voting_items
            .into_iter()
            .map(|item| VotingItem {
                id: Uuid::new_v4().to_string(),
                question: item.question,
                options: item
                    .options
                    .into_iter()
                    .map(|label| VotingOption {
                        id: Uuid::new_v4().to_string(),
                        label,
                        count: 0,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Validate the builder invariants
fn validate_save_request(req: &SaveElectionRequest) -> ApiResult<()> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }

    if req.title.len() > MAX_TITLE_LEN {
        return Err(ApiError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LEN
        )));
    }

    if req.description.len() > MAX_DESCRIPTION_LEN {
        return Err(ApiError::Validation(format!(
            "Description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }

    if let Some(logo) = &req.logo_url {
        if !logo.starts_with("data:") {
            return Err(ApiError::Validation(
                "Logo must be a data URI".to_string(),
            ));
        }
    }

    if req.voting_items.is_empty() {
        return Err(ApiError::Validation(
            "At least one voting item is required".to_string(),
        ));
    }

    if req.voting_items.len() > MAX_ITEMS {
        return Err(ApiError::Validation(format!(
            "Number of voting items exceeds maximum of {}",
            MAX_ITEMS
        )));
    }

    for (index, item) in req.voting_items.iter().enumerate() {
        if item.question.trim().is_empty() {
            return Err(ApiError::Validation(format!(
                "Voting item {} is missing its question",
                index
            )));
        }

        if item.question.len() > MAX_QUESTION_LEN {
            return Err(ApiError::Validation(format!(
                "Question {} exceeds maximum length of {} characters",
                index, MAX_QUESTION_LEN
            )));
        }

        if item.options.is_empty() {
            return Err(ApiError::Validation(format!(
                "Voting item {} needs at least one option",
                index
            )));
        }

        if item.options.len() > MAX_OPTIONS_PER_ITEM {
            return Err(ApiError::Validation(format!(
                "Voting item {} exceeds the maximum of {} options",
                index, MAX_OPTIONS_PER_ITEM
            )));
        }

        for label in &item.options {
            if label.trim().is_empty() {
                return Err(ApiError::Validation(format!(
                    "Voting item {} has an empty option label",
                    index
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(ApiError::Validation(format!(
                    "An option label in voting item {} exceeds {} characters",
                    index, MAX_LABEL_LEN
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::NewVotingItem;

    fn valid_request() -> SaveElectionRequest {
        SaveElectionRequest {
            title: "Assembly".to_string(),
            description: String::new(),
            logo_url: None,
            voting_items: vec![NewVotingItem {
                question: "Approve?".to_string(),
                options: vec!["SI".to_string(), "NO".to_string(), "N/C".to_string()],
            }],
        }
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(validate_save_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut req = valid_request();
        req.title = "   ".to_string();
        assert!(validate_save_request(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_item_without_options() {
        let mut req = valid_request();
        req.voting_items[0].options.clear();
        assert!(validate_save_request(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_no_items() {
        let mut req = valid_request();
        req.voting_items.clear();
        assert!(validate_save_request(&req).is_err());
    }

    #[test]
    fn test_validate_rejects_non_data_uri_logo() {
        let mut req = valid_request();
        req.logo_url = Some("https://example.com/logo.png".to_string());
        assert!(validate_save_request(&req).is_err());

        req.logo_url = Some("data:image/png;base64,AAAA".to_string());
        assert!(validate_save_request(&req).is_ok());
    }

    #[test]
    fn test_build_config_assigns_unique_ids_and_zero_counts() {
        let config = build_config(valid_request());
        let item = &config.voting_items[0];

        assert!(!item.id.is_empty());
        assert_eq!(item.options.len(), 3);

        let mut ids: Vec<&str> = item.options.iter().map(|o| o.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        assert!(item.options.iter().all(|o| o.count == 0));
    }
}
