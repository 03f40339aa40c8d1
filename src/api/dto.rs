//! Data transfer objects
//!
//! Request and response types for the API endpoints. Serialized field names
//! use camelCase to match the storage format and the kiosk front-end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::results::ItemResult;

// ============================================
// ELECTION (config builder) DTOs
// ============================================

/// Wholesale replacement of the live election.
///
/// The builder sends questions and option labels only; the server assigns
/// fresh ids and zero counts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveElectionRequest {
    /// Election title (required, non-empty)
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Optional logo as a data URI
    #[serde(default)]
    pub logo_url: Option<String>,
    /// One or more voting items
    pub voting_items: Vec<NewVotingItem>,
}

/// One question in a [`SaveElectionRequest`]
#[derive(Debug, Deserialize)]
pub struct NewVotingItem {
    /// Question text (required, non-empty)
    pub question: String,
    /// One or more option labels, in display order
    pub options: Vec<String>,
}

// ============================================
// VOTING DTOs
// ============================================

/// Cast the voter's current selections: one choice per item.
#[derive(Debug, Deserialize)]
pub struct CastVotesRequest {
    pub selections: Vec<VoteSelection>,
}

/// A single (item, option) choice
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSelection {
    pub item_id: String,
    pub option_id: String,
}

/// Outcome of a cast request
#[derive(Debug, Serialize)]
pub struct CastVotesResponse {
    /// "ok" when every selection was recorded, "partial" otherwise
    pub status: String,
    /// Selections that incremented a count
    pub recorded: usize,
    /// Selections ignored because of unknown ids or no loaded election
    pub ignored: usize,
}

// ============================================
// RESULTS DTOs
// ============================================

/// Chart-ready results for the whole election
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub title: String,
    pub description: String,
    pub logo_url: Option<String>,
    /// Sum of votes across all items
    pub total_votes: u64,
    /// Per-item results in display order
    pub items: Vec<ItemResult>,
    pub generated_at: DateTime<Utc>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub election_loaded: bool,
    pub ws_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
