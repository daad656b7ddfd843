// ABOUTME: Per-user thumbs up/down ratings and the derived favorite summary
// ABOUTME: Votes are retained individually and never averaged into a stored score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's vote on one recipe.
///
/// At most one row exists per (recipe, user) pair; repeat votes overwrite
/// the previous one through an upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Rated recipe
    pub recipe_id: Uuid,
    /// Voting user
    pub user_id: Uuid,
    /// Thumbs up (true) or thumbs down (false)
    pub is_positive: bool,
    /// When the vote was first cast
    pub created_at: DateTime<Utc>,
    /// When the vote was last changed
    pub updated_at: DateTime<Utc>,
}

/// Favorite status derived from a recipe's ratings.
///
/// Recomputed on demand from the vote rows; never cached as persistent
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Recipe the summary describes
    pub recipe_id: Uuid,
    /// Total number of votes
    pub total: u32,
    /// Number of thumbs-up votes
    pub thumbs_up: u32,
    /// Fraction of positive votes, or `None` when fewer than `min_raters`
    /// votes exist - distinguishing "not enough data" from "below threshold"
    pub positive_fraction: Option<f64>,
    /// Whether the recipe qualifies as a favorite under the configured
    /// thresholds
    pub is_favorite: bool,
}
