// ABOUTME: Favorites service - derives favorite summaries from stored votes
// ABOUTME: Loads vote counts and applies the configured thresholds per call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use potager_core::config::FavoritesConfig;
use potager_core::errors::AppResult;
use potager_core::models::RatingSummary;
use potager_engine::favorites;
use uuid::Uuid;

use crate::database::Database;

/// Computes favorite status on demand from stored ratings
pub struct FavoritesService {
    db: Database,
    config: FavoritesConfig,
}

impl FavoritesService {
    /// Create a new favorites service
    #[must_use]
    pub const fn new(db: Database, config: FavoritesConfig) -> Self {
        Self { db, config }
    }

    /// Summarize a recipe's votes under the configured thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn summary(&self, recipe_id: Uuid) -> AppResult<RatingSummary> {
        let (total, thumbs_up) = self.db.ratings().counts(recipe_id).await?;
        Ok(favorites::summarize(
            recipe_id,
            total,
            thumbs_up,
            &self.config,
        ))
    }
}
