// ABOUTME: Suggestion service - loads candidates and inventory, runs the ranker
// ABOUTME: Resolves "today" from the server's local calendar date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::Local;
use potager_core::config::EngineConfig;
use potager_core::errors::{AppError, AppResult};
use potager_core::models::SuggestionRequest;
use potager_engine::suggestions::suggest;
use potager_engine::{InventoryIndex, Suggestion, SuggestionStrategy};

use crate::database::Database;

/// Ranks recipe suggestions over the current store contents
pub struct SuggestionService {
    db: Database,
    config: EngineConfig,
}

impl SuggestionService {
    /// Create a new suggestion service
    #[must_use]
    pub const fn new(db: Database, config: EngineConfig) -> Self {
        Self { db, config }
    }

    /// Rank suggestions for a wire request
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown strategy string
    pub async fn suggest_for_request(
        &self,
        request: &SuggestionRequest,
    ) -> AppResult<Vec<Suggestion>> {
        let strategy = SuggestionStrategy::parse(&request.strategy).ok_or_else(|| {
            AppError::invalid_input(format!("Unknown suggestion strategy '{}'", request.strategy))
        })?;
        self.suggest(strategy, request.limit).await
    }

    /// Rank suggestions under a strategy.
    ///
    /// Candidates are every active recipe; soft-deleted ones never reach
    /// the ranker. Seasonal matching and days-since-cooked use the server's
    /// local calendar date.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn suggest(
        &self,
        strategy: SuggestionStrategy,
        limit: Option<usize>,
    ) -> AppResult<Vec<Suggestion>> {
        let candidates = self.db.recipes().suggestion_candidates().await?;
        let items = self.db.inventory().list().await?;
        let inventory =
            InventoryIndex::from_items(items.iter().map(|i| (i.name.as_str(), i.quantity)));
        let today = Local::now().date_naive();

        Ok(suggest(
            candidates,
            strategy,
            limit.unwrap_or(self.config.suggestions.default_limit),
            &self.config,
            today,
            &inventory,
        ))
    }
}
