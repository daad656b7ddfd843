// ABOUTME: Engine configuration for favorites thresholds and suggestion behavior
// ABOUTME: Passed explicitly into engine calls so behavior is deterministic per call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! Engine configuration.
//!
//! Thresholds that shape favorites and suggestions are carried in an explicit
//! [`EngineConfig`] value handed into each engine call. Nothing in the engine
//! reads global mutable state, so two calls with the same inputs and the same
//! config always produce the same output.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Thresholds for deriving favorite status from per-user ratings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Minimum number of raters before a recipe can be a favorite
    pub min_raters: u32,
    /// Fraction of thumbs-up votes required (0.0..=1.0)
    pub positive_fraction: f64,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            min_raters: 2,
            positive_fraction: 0.75,
        }
    }
}

/// Tunables for the suggestion ranker
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Maximum total minutes for a recipe to qualify as a quick meal
    pub quick_meal_max_minutes: u32,
    /// Default number of suggestions returned when the caller passes no limit
    pub default_limit: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            quick_meal_max_minutes: 30,
            default_limit: 10,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Favorites thresholds
    pub favorites: FavoritesConfig,
    /// Suggestion ranker tunables
    pub suggestions: SuggestionConfig,
}

impl EngineConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// Recognized variables: `POTAGER_FAVORITES_MIN_RATERS`,
    /// `POTAGER_FAVORITES_POSITIVE_FRACTION`, `POTAGER_QUICK_MEAL_MAX_MINUTES`,
    /// `POTAGER_SUGGESTION_DEFAULT_LIMIT`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_parse("POTAGER_FAVORITES_MIN_RATERS") {
            config.favorites.min_raters = v;
        }
        if let Some(v) = env_parse("POTAGER_FAVORITES_POSITIVE_FRACTION") {
            config.favorites.positive_fraction = v;
        }
        if let Some(v) = env_parse("POTAGER_QUICK_MEAL_MAX_MINUTES") {
            config.suggestions.quick_meal_max_minutes = v;
        }
        if let Some(v) = env_parse("POTAGER_SUGGESTION_DEFAULT_LIMIT") {
            config.suggestions.default_limit = v;
        }
        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.favorites.min_raters, 2);
        assert!((config.favorites.positive_fraction - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.suggestions.quick_meal_max_minutes, 30);
        assert_eq!(config.suggestions.default_limit, 10);
    }
}
