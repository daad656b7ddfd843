// ABOUTME: Derives favorite status from per-user thumbs up/down vote counts
// ABOUTME: Recomputed on demand against explicit thresholds, never cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! Favorites calculation.
//!
//! A recipe is a favorite when enough household members have voted and a
//! sufficient fraction of them voted thumbs up. Below the rater minimum the
//! positive fraction is reported as `None`, so callers can tell "not enough
//! data" apart from "below threshold".

use potager_core::config::FavoritesConfig;
use potager_core::models::RatingSummary;
use uuid::Uuid;

/// Summarize a recipe's votes under the given thresholds.
///
/// `is_favorite = total >= min_raters && thumbs_up / total >= positive_fraction`.
#[must_use]
pub fn summarize(
    recipe_id: Uuid,
    total: u32,
    thumbs_up: u32,
    config: &FavoritesConfig,
) -> RatingSummary {
    if total < config.min_raters || total == 0 {
        return RatingSummary {
            recipe_id,
            total,
            thumbs_up,
            positive_fraction: None,
            is_favorite: false,
        };
    }
    let fraction = f64::from(thumbs_up) / f64::from(total);
    RatingSummary {
        recipe_id,
        total,
        thumbs_up,
        positive_fraction: Some(fraction),
        is_favorite: fraction >= config.positive_fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min_raters: u32, positive_fraction: f64) -> FavoritesConfig {
        FavoritesConfig {
            min_raters,
            positive_fraction,
        }
    }

    #[test]
    fn test_favorite_at_exact_threshold() {
        // 3 of 4 = 75%, threshold 75% - inclusive comparison
        let summary = summarize(Uuid::new_v4(), 4, 3, &config(2, 0.75));
        assert!(summary.is_favorite);
        assert!((summary.positive_fraction.unwrap() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_not_enough_raters_reports_no_fraction() {
        let summary = summarize(Uuid::new_v4(), 4, 3, &config(5, 0.75));
        assert!(!summary.is_favorite);
        assert_eq!(summary.positive_fraction, None);
    }

    #[test]
    fn test_below_threshold_with_enough_raters() {
        let summary = summarize(Uuid::new_v4(), 4, 2, &config(2, 0.75));
        assert!(!summary.is_favorite);
        assert!((summary.positive_fraction.unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_votes() {
        let summary = summarize(Uuid::new_v4(), 0, 0, &config(0, 0.75));
        assert!(!summary.is_favorite);
        assert_eq!(summary.positive_fraction, None);
    }
}
