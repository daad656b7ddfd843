// ABOUTME: Six-strategy recipe suggestion ranker with reproducible orderings
// ABOUTME: Rotation, favorites, never-tried, available-inventory, seasonal, quick meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! Recipe suggestion ranking.
//!
//! [`suggest`] ranks a set of candidate recipes under one of six strategies.
//! Candidates arrive already restricted to active (non-deleted) recipes by
//! the store's single active-recipe predicate; the ranker itself never sees
//! soft-deleted rows. Every strategy's ordering is fully tie-broken (title
//! as the final key) so identical inputs always rank identically.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use potager_core::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;
use uuid::Uuid;

use crate::favorites;
use crate::matching::{match_stats, normalize_name, InventoryIndex, MatchStats};

/// Which ranking a suggestion request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStrategy {
    /// Least-recently-cooked first, never-cooked before everything
    Rotation,
    /// Household favorites by thumbs-up fraction
    Favorites,
    /// Recipes never cooked, newest first
    NeverTried,
    /// Best ingredient coverage from current inventory
    AvailableInventory,
    /// Recipes tagged with the current calendar season
    Seasonal,
    /// Short total time, quickest first
    QuickMeals,
}

impl SuggestionStrategy {
    /// Convert to wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::Favorites => "favorites",
            Self::NeverTried => "never_tried",
            Self::AvailableInventory => "available_inventory",
            Self::Seasonal => "seasonal",
            Self::QuickMeals => "quick_meals",
        }
    }

    /// Parse from wire string representation; `None` for unknown strategies
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rotation" => Some(Self::Rotation),
            "favorites" => Some(Self::Favorites),
            "never_tried" => Some(Self::NeverTried),
            "available_inventory" => Some(Self::AvailableInventory),
            "seasonal" => Some(Self::Seasonal),
            "quick_meals" => Some(Self::QuickMeals),
            _ => None,
        }
    }
}

/// Calendar season used by the seasonal strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// March - May
    Spring,
    /// June - August
    Summer,
    /// September - November
    Fall,
    /// December - February
    Winter,
}

impl Season {
    /// Season for a calendar month (1-12)
    #[must_use]
    pub const fn for_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Winter,
        }
    }

    /// Season for a calendar date
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_month(date.month())
    }

    /// Tag string recipes use to mark themselves seasonal
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }
}

/// Everything the ranker needs to know about one active recipe
#[derive(Debug, Clone)]
pub struct SuggestionCandidate {
    /// Recipe id
    pub recipe_id: Uuid,
    /// Recipe title
    pub title: String,
    /// When the recipe was created
    pub created_at: DateTime<Utc>,
    /// Date the recipe was last cooked, if ever
    pub last_cooked_date: Option<NaiveDate>,
    /// Lifetime cook count
    pub times_cooked: i64,
    /// Total minutes (prep + cook) of the current version
    pub total_minutes: i64,
    /// Ingredient names of the current version
    pub ingredient_names: Vec<String>,
    /// Tags attached to the recipe
    pub tags: Vec<String>,
    /// Total rating count
    pub ratings_total: u32,
    /// Thumbs-up rating count
    pub ratings_up: u32,
}

/// One ranked suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggested recipe
    pub recipe_id: Uuid,
    /// Recipe title
    pub title: String,
    /// Human-readable explanation of why the recipe ranked where it did
    pub reason: String,
    /// Ingredient match percentage (available-inventory strategy only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<f64>,
    /// Days since the recipe was last cooked (rotation/seasonal strategies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_cooked: Option<i64>,
}

/// Rank candidates under the given strategy and truncate to `limit`.
///
/// `today` is supplied by the caller (services use the server's local date)
/// so season resolution and days-since-cooked are deterministic under test.
#[must_use]
pub fn suggest(
    candidates: Vec<SuggestionCandidate>,
    strategy: SuggestionStrategy,
    limit: usize,
    config: &EngineConfig,
    today: NaiveDate,
    inventory: &InventoryIndex,
) -> Vec<Suggestion> {
    debug!(
        strategy = strategy.as_str(),
        candidates = candidates.len(),
        limit,
        "ranking suggestions"
    );
    let mut suggestions = match strategy {
        SuggestionStrategy::Rotation => rank_rotation(candidates, today),
        SuggestionStrategy::Favorites => rank_favorites(candidates, config),
        SuggestionStrategy::NeverTried => rank_never_tried(candidates),
        SuggestionStrategy::AvailableInventory => rank_available_inventory(candidates, inventory),
        SuggestionStrategy::Seasonal => rank_seasonal(candidates, today),
        SuggestionStrategy::QuickMeals => rank_quick_meals(candidates, config),
    };
    suggestions.truncate(limit);
    suggestions
}

/// Never-cooked first, then least recently cooked; ties broken by cook
/// count then title.
fn rotation_order(a: &SuggestionCandidate, b: &SuggestionCandidate) -> Ordering {
    let by_date = match (a.last_cooked_date, b.last_cooked_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    };
    by_date
        .then_with(|| a.times_cooked.cmp(&b.times_cooked))
        .then_with(|| a.title.cmp(&b.title))
}

fn rotation_reason(candidate: &SuggestionCandidate, today: NaiveDate) -> (String, Option<i64>) {
    candidate.last_cooked_date.map_or_else(
        || ("You have never cooked this".into(), None),
        |last| {
            let days = (today - last).num_days();
            (format!("Last cooked {days} days ago"), Some(days))
        },
    )
}

fn rank_rotation(mut candidates: Vec<SuggestionCandidate>, today: NaiveDate) -> Vec<Suggestion> {
    candidates.sort_by(rotation_order);
    candidates
        .into_iter()
        .map(|c| {
            let (reason, days_since_cooked) = rotation_reason(&c, today);
            Suggestion {
                recipe_id: c.recipe_id,
                title: c.title,
                reason,
                match_percentage: None,
                days_since_cooked,
            }
        })
        .collect()
}

fn rank_favorites(candidates: Vec<SuggestionCandidate>, config: &EngineConfig) -> Vec<Suggestion> {
    let mut favorites: Vec<(SuggestionCandidate, f64, u32)> = candidates
        .into_iter()
        .filter_map(|c| {
            let summary =
                favorites::summarize(c.recipe_id, c.ratings_total, c.ratings_up, &config.favorites);
            if !summary.is_favorite {
                return None;
            }
            let fraction = summary.positive_fraction?;
            Some((c, fraction, summary.total))
        })
        .collect();
    favorites.sort_by(|(a, fa, ta), (b, fb, tb)| {
        fb.total_cmp(fa)
            .then_with(|| tb.cmp(ta))
            .then_with(|| a.title.cmp(&b.title))
    });
    favorites
        .into_iter()
        .map(|(c, fraction, total)| Suggestion {
            recipe_id: c.recipe_id,
            title: c.title,
            reason: format!(
                "{:.0}% thumbs up from {total} household ratings",
                fraction * 100.0
            ),
            match_percentage: None,
            days_since_cooked: None,
        })
        .collect()
}

fn rank_never_tried(candidates: Vec<SuggestionCandidate>) -> Vec<Suggestion> {
    let mut untried: Vec<SuggestionCandidate> = candidates
        .into_iter()
        .filter(|c| c.times_cooked == 0)
        .collect();
    untried.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.title.cmp(&b.title)));
    untried
        .into_iter()
        .map(|c| Suggestion {
            recipe_id: c.recipe_id,
            title: c.title,
            reason: "In your collection but never tried".into(),
            match_percentage: None,
            days_since_cooked: None,
        })
        .collect()
}

fn rank_available_inventory(
    candidates: Vec<SuggestionCandidate>,
    inventory: &InventoryIndex,
) -> Vec<Suggestion> {
    let mut scored: Vec<(SuggestionCandidate, MatchStats)> = candidates
        .into_iter()
        .filter_map(|c| {
            let stats = match_stats(c.ingredient_names.iter().map(String::as_str), inventory)?;
            Some((c, stats))
        })
        .collect();
    scored.sort_by(|(a, sa), (b, sb)| {
        sb.percentage()
            .total_cmp(&sa.percentage())
            .then_with(|| sb.matched.cmp(&sa.matched))
            .then_with(|| a.title.cmp(&b.title))
    });
    scored
        .into_iter()
        .map(|(c, stats)| Suggestion {
            recipe_id: c.recipe_id,
            title: c.title,
            reason: format!(
                "You have {} of {} ingredients in stock",
                stats.matched, stats.total
            ),
            match_percentage: Some(stats.percentage()),
            days_since_cooked: None,
        })
        .collect()
}

fn rank_seasonal(candidates: Vec<SuggestionCandidate>, today: NaiveDate) -> Vec<Suggestion> {
    let season = Season::for_date(today);
    let mut seasonal: Vec<SuggestionCandidate> = candidates
        .into_iter()
        .filter(|c| c.tags.iter().any(|t| normalize_name(t) == season.as_str()))
        .collect();
    seasonal.sort_by(rotation_order);
    seasonal
        .into_iter()
        .map(|c| {
            let (_, days_since_cooked) = rotation_reason(&c, today);
            Suggestion {
                recipe_id: c.recipe_id,
                title: c.title,
                reason: format!("A {} recipe for the season", season.as_str()),
                match_percentage: None,
                days_since_cooked,
            }
        })
        .collect()
}

fn rank_quick_meals(candidates: Vec<SuggestionCandidate>, config: &EngineConfig) -> Vec<Suggestion> {
    let cutoff = i64::from(config.suggestions.quick_meal_max_minutes);
    let mut quick: Vec<SuggestionCandidate> = candidates
        .into_iter()
        .filter(|c| c.total_minutes <= cutoff)
        .collect();
    quick.sort_by(|a, b| {
        a.total_minutes
            .cmp(&b.total_minutes)
            .then_with(|| a.title.cmp(&b.title))
    });
    quick
        .into_iter()
        .map(|c| Suggestion {
            reason: format!("Ready in {} minutes", c.total_minutes),
            recipe_id: c.recipe_id,
            title: c.title,
            match_percentage: None,
            days_since_cooked: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candidate(title: &str) -> SuggestionCandidate {
        SuggestionCandidate {
            recipe_id: Uuid::new_v4(),
            title: title.into(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
            last_cooked_date: None,
            times_cooked: 0,
            total_minutes: 45,
            ingredient_names: vec!["milk".into()],
            tags: Vec::new(),
            ratings_total: 0,
            ratings_up: 0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    #[test]
    fn test_season_mapping() {
        assert_eq!(Season::for_month(3), Season::Spring);
        assert_eq!(Season::for_month(5), Season::Spring);
        assert_eq!(Season::for_month(6), Season::Summer);
        assert_eq!(Season::for_month(8), Season::Summer);
        assert_eq!(Season::for_month(9), Season::Fall);
        assert_eq!(Season::for_month(11), Season::Fall);
        assert_eq!(Season::for_month(12), Season::Winter);
        assert_eq!(Season::for_month(2), Season::Winter);
    }

    #[test]
    fn test_strategy_round_trip() {
        for strategy in [
            SuggestionStrategy::Rotation,
            SuggestionStrategy::Favorites,
            SuggestionStrategy::NeverTried,
            SuggestionStrategy::AvailableInventory,
            SuggestionStrategy::Seasonal,
            SuggestionStrategy::QuickMeals,
        ] {
            assert_eq!(SuggestionStrategy::parse(strategy.as_str()), Some(strategy));
        }
        assert_eq!(SuggestionStrategy::parse("surprise_me"), None);
    }

    #[test]
    fn test_rotation_never_cooked_ranks_first() {
        let mut a = candidate("Aioli Bowl");
        a.times_cooked = 0;
        let mut b = candidate("Beet Salad");
        b.last_cooked_date = Some(today() - chrono::Days::new(10));
        b.times_cooked = 3;
        let mut c = candidate("Cassoulet");
        c.last_cooked_date = Some(today() - chrono::Days::new(40));
        c.times_cooked = 5;

        let ranked = suggest(
            vec![b, c, a],
            SuggestionStrategy::Rotation,
            10,
            &EngineConfig::default(),
            today(),
            &InventoryIndex::default(),
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Aioli Bowl", "Cassoulet", "Beet Salad"]);
        assert_eq!(ranked[0].days_since_cooked, None);
        assert_eq!(ranked[1].days_since_cooked, Some(40));
        assert_eq!(ranked[2].days_since_cooked, Some(10));
    }

    #[test]
    fn test_rotation_ties_break_by_times_cooked_then_title() {
        let mut a = candidate("Zucchini Bake");
        a.times_cooked = 2;
        a.last_cooked_date = Some(today() - chrono::Days::new(7));
        let mut b = candidate("Apple Tart");
        b.times_cooked = 2;
        b.last_cooked_date = Some(today() - chrono::Days::new(7));
        let mut c = candidate("Miso Soup");
        c.times_cooked = 1;
        c.last_cooked_date = Some(today() - chrono::Days::new(7));

        let ranked = suggest(
            vec![a, b, c],
            SuggestionStrategy::Rotation,
            10,
            &EngineConfig::default(),
            today(),
            &InventoryIndex::default(),
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Miso Soup", "Apple Tart", "Zucchini Bake"]);
    }

    #[test]
    fn test_favorites_orders_by_fraction_then_volume() {
        let mut a = candidate("Pad Thai");
        a.ratings_total = 4;
        a.ratings_up = 3; // 75%
        let mut b = candidate("Ramen");
        b.ratings_total = 10;
        b.ratings_up = 10; // 100%
        let mut c = candidate("Gnocchi");
        c.ratings_total = 4;
        c.ratings_up = 4; // 100%, fewer raters than Ramen
        let mut d = candidate("Liver Stew");
        d.ratings_total = 4;
        d.ratings_up = 1; // below threshold

        let ranked = suggest(
            vec![a, b, c, d],
            SuggestionStrategy::Favorites,
            10,
            &EngineConfig::default(),
            today(),
            &InventoryIndex::default(),
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Ramen", "Gnocchi", "Pad Thai"]);
    }

    #[test]
    fn test_never_tried_newest_first_and_excludes_cooked() {
        let mut a = candidate("Old Never Tried");
        a.created_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut b = candidate("New Never Tried");
        b.created_at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut c = candidate("Cooked Once");
        c.times_cooked = 1;

        let ranked = suggest(
            vec![a, b, c],
            SuggestionStrategy::NeverTried,
            10,
            &EngineConfig::default(),
            today(),
            &InventoryIndex::default(),
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["New Never Tried", "Old Never Tried"]);
    }

    #[test]
    fn test_available_inventory_scores_and_excludes_empty() {
        let inventory = InventoryIndex::from_items([
            ("milk", 1.0),
            ("eggs", 6.0),
            ("butter", 0.5),
            ("flour", 0.0), // tracked but out of stock
        ]);
        let mut a = candidate("Omelette");
        a.ingredient_names = vec!["Eggs".into(), "Butter".into()];
        let mut b = candidate("Pancakes");
        b.ingredient_names = vec!["Flour".into(), "Milk".into(), "Eggs".into(), "Butter".into()];
        let mut c = candidate("Bare Recipe");
        c.ingredient_names = Vec::new();

        let ranked = suggest(
            vec![a, b, c],
            SuggestionStrategy::AvailableInventory,
            10,
            &EngineConfig::default(),
            today(),
            &inventory,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title, "Omelette");
        assert!((ranked[0].match_percentage.unwrap() - 100.0).abs() < f64::EPSILON);
        assert_eq!(ranked[1].title, "Pancakes");
        assert!((ranked[1].match_percentage.unwrap() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seasonal_filters_by_current_season_tag() {
        let mut a = candidate("Tomato Galette");
        a.tags = vec!["Summer".into(), "vegetarian".into()];
        let mut b = candidate("Squash Soup");
        b.tags = vec!["fall".into()];
        let c = candidate("Untagged");

        // July 15 - summer
        let ranked = suggest(
            vec![a, b, c],
            SuggestionStrategy::Seasonal,
            10,
            &EngineConfig::default(),
            today(),
            &InventoryIndex::default(),
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Tomato Galette"]);
    }

    #[test]
    fn test_quick_meals_cutoff_and_order() {
        let mut a = candidate("Slow Roast");
        a.total_minutes = 180;
        let mut b = candidate("Stir Fry");
        b.total_minutes = 20;
        let mut c = candidate("Salad");
        c.total_minutes = 10;
        let mut d = candidate("Half Hour Soup");
        d.total_minutes = 30;

        let ranked = suggest(
            vec![a, b, c, d],
            SuggestionStrategy::QuickMeals,
            10,
            &EngineConfig::default(),
            today(),
            &InventoryIndex::default(),
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Salad", "Stir Fry", "Half Hour Soup"]);
    }

    #[test]
    fn test_limit_truncates() {
        let ranked = suggest(
            vec![candidate("A"), candidate("B"), candidate("C")],
            SuggestionStrategy::Rotation,
            2,
            &EngineConfig::default(),
            today(),
            &InventoryIndex::default(),
        );
        assert_eq!(ranked.len(), 2);
    }
}
