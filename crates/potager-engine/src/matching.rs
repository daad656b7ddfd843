// ABOUTME: Ingredient-name normalization and inventory matching
// ABOUTME: The one matching rule shared by the suggestion ranker and shopping list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! Ingredient/inventory name matching.
//!
//! Recipes say "Milk", inventories say "milk ". Both the suggestion ranker
//! and the shopping-list aggregator resolve names through the single
//! [`normalize_name`] function and the [`InventoryIndex`] built on top of it,
//! so the matching rule cannot drift between the two consumers.

use std::collections::HashMap;

/// Normalize an ingredient or inventory item name for matching.
///
/// Trims surrounding whitespace and Unicode-lowercases. No stemming,
/// pluralization, or alias handling: "tomatoes" and "tomato" are distinct.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Inventory stock levels keyed by normalized item name.
///
/// Duplicate names (e.g. "Milk" in the fridge and "milk" in the pantry)
/// have their quantities summed.
#[derive(Debug, Clone, Default)]
pub struct InventoryIndex {
    stock: HashMap<String, f64>,
}

impl InventoryIndex {
    /// Build an index from (name, quantity) pairs
    #[must_use]
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut stock: HashMap<String, f64> = HashMap::new();
        for (name, quantity) in items {
            *stock.entry(normalize_name(name)).or_insert(0.0) += quantity;
        }
        Self { stock }
    }

    /// Whether any item with this name is tracked, regardless of quantity
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.stock.contains_key(&normalize_name(name))
    }

    /// Whether an item with this name is present with quantity > 0
    #[must_use]
    pub fn has_stocked(&self, name: &str) -> bool {
        self.stock_level(name) > 0.0
    }

    /// Current stock for this name; 0.0 when untracked
    #[must_use]
    pub fn stock_level(&self, name: &str) -> f64 {
        self.stock.get(&normalize_name(name)).copied().unwrap_or(0.0)
    }

    /// Number of distinct tracked names
    #[must_use]
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    /// Whether the index tracks no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

/// How much of a recipe's ingredient list is currently in stock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStats {
    /// Ingredients present in inventory with quantity > 0
    pub matched: u32,
    /// Total ingredients considered
    pub total: u32,
}

impl MatchStats {
    /// Matched fraction as a percentage (0.0 - 100.0)
    #[must_use]
    pub fn percentage(&self) -> f64 {
        f64::from(self.matched) / f64::from(self.total) * 100.0
    }
}

/// Compute match statistics for a recipe's ingredient names.
///
/// Returns `None` for an empty ingredient list: a recipe with no
/// ingredients is excluded from inventory ranking, not scored as 0% or
/// 100%.
#[must_use]
pub fn match_stats<'a, I>(ingredient_names: I, inventory: &InventoryIndex) -> Option<MatchStats>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matched = 0u32;
    let mut total = 0u32;
    for name in ingredient_names {
        total += 1;
        if inventory.has_stocked(name) {
            matched += 1;
        }
    }
    if total == 0 {
        return None;
    }
    Some(MatchStats { matched, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_name("  Whole Milk "), "whole milk");
        assert_eq!(normalize_name("EGGS"), "eggs");
        assert_eq!(normalize_name("crème fraîche"), "crème fraîche");
    }

    #[test]
    fn test_index_sums_duplicate_names() {
        let index = InventoryIndex::from_items([("Milk", 1.0), ("milk ", 2.0)]);
        assert_eq!(index.len(), 1);
        assert!((index.stock_level("MILK") - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_quantity_is_tracked_but_not_stocked() {
        let index = InventoryIndex::from_items([("flour", 0.0)]);
        assert!(index.contains("Flour"));
        assert!(!index.has_stocked("Flour"));
    }

    #[test]
    fn test_match_stats_percentage() {
        let index = InventoryIndex::from_items([("milk", 1.0), ("eggs", 6.0)]);
        let stats = match_stats(["Milk", "Eggs", "vanilla", "sugar"], &index).unwrap();
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.total, 4);
        assert!((stats.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_ingredient_list_is_excluded() {
        let index = InventoryIndex::from_items([("milk", 1.0)]);
        assert!(match_stats([], &index).is_none());
    }
}
