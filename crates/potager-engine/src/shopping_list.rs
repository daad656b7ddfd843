// ABOUTME: Shopping-list aggregation - scales, sums, and nets ingredient needs
// ABOUTME: Nets planned-meal totals against inventory stock, grouped by category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! Shopping-list aggregation.
//!
//! Turns the uncooked meals of a menu plan into a buy list: each meal's
//! ingredients are scaled to the planned servings, summed across meals by
//! normalized name, then netted against current inventory stock. Units are
//! assumed consistent per ingredient name; no unit conversion is performed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::matching::{normalize_name, InventoryIndex};

/// One ingredient line of a planned meal's recipe version
#[derive(Debug, Clone)]
pub struct MealIngredientLine {
    /// Ingredient name as entered on the recipe
    pub name: String,
    /// Quantity for the version's base servings
    pub quantity: f64,
    /// Measurement unit
    pub unit: String,
    /// Grocery category used for grouping
    pub category: String,
    /// Optional ingredients are left off the shopping list
    pub is_optional: bool,
}

/// A planned meal's ingredient needs, as loaded from the store
#[derive(Debug, Clone)]
pub struct MealIngredients {
    /// Whether the meal has already been cooked
    pub cooked: bool,
    /// Servings the meal is planned for
    pub servings_planned: i64,
    /// Base servings of the recipe version the quantities are written for
    pub version_servings: i64,
    /// The version's ingredient lines
    pub ingredients: Vec<MealIngredientLine>,
}

/// Stock situation of one aggregated shopping-list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// In stock, but not enough for the plan
    NeedToBuy,
    /// Stock covers the full planned need
    SufficientStock,
    /// No stocked inventory item matches the ingredient name
    NotInInventory,
}

impl ItemStatus {
    /// Convert to wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NeedToBuy => "need_to_buy",
            Self::SufficientStock => "sufficient_stock",
            Self::NotInInventory => "not_in_inventory",
        }
    }
}

/// One line of the generated shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Ingredient name (first-seen spelling across the plan's meals)
    pub name: String,
    /// Total scaled quantity the plan needs
    pub total_needed: f64,
    /// Current inventory stock for the ingredient
    pub current_stock: f64,
    /// Deficit to buy: `max(0, total_needed - current_stock)`
    pub net_needed: f64,
    /// Measurement unit (first-seen; units are assumed consistent per name)
    pub unit: String,
    /// Stock situation
    pub status: ItemStatus,
}

/// Counts summarizing a generated shopping list
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShoppingSummary {
    /// Distinct ingredients required by the plan
    pub total_items: u32,
    /// Ingredients with a deficit to buy
    pub to_buy: u32,
    /// Ingredients fully covered by current stock
    pub in_stock: u32,
}

/// A generated shopping list, grouped by grocery category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Buy-list items grouped by category, alphabetical within each group.
    /// Only items with `net_needed > 0` appear here.
    pub groups: BTreeMap<String, Vec<ShoppingListItem>>,
    /// Flat counts over all aggregated ingredients, covered ones included
    pub summary: ShoppingSummary,
}

/// Working aggregate per normalized ingredient name
struct Aggregate {
    display_name: String,
    unit: String,
    category: String,
    total_needed: f64,
}

/// Aggregate a plan's uncooked meals into a netted shopping list.
///
/// Cooked meals are skipped even if the caller includes them; optional
/// ingredients never reach the list. Meals whose version servings are
/// not positive are skipped rather than scaled by a nonsense factor.
#[must_use]
pub fn aggregate(meals: &[MealIngredients], inventory: &InventoryIndex) -> ShoppingList {
    let mut aggregates: HashMap<String, Aggregate> = HashMap::new();

    for meal in meals {
        if meal.cooked || meal.version_servings <= 0 {
            continue;
        }
        let scale = meal.servings_planned as f64 / meal.version_servings as f64;
        for line in &meal.ingredients {
            if line.is_optional {
                continue;
            }
            let key = normalize_name(&line.name);
            let entry = aggregates.entry(key).or_insert_with(|| Aggregate {
                display_name: line.name.trim().to_owned(),
                unit: line.unit.clone(),
                category: line.category.clone(),
                total_needed: 0.0,
            });
            entry.total_needed += line.quantity * scale;
        }
    }

    let mut groups: BTreeMap<String, Vec<ShoppingListItem>> = BTreeMap::new();
    let mut summary = ShoppingSummary {
        total_items: aggregates.len() as u32,
        to_buy: 0,
        in_stock: 0,
    };

    for (key, agg) in aggregates {
        let current_stock = inventory.stock_level(&key);
        let net_needed = (agg.total_needed - current_stock).max(0.0);
        if net_needed <= 0.0 {
            summary.in_stock += 1;
            continue;
        }
        summary.to_buy += 1;
        let status = if current_stock > 0.0 {
            ItemStatus::NeedToBuy
        } else {
            ItemStatus::NotInInventory
        };
        groups
            .entry(agg.category)
            .or_default()
            .push(ShoppingListItem {
                name: agg.display_name,
                total_needed: agg.total_needed,
                current_stock,
                net_needed,
                unit: agg.unit,
                status,
            });
    }

    for items in groups.values_mut() {
        items.sort_by(|a, b| a.name.cmp(&b.name));
    }

    debug!(
        total = summary.total_items,
        to_buy = summary.to_buy,
        "aggregated shopping list"
    );
    ShoppingList { groups, summary }
}
