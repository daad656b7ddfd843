// ABOUTME: Remaining request payloads of the engine's contract surface
// ABOUTME: Suggestion, shopping list, mark-cooked, and revert-version inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for recipe suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Strategy selector: one of `rotation`, `favorites`, `never_tried`,
    /// `available_inventory`, `seasonal`, `quick_meals`
    pub strategy: String,
    /// Maximum suggestions to return; the configured default applies when
    /// absent
    pub limit: Option<usize>,
}

/// Request payload for generating a shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListRequest {
    /// Menu plan to shop for
    pub menu_plan_id: Uuid,
}

/// Request payload for marking a planned meal cooked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkCookedRequest {
    /// Meal to mark cooked
    pub meal_id: Uuid,
}

/// Request payload for reverting a recipe to an earlier version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevertVersionRequest {
    /// Recipe to revert
    pub recipe_id: Uuid,
    /// Version whose content becomes the new current version
    pub target_version: i64,
}
