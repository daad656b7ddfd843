// ABOUTME: Menu plan and planned meal models keyed by Monday week start dates
// ABOUTME: MenuPlan, PlannedMeal, MealType, and the mark-cooked outcome shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slot of the day a planned meal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "snack" => Self::Snack,
            _ => Self::Dinner,
        }
    }
}

/// One week of planned meals, keyed by its Monday start date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuPlan {
    /// Unique identifier
    pub id: Uuid,
    /// Monday the plan week starts on
    pub week_start: NaiveDate,
    /// Optional display name
    pub name: Option<String>,
    /// User who created the plan
    pub created_by: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One meal slot within a menu plan.
///
/// `cooked_date` is set if and only if `cooked` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    /// Unique identifier
    pub id: Uuid,
    /// Owning menu plan
    pub plan_id: Uuid,
    /// Recipe to cook
    pub recipe_id: Uuid,
    /// Day of the plan week the meal is scheduled for
    pub meal_date: NaiveDate,
    /// Slot of the day
    pub meal_type: MealType,
    /// Servings planned; ingredient quantities scale by
    /// `servings_planned / version.servings`
    pub servings_planned: i64,
    /// Whether the meal has been cooked
    pub cooked: bool,
    /// When the meal was marked cooked
    pub cooked_date: Option<DateTime<Utc>>,
    /// User who marked the meal cooked
    pub cooked_by: Option<Uuid>,
}

/// Request payload for creating a menu plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuPlanRequest {
    /// Week start date; must be a Monday
    pub week_start: NaiveDate,
    /// Optional display name
    pub name: Option<String>,
}

/// Request payload for adding a meal slot to a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPlannedMealRequest {
    /// Recipe to plan
    pub recipe_id: Uuid,
    /// Day to cook it; must fall within the plan's week
    pub meal_date: NaiveDate,
    /// Slot of the day
    pub meal_type: MealType,
    /// Servings to plan for (> 0)
    pub servings_planned: i64,
}

/// Result of the cook transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkCookedOutcome {
    /// The meal after the transition
    pub meal: PlannedMeal,
    /// Whether any tracked inventory item was deducted. False for the
    /// idempotent re-mark of an already-cooked meal, or when no ingredient
    /// of the recipe is tracked in inventory.
    pub inventory_updated: bool,
}
