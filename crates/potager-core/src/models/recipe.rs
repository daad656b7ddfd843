// ABOUTME: Recipe, RecipeVersion, and ingredient models with full edit history
// ABOUTME: Versions are immutable snapshots; edits always append a new version
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty of a recipe version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Minimal technique or attention required
    Easy,
    /// Average home-cooking effort
    #[default]
    Medium,
    /// Demands technique, timing, or both
    Hard,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

/// A recipe's identity and lifetime statistics.
///
/// Cooking content (times, difficulty, instructions, ingredients) lives on
/// the version rows; this row only tracks which version is current and how
/// the recipe has been used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// User who created the recipe
    pub created_by: Uuid,
    /// Version number currently shown and cooked (always references an existing version)
    pub current_version: i64,
    /// Soft-delete flag; deleted recipes stay queryable for plans and history
    pub is_deleted: bool,
    /// Date the recipe was last marked cooked
    pub last_cooked_date: Option<NaiveDate>,
    /// Number of times a planned meal of this recipe was marked cooked
    pub times_cooked: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// An immutable snapshot of a recipe's cooking content.
///
/// Version numbers are contiguous per recipe starting at 1. Edits and
/// reverts append a new version; existing rows are never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeVersion {
    /// Unique identifier
    pub id: Uuid,
    /// Owning recipe
    pub recipe_id: Uuid,
    /// Position in the recipe's edit history (1-based, contiguous)
    pub version_number: i64,
    /// Servings this version's quantities are written for
    pub servings: i64,
    /// Preparation time in minutes
    pub prep_minutes: i64,
    /// Cooking time in minutes
    pub cook_minutes: i64,
    /// Difficulty rating
    pub difficulty: Difficulty,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// User who authored this version
    pub created_by: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl RecipeVersion {
    /// Total time in minutes (prep + cook)
    #[must_use]
    pub const fn total_minutes(&self) -> i64 {
        self.prep_minutes + self.cook_minutes
    }
}

/// One ingredient line of a recipe version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Unique identifier
    pub id: Uuid,
    /// Owning recipe version
    pub version_id: Uuid,
    /// Ingredient name as entered
    pub name: String,
    /// Quantity for the version's servings (> 0)
    pub quantity: f64,
    /// Measurement unit (no conversion is performed between units)
    pub unit: String,
    /// Grocery category used for shopping-list grouping
    pub category: String,
    /// Position within the ingredient list
    pub display_order: i64,
    /// Optional ingredients are skipped by the shopping list
    pub is_optional: bool,
}

/// A recipe together with its current version, ingredients, and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// The recipe row
    pub recipe: Recipe,
    /// The version `recipe.current_version` points at
    pub version: RecipeVersion,
    /// Ingredients of that version, in display order
    pub ingredients: Vec<RecipeIngredient>,
    /// Tags attached to the recipe (seasonal, dietary, cuisine)
    pub tags: Vec<String>,
}

/// Ingredient input for creating or updating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientInput {
    /// Ingredient name
    pub name: String,
    /// Quantity (> 0)
    pub quantity: f64,
    /// Measurement unit
    pub unit: String,
    /// Grocery category
    #[serde(default)]
    pub category: String,
    /// Whether the ingredient is optional
    #[serde(default)]
    pub is_optional: bool,
}

/// Request payload for creating a recipe or a new version of one.
///
/// Updates are full replacements: the request carries the complete new
/// snapshot, not a diff against the previous version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    /// Display title
    pub title: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Servings the quantities are written for (> 0)
    pub servings: i64,
    /// Preparation time in minutes (>= 0)
    pub prep_minutes: i64,
    /// Cooking time in minutes (>= 0)
    pub cook_minutes: i64,
    /// Difficulty rating
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Ingredient lines (at least one)
    pub ingredients: Vec<IngredientInput>,
    /// Instruction steps (at least one)
    pub instructions: Vec<String>,
    /// Tags for seasonal/dietary/cuisine filtering
    #[serde(default)]
    pub tags: Vec<String>,
}
