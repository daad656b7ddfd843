// ABOUTME: Core data models for the Potager meal planning platform
// ABOUTME: Re-exports recipe, inventory, menu plan, and rating types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! # Data Models
//!
//! Core data structures shared by the persistence layer and the domain
//! engine. Relationship graphs are expressed as explicit foreign ids rather
//! than object references: a [`Recipe`] points at its current version through
//! `current_version`, and a [`RecipeIngredient`] carries the id of the
//! version that owns it.

// Domain modules
mod inventory;
mod menu_plan;
mod rating;
mod recipe;
mod requests;

// Re-export all public types for convenience
pub use inventory::{
    CreateInventoryItemRequest, InventoryChangeType, InventoryHistoryEntry, InventoryItem,
    UpdateInventoryItemRequest,
};
pub use menu_plan::{
    AddPlannedMealRequest, CreateMenuPlanRequest, MarkCookedOutcome, MealType, MenuPlan,
    PlannedMeal,
};
pub use rating::{Rating, RatingSummary};
pub use requests::{
    MarkCookedRequest, RevertVersionRequest, ShoppingListRequest, SuggestionRequest,
};
pub use recipe::{
    CreateRecipeRequest, Difficulty, IngredientInput, Recipe, RecipeDetail, RecipeIngredient,
    RecipeVersion,
};
