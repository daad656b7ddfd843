// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database creation and domain seed helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

#![allow(dead_code, missing_docs, clippy::unwrap_used)]

//! Shared test utilities for `potager_server`
//!
//! Common setup functions to reduce duplication across integration tests.

use potager_core::models::{
    AddPlannedMealRequest, CreateInventoryItemRequest, CreateMenuPlanRequest, CreateRecipeRequest,
    Difficulty, IngredientInput, InventoryItem, MealType, MenuPlan, PlannedMeal, RecipeDetail,
};
use potager_server::database::Database;
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG environment variable controls test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:").await.unwrap()
}

/// A recipe request with sensible defaults, ready to tweak per test
pub fn recipe_request(title: &str) -> CreateRecipeRequest {
    CreateRecipeRequest {
        title: title.to_owned(),
        description: None,
        servings: 4,
        prep_minutes: 10,
        cook_minutes: 20,
        difficulty: Difficulty::Easy,
        ingredients: vec![ingredient("onion", 1.0, "pieces")],
        instructions: vec!["Cook it".to_owned()],
        tags: Vec::new(),
    }
}

/// An ingredient input in the "produce" category
pub fn ingredient(name: &str, quantity: f64, unit: &str) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        quantity,
        unit: unit.to_owned(),
        category: "produce".to_owned(),
        is_optional: false,
    }
}

/// Create a recipe from a request
pub async fn create_recipe(db: &Database, request: &CreateRecipeRequest) -> RecipeDetail {
    db.recipes().create(request, Uuid::new_v4()).await.unwrap()
}

/// Create an inventory item with the given stock level
pub async fn create_inventory_item(db: &Database, name: &str, quantity: f64) -> InventoryItem {
    db.inventory()
        .create(
            &CreateInventoryItemRequest {
                name: name.to_owned(),
                quantity,
                unit: "cups".to_owned(),
                category: "pantry".to_owned(),
                location: "pantry".to_owned(),
                expiration_date: None,
                minimum_stock: 0.0,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap()
}

/// Create a menu plan for the week of Monday 2025-06-02
pub async fn create_plan(db: &Database) -> MenuPlan {
    db.menu_plans()
        .create(
            &CreateMenuPlanRequest {
                week_start: "2025-06-02".parse().unwrap(),
                name: None,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap()
}

/// Add a dinner to a plan for the given recipe
pub async fn add_dinner(
    db: &Database,
    plan: &MenuPlan,
    recipe_id: Uuid,
    servings_planned: i64,
) -> PlannedMeal {
    db.menu_plans()
        .add_meal(
            plan.id,
            &AddPlannedMealRequest {
                recipe_id,
                meal_date: plan.week_start,
                meal_type: MealType::Dinner,
                servings_planned,
            },
        )
        .await
        .unwrap()
}
