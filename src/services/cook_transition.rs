// ABOUTME: Cook-transition coordinator - the atomic mark-meal-cooked state change
// ABOUTME: Flips the meal, bumps recipe stats, and deducts inventory in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! The cook transition.
//!
//! Marking a planned meal cooked touches three record families at once: the
//! meal itself, the recipe's lifetime statistics, and the inventory ledger.
//! All three land in one database transaction - either every effect applies
//! or none do. Re-marking an already-cooked meal is an idempotent no-op and
//! never deducts inventory a second time.

use chrono::{Local, Utc};
use potager_core::errors::{AppError, AppResult};
use potager_core::models::MarkCookedOutcome;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{Database, InventoryManager, MenuPlansManager, RecipesManager};

/// Coordinates the mark-meal-cooked state change
pub struct CookTransitionCoordinator {
    db: Database,
}

impl CookTransitionCoordinator {
    /// Create a new coordinator
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Mark a planned meal cooked.
    ///
    /// Sets the meal's cooked fields, increments the recipe's `times_cooked`
    /// and `last_cooked_date`, and deducts every ingredient of the cooked
    /// version from inventory, scaled by planned over base servings.
    /// Untracked ingredients are skipped silently; tracked ones clamp at
    /// zero. `last_cooked_date` uses the server's local calendar date.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown meal; any failure mid-transition
    /// rolls the whole transaction back
    pub async fn mark_cooked(&self, meal_id: Uuid, actor: Uuid) -> AppResult<MarkCookedOutcome> {
        let meals = self.db.menu_plans();
        let meal = meals.get_meal(meal_id).await?;
        if meal.cooked {
            debug!(meal_id = %meal_id, "meal already cooked, skipping");
            return Ok(MarkCookedOutcome {
                meal,
                inventory_updated: false,
            });
        }

        // Scaling inputs come from the recipe's current version. The recipe
        // may be soft-deleted by now; cooking an already-planned meal of a
        // deleted recipe is still valid.
        let (version, ingredients) = {
            let recipes = self.db.recipes();
            let detail = recipes.get(meal.recipe_id).await?;
            (detail.version, detail.ingredients)
        };
        if version.servings <= 0 {
            return Err(AppError::internal(format!(
                "Version {} of recipe {} has non-positive servings",
                version.version_number, meal.recipe_id
            )));
        }
        let scale = meal.servings_planned as f64 / version.servings as f64;

        let now = Utc::now();
        let today = Local::now().date_naive();

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        // Atomic test-and-set: a concurrent caller loses this race and
        // observes zero affected rows, so only one transition deducts.
        if !MenuPlansManager::set_cooked(&mut tx, meal_id, actor, now).await? {
            drop(tx);
            debug!(meal_id = %meal_id, "meal cooked concurrently, skipping");
            let meal = meals.get_meal(meal_id).await?;
            return Ok(MarkCookedOutcome {
                meal,
                inventory_updated: false,
            });
        }

        RecipesManager::record_cooked(&mut tx, meal.recipe_id, today).await?;

        let mut inventory_updated = false;
        for ingredient in &ingredients {
            let amount = ingredient.quantity * scale;
            let touched =
                InventoryManager::deduct(&mut tx, &ingredient.name, amount, meal.recipe_id, actor)
                    .await?;
            inventory_updated = inventory_updated || touched;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit cook transition: {e}")))?;

        info!(
            meal_id = %meal_id,
            recipe_id = %meal.recipe_id,
            inventory_updated,
            "marked meal cooked"
        );

        let meal = meals.get_meal(meal_id).await?;
        Ok(MarkCookedOutcome {
            meal,
            inventory_updated,
        })
    }
}
