// ABOUTME: Shopping-list service - nets a menu plan's needs against inventory
// ABOUTME: Loads uncooked meals and stock, delegates the arithmetic to the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use potager_core::errors::AppResult;
use potager_engine::shopping_list::{aggregate, ShoppingList};
use potager_engine::InventoryIndex;
use uuid::Uuid;

use crate::database::Database;

/// Generates shopping lists from menu plans
pub struct ShoppingListService {
    db: Database,
}

impl ShoppingListService {
    /// Create a new shopping-list service
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Generate the shopping list for a menu plan.
    ///
    /// Only uncooked meals contribute; quantities scale to planned servings
    /// and optional ingredients are skipped. Stock is netted per normalized
    /// ingredient name and fully covered items stay off the buy list.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown plan
    pub async fn generate(&self, plan_id: Uuid) -> AppResult<ShoppingList> {
        let meals = self.db.menu_plans().shopping_rows(plan_id).await?;
        let items = self.db.inventory().list().await?;
        let inventory =
            InventoryIndex::from_items(items.iter().map(|i| (i.name.as_str(), i.quantity)));
        Ok(aggregate(&meals, &inventory))
    }
}
