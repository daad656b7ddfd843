// ABOUTME: Inventory ledger database operations with an append-only change history
// ABOUTME: Every quantity change lands in inventory_history; stock never goes negative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{Days, NaiveDate, Utc};
use potager_core::errors::{AppError, AppResult};
use potager_core::models::{
    CreateInventoryItemRequest, InventoryChangeType, InventoryHistoryEntry, InventoryItem,
    UpdateInventoryItemRequest,
};
use potager_engine::normalize_name;
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use super::row::{parse_date_opt, parse_datetime, parse_uuid, parse_uuid_opt};

/// Inventory database operations manager
pub struct InventoryManager {
    pool: SqlitePool,
}

impl InventoryManager {
    /// Create a new inventory manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add an item to the inventory
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or negative quantities,
    /// or a database error if the write fails
    pub async fn create(
        &self,
        request: &CreateInventoryItemRequest,
        actor: Uuid,
    ) -> AppResult<InventoryItem> {
        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input("Item name must not be empty"));
        }
        if request.quantity < 0.0 {
            return Err(AppError::out_of_range("Quantity must not be negative"));
        }
        if request.minimum_stock < 0.0 {
            return Err(AppError::out_of_range("Minimum stock must not be negative"));
        }

        let now = Utc::now();
        let item_id = Uuid::new_v4();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO inventory_items (
                id, name, quantity, unit, category, location,
                expiration_date, minimum_stock, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ",
        )
        .bind(item_id.to_string())
        .bind(request.name.trim())
        .bind(request.quantity)
        .bind(&request.unit)
        .bind(&request.category)
        .bind(&request.location)
        .bind(request.expiration_date.map(|d| d.to_string()))
        .bind(request.minimum_stock)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create inventory item: {e}")))?;

        // Opening stock is part of the ledger too
        if request.quantity > 0.0 {
            Self::append_history(
                &mut tx,
                item_id,
                0.0,
                request.quantity,
                InventoryChangeType::Purchased,
                None,
                actor,
            )
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit inventory item: {e}")))?;

        debug!(item_id = %item_id, name = %request.name, "created inventory item");

        self.get(item_id).await
    }

    /// Get an inventory item by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown item
    pub async fn get(&self, item_id: Uuid) -> AppResult<InventoryItem> {
        let row = sqlx::query(
            r"
            SELECT id, name, quantity, unit, category, location,
                   expiration_date, minimum_stock, created_at, updated_at
            FROM inventory_items WHERE id = $1
            ",
        )
        .bind(item_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get inventory item: {e}")))?;

        row.as_ref()
            .map(row_to_item)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Inventory item {item_id}")))
    }

    /// List all inventory items, by category then name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, quantity, unit, category, location,
                   expiration_date, minimum_stock, created_at, updated_at
            FROM inventory_items
            ORDER BY category, name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list inventory: {e}")))?;

        rows.iter().map(row_to_item).collect()
    }

    /// Update an item's descriptive fields (name, unit, category, location,
    /// expiration, minimum stock). Quantity changes go through [`Self::adjust`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown item
    pub async fn update(
        &self,
        item_id: Uuid,
        request: &UpdateInventoryItemRequest,
    ) -> AppResult<InventoryItem> {
        let current = self.get(item_id).await?;

        let name = request.name.clone().unwrap_or(current.name);
        if name.trim().is_empty() {
            return Err(AppError::invalid_input("Item name must not be empty"));
        }
        let minimum_stock = request.minimum_stock.unwrap_or(current.minimum_stock);
        if minimum_stock < 0.0 {
            return Err(AppError::out_of_range("Minimum stock must not be negative"));
        }
        let expiration_date = request
            .expiration_date
            .unwrap_or(current.expiration_date);

        sqlx::query(
            r"
            UPDATE inventory_items
            SET name = $1, unit = $2, category = $3, location = $4,
                expiration_date = $5, minimum_stock = $6, updated_at = $7
            WHERE id = $8
            ",
        )
        .bind(name.trim())
        .bind(request.unit.clone().unwrap_or(current.unit))
        .bind(request.category.clone().unwrap_or(current.category))
        .bind(request.location.clone().unwrap_or(current.location))
        .bind(expiration_date.map(|d| d.to_string()))
        .bind(minimum_stock)
        .bind(Utc::now().to_rfc3339())
        .bind(item_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update inventory item: {e}")))?;

        self.get(item_id).await
    }

    /// Set an item's quantity, appending the change to the ledger.
    ///
    /// Manual edits use [`InventoryChangeType::Adjusted`]; restocks and
    /// spoilage pass [`InventoryChangeType::Purchased`] / `Expired` / `Used`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown item or a validation error for a
    /// negative quantity
    pub async fn adjust(
        &self,
        item_id: Uuid,
        new_quantity: f64,
        change_type: InventoryChangeType,
        actor: Uuid,
    ) -> AppResult<InventoryItem> {
        if new_quantity < 0.0 {
            return Err(AppError::out_of_range("Quantity must not be negative"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let row = sqlx::query("SELECT quantity FROM inventory_items WHERE id = $1")
            .bind(item_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to get inventory item: {e}")))?;
        let Some(row) = row else {
            return Err(AppError::not_found(format!("Inventory item {item_id}")));
        };
        let quantity_before: f64 = row.get("quantity");

        sqlx::query("UPDATE inventory_items SET quantity = $1, updated_at = $2 WHERE id = $3")
            .bind(new_quantity)
            .bind(Utc::now().to_rfc3339())
            .bind(item_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to adjust quantity: {e}")))?;

        Self::append_history(
            &mut tx,
            item_id,
            quantity_before,
            new_quantity,
            change_type,
            None,
            actor,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit adjustment: {e}")))?;

        debug!(
            item_id = %item_id,
            before = quantity_before,
            after = new_quantity,
            change = change_type.as_str(),
            "adjusted inventory"
        );

        self.get(item_id).await
    }

    /// Deduct stock for a cooked ingredient, within the caller's transaction.
    ///
    /// The item is found by normalized-name match. An untracked name is a
    /// no-op returning `false` - cooking with untracked staples like salt is
    /// expected. Quantity clamps at zero rather than erroring.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn deduct(
        tx: &mut Transaction<'_, Sqlite>,
        ingredient_name: &str,
        amount: f64,
        recipe_id: Uuid,
        actor: Uuid,
    ) -> AppResult<bool> {
        // Name resolution goes through the same normalization the engine
        // uses, in Rust rather than SQL (SQLite's LOWER is ASCII-only)
        let normalized = normalize_name(ingredient_name);
        let rows = sqlx::query("SELECT id, name, quantity FROM inventory_items")
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up inventory item: {e}")))?;
        let row = rows.iter().find(|row| {
            let name: String = row.get("name");
            normalize_name(&name) == normalized
        });

        let Some(row) = row else {
            return Ok(false);
        };
        let item_id_str: String = row.get("id");
        let item_id = parse_uuid(&item_id_str, "inventory_items.id")?;
        let quantity_before: f64 = row.get("quantity");
        let quantity_after = (quantity_before - amount).max(0.0);

        sqlx::query("UPDATE inventory_items SET quantity = $1, updated_at = $2 WHERE id = $3")
            .bind(quantity_after)
            .bind(Utc::now().to_rfc3339())
            .bind(&item_id_str)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to deduct inventory: {e}")))?;

        Self::append_history(
            tx,
            item_id,
            quantity_before,
            quantity_after,
            InventoryChangeType::AutoDeducted,
            Some(recipe_id),
            actor,
        )
        .await?;

        debug!(
            item = %ingredient_name,
            before = quantity_before,
            after = quantity_after,
            "auto-deducted inventory"
        );
        Ok(true)
    }

    /// An item's change history, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn history(
        &self,
        item_id: Uuid,
        limit: u32,
    ) -> AppResult<Vec<InventoryHistoryEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, item_id, quantity_before, quantity_after, change_type,
                   recipe_id, changed_by, created_at
            FROM inventory_history
            WHERE item_id = $1
            ORDER BY id DESC
            LIMIT $2
            ",
        )
        .bind(item_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load history: {e}")))?;

        rows.iter().map(row_to_history_entry).collect()
    }

    /// Items at or below their low-stock threshold (threshold > 0 only)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, quantity, unit, category, location,
                   expiration_date, minimum_stock, created_at, updated_at
            FROM inventory_items
            WHERE minimum_stock > 0 AND quantity <= minimum_stock
            ORDER BY category, name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list low stock: {e}")))?;

        rows.iter().map(row_to_item).collect()
    }

    /// Stocked items expiring within `days` of `today`, soonest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn expiring_within(
        &self,
        days: u64,
        today: NaiveDate,
    ) -> AppResult<Vec<InventoryItem>> {
        let horizon = today
            .checked_add_days(Days::new(days))
            .ok_or_else(|| AppError::out_of_range("Expiration horizon overflows the calendar"))?;
        let rows = sqlx::query(
            r"
            SELECT id, name, quantity, unit, category, location,
                   expiration_date, minimum_stock, created_at, updated_at
            FROM inventory_items
            WHERE quantity > 0
              AND expiration_date IS NOT NULL
              AND expiration_date <= $1
            ORDER BY expiration_date, name
            ",
        )
        .bind(horizon.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list expiring items: {e}")))?;

        rows.iter().map(row_to_item).collect()
    }

    /// Append one ledger row inside a transaction
    async fn append_history(
        tx: &mut Transaction<'_, Sqlite>,
        item_id: Uuid,
        quantity_before: f64,
        quantity_after: f64,
        change_type: InventoryChangeType,
        recipe_id: Option<Uuid>,
        actor: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO inventory_history (
                item_id, quantity_before, quantity_after, change_type,
                recipe_id, changed_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(item_id.to_string())
        .bind(quantity_before)
        .bind(quantity_after)
        .bind(change_type.as_str())
        .bind(recipe_id.map(|id| id.to_string()))
        .bind(actor.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to append history: {e}")))?;
        Ok(())
    }
}

fn row_to_item(row: &SqliteRow) -> AppResult<InventoryItem> {
    let id_str: String = row.get("id");
    let expiration_str: Option<String> = row.get("expiration_date");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(InventoryItem {
        id: parse_uuid(&id_str, "inventory_items.id")?,
        name: row.get("name"),
        quantity: row.get("quantity"),
        unit: row.get("unit"),
        category: row.get("category"),
        location: row.get("location"),
        expiration_date: parse_date_opt(
            expiration_str.as_deref(),
            "inventory_items.expiration_date",
        )?,
        minimum_stock: row.get("minimum_stock"),
        created_at: parse_datetime(&created_at_str, "inventory_items.created_at")?,
        updated_at: parse_datetime(&updated_at_str, "inventory_items.updated_at")?,
    })
}

fn row_to_history_entry(row: &SqliteRow) -> AppResult<InventoryHistoryEntry> {
    let item_id_str: String = row.get("item_id");
    let change_type_str: String = row.get("change_type");
    let recipe_id_str: Option<String> = row.get("recipe_id");
    let changed_by_str: String = row.get("changed_by");
    let created_at_str: String = row.get("created_at");

    Ok(InventoryHistoryEntry {
        id: row.get("id"),
        item_id: parse_uuid(&item_id_str, "inventory_history.item_id")?,
        quantity_before: row.get("quantity_before"),
        quantity_after: row.get("quantity_after"),
        change_type: InventoryChangeType::parse(&change_type_str),
        recipe_id: parse_uuid_opt(recipe_id_str.as_deref(), "inventory_history.recipe_id")?,
        changed_by: parse_uuid(&changed_by_str, "inventory_history.changed_by")?,
        created_at: parse_datetime(&created_at_str, "inventory_history.created_at")?,
    })
}
