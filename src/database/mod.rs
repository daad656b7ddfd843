// ABOUTME: Database management for the Potager meal planning backend
// ABOUTME: Owns the SQLite pool, schema migrations, and per-area manager accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! # Database Management
//!
//! One [`Database`] wraps the `SQLite` pool and runs schema migrations; the
//! per-area managers ([`RecipesManager`], [`InventoryManager`],
//! [`MenuPlansManager`], [`RatingsManager`]) expose the actual operations.
//! Multi-step writes (recipe versioning, the cook transition) run inside
//! `pool.begin()` transactions; an uncommitted transaction rolls back on
//! drop, so no error path leaves partial writes behind.

/// Inventory items and the append-only change ledger
pub mod inventory;
/// Menu plans and planned meal slots
pub mod menu_plans;
/// Rating upserts and vote counts
pub mod ratings;
/// Recipes, versions, ingredients, and tags
pub mod recipes;

mod row;

pub use inventory::InventoryManager;
pub use menu_plans::MenuPlansManager;
pub use ratings::RatingsManager;
pub use recipes::RecipesManager;

use potager_core::errors::{AppError, AppResult};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Database manager for the meal planning schema
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Create the database file if missing; SQLite leaves foreign key
        // enforcement off per connection, so set it on the options every
        // pooled connection is opened with
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe store operations
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Inventory ledger operations
    #[must_use]
    pub fn inventory(&self) -> InventoryManager {
        InventoryManager::new(self.pool.clone())
    }

    /// Menu plan operations
    #[must_use]
    pub fn menu_plans(&self) -> MenuPlansManager {
        MenuPlansManager::new(self.pool.clone())
    }

    /// Rating operations
    #[must_use]
    pub fn ratings(&self) -> RatingsManager {
        RatingsManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_recipes().await?;
        self.migrate_inventory().await?;
        self.migrate_ratings().await?;
        self.migrate_menu_plans().await?;
        info!("database migrations complete");
        Ok(())
    }

    /// Create recipe, version, ingredient, and tag tables
    async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                created_by TEXT NOT NULL,
                current_version INTEGER NOT NULL DEFAULT 1,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                last_cooked_date TEXT,
                times_cooked INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_versions (
                id TEXT PRIMARY KEY,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                version_number INTEGER NOT NULL,
                servings INTEGER NOT NULL CHECK (servings > 0),
                prep_minutes INTEGER NOT NULL CHECK (prep_minutes >= 0),
                cook_minutes INTEGER NOT NULL CHECK (cook_minutes >= 0),
                difficulty TEXT NOT NULL DEFAULT 'medium'
                    CHECK (difficulty IN ('easy', 'medium', 'hard')),
                instructions TEXT NOT NULL,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (recipe_id, version_number)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id TEXT PRIMARY KEY,
                version_id TEXT NOT NULL REFERENCES recipe_versions(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                quantity REAL NOT NULL CHECK (quantity > 0),
                unit TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                display_order INTEGER NOT NULL DEFAULT 0,
                is_optional INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                tag TEXT NOT NULL,
                PRIMARY KEY (recipe_id, tag)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_versions_recipe ON recipe_versions(recipe_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_version ON recipe_ingredients(version_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_is_deleted ON recipes(is_deleted)")
            .execute(&self.pool)
            .await
            .map_err(map_migrate)?;

        Ok(())
    }

    /// Create inventory item and history tables
    async fn migrate_inventory(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS inventory_items (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                quantity REAL NOT NULL DEFAULT 0 CHECK (quantity >= 0),
                unit TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                expiration_date TEXT,
                minimum_stock REAL NOT NULL DEFAULT 0 CHECK (minimum_stock >= 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS inventory_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id TEXT NOT NULL REFERENCES inventory_items(id) ON DELETE CASCADE,
                quantity_before REAL NOT NULL,
                quantity_after REAL NOT NULL,
                change_type TEXT NOT NULL CHECK (change_type IN
                    ('purchased', 'used', 'expired', 'adjusted', 'auto_deducted')),
                recipe_id TEXT,
                changed_by TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_inventory_history_item ON inventory_history(item_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        Ok(())
    }

    /// Create the ratings table
    async fn migrate_ratings(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ratings (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                is_positive INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (recipe_id, user_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        Ok(())
    }

    /// Create menu plan and planned meal tables
    async fn migrate_menu_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS menu_plans (
                id TEXT PRIMARY KEY,
                week_start TEXT NOT NULL,
                name TEXT,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (week_start, created_by)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS planned_meals (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL REFERENCES menu_plans(id) ON DELETE CASCADE,
                recipe_id TEXT NOT NULL REFERENCES recipes(id),
                meal_date TEXT NOT NULL,
                meal_type TEXT NOT NULL
                    CHECK (meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')),
                servings_planned INTEGER NOT NULL CHECK (servings_planned > 0),
                cooked INTEGER NOT NULL DEFAULT 0,
                cooked_date TEXT,
                cooked_by TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_migrate)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_planned_meals_plan ON planned_meals(plan_id)")
            .execute(&self.pool)
            .await
            .map_err(map_migrate)?;

        Ok(())
    }
}

fn map_migrate(e: sqlx::Error) -> AppError {
    AppError::database(format!("Migration failed: {e}"))
}
