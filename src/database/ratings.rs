// ABOUTME: Rating database operations - one thumbs up/down row per (recipe, user)
// ABOUTME: Upserts close the concurrent-vote race via the primary key constraint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::Utc;
use potager_core::errors::{AppError, AppResult};
use potager_core::models::Rating;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::row::{parse_datetime, parse_uuid};

/// Rating database operations manager
pub struct RatingsManager {
    pool: SqlitePool,
}

impl RatingsManager {
    /// Create a new ratings manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a user's vote on a recipe.
    ///
    /// Insert-or-update on the (recipe, user) primary key: two concurrent
    /// votes for the same pair collapse to one row rather than racing a
    /// separate existence check.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown recipe, or a database error if the
    /// write fails
    pub async fn upsert(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        is_positive: bool,
    ) -> AppResult<Rating> {
        let exists = sqlx::query("SELECT 1 FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?;
        if exists.is_none() {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO ratings (recipe_id, user_id, is_positive, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (recipe_id, user_id)
            DO UPDATE SET is_positive = excluded.is_positive, updated_at = excluded.updated_at
            ",
        )
        .bind(recipe_id.to_string())
        .bind(user_id.to_string())
        .bind(is_positive)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert rating: {e}")))?;

        debug!(recipe_id = %recipe_id, user_id = %user_id, is_positive, "recorded rating");

        let row = sqlx::query(
            r"
            SELECT recipe_id, user_id, is_positive, created_at, updated_at
            FROM ratings WHERE recipe_id = $1 AND user_id = $2
            ",
        )
        .bind(recipe_id.to_string())
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read back rating: {e}")))?;

        row_to_rating(&row)
    }

    /// All votes on a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn for_recipe(&self, recipe_id: Uuid) -> AppResult<Vec<Rating>> {
        let rows = sqlx::query(
            r"
            SELECT recipe_id, user_id, is_positive, created_at, updated_at
            FROM ratings WHERE recipe_id = $1
            ORDER BY created_at
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ratings: {e}")))?;

        rows.iter().map(row_to_rating).collect()
    }

    /// (total, thumbs up) vote counts for a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn counts(&self, recipe_id: Uuid) -> AppResult<(u32, u32)> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS total, COALESCE(SUM(is_positive), 0) AS thumbs_up
            FROM ratings WHERE recipe_id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count ratings: {e}")))?;

        let total: i64 = row.get("total");
        let thumbs_up: i64 = row.get("thumbs_up");
        Ok((total as u32, thumbs_up as u32))
    }
}

fn row_to_rating(row: &SqliteRow) -> AppResult<Rating> {
    let recipe_id_str: String = row.get("recipe_id");
    let user_id_str: String = row.get("user_id");
    let is_positive: i64 = row.get("is_positive");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(Rating {
        recipe_id: parse_uuid(&recipe_id_str, "ratings.recipe_id")?,
        user_id: parse_uuid(&user_id_str, "ratings.user_id")?,
        is_positive: is_positive == 1,
        created_at: parse_datetime(&created_at_str, "ratings.created_at")?,
        updated_at: parse_datetime(&updated_at_str, "ratings.updated_at")?,
    })
}
