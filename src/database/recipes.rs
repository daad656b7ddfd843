// ABOUTME: Recipe store database operations with append-only version history
// ABOUTME: Create/update/revert always write a new version; old versions are immutable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{NaiveDate, Utc};
use potager_core::errors::{AppError, AppResult};
use potager_core::models::{
    CreateRecipeRequest, Difficulty, IngredientInput, Recipe, RecipeDetail, RecipeIngredient,
    RecipeVersion,
};
use potager_engine::SuggestionCandidate;
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::row::{parse_date_opt, parse_datetime, parse_uuid};

/// The single active-recipe predicate. Every listing and suggestion read
/// path filters through this fragment so the soft-delete exclusion rule
/// cannot be forgotten in a new query.
const ACTIVE_RECIPE_PREDICATE: &str = "r.is_deleted = 0";

/// Filter options for listing recipes
#[derive(Debug, Clone, Default)]
pub struct ListRecipesFilter {
    /// Only recipes carrying this tag
    pub tag: Option<String>,
    /// Only recipes whose title contains this substring (case-insensitive)
    pub title_contains: Option<String>,
}

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate a create/update request before any write
    fn validate(request: &CreateRecipeRequest) -> AppResult<()> {
        if request.title.trim().is_empty() {
            return Err(AppError::invalid_input("Recipe title must not be empty"));
        }
        if request.servings <= 0 {
            return Err(AppError::out_of_range("Servings must be greater than zero"));
        }
        if request.prep_minutes < 0 || request.cook_minutes < 0 {
            return Err(AppError::out_of_range("Prep and cook minutes must not be negative"));
        }
        if request.ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "A recipe version requires at least one ingredient",
            ));
        }
        if request.instructions.iter().all(|step| step.trim().is_empty()) {
            return Err(AppError::invalid_input(
                "A recipe version requires at least one instruction step",
            ));
        }
        for ingredient in &request.ingredients {
            if ingredient.name.trim().is_empty() {
                return Err(AppError::invalid_input("Ingredient names must not be empty"));
            }
            if ingredient.quantity <= 0.0 {
                return Err(AppError::out_of_range(format!(
                    "Ingredient '{}' must have a quantity greater than zero",
                    ingredient.name
                )));
            }
        }
        Ok(())
    }

    /// Create a recipe at version 1 with its ingredients and tags
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed input, or a database error
    /// if any write fails (nothing is persisted in that case)
    pub async fn create(
        &self,
        request: &CreateRecipeRequest,
        actor: Uuid,
    ) -> AppResult<RecipeDetail> {
        Self::validate(request)?;

        let now = Utc::now();
        let recipe_id = Uuid::new_v4();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, description, created_by, current_version,
                is_deleted, last_cooked_date, times_cooked, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, 1, 0, NULL, 0, $5, $5)
            ",
        )
        .bind(recipe_id.to_string())
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(actor.to_string())
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        Self::insert_version(&mut tx, recipe_id, 1, request, actor).await?;

        for tag in &request.tags {
            sqlx::query("INSERT OR IGNORE INTO recipe_tags (recipe_id, tag) VALUES ($1, $2)")
                .bind(recipe_id.to_string())
                .bind(tag.trim())
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to tag recipe: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        debug!(recipe_id = %recipe_id, title = %request.title, "created recipe");

        self.get(recipe_id).await
    }

    /// Create the next version of a recipe from a full snapshot.
    ///
    /// The prior version is retained unchanged; `current_version` advances
    /// to the new version number.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown recipe, a validation error for
    /// malformed input, or a database error if any write fails
    pub async fn update(
        &self,
        recipe_id: Uuid,
        request: &CreateRecipeRequest,
        actor: Uuid,
    ) -> AppResult<RecipeDetail> {
        Self::validate(request)?;

        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let recipe = Self::fetch_recipe(&mut tx, recipe_id).await?;
        let next_version = recipe.current_version + 1;

        Self::insert_version(&mut tx, recipe_id, next_version, request, actor).await?;

        sqlx::query(
            r"
            UPDATE recipes
            SET title = $1, description = $2, current_version = $3, updated_at = $4
            WHERE id = $5
            ",
        )
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(next_version)
        .bind(now.to_rfc3339())
        .bind(recipe_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to advance recipe version: {e}")))?;

        // Tags are per-recipe, not per-version: replace with the new set
        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(recipe_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear recipe tags: {e}")))?;
        for tag in &request.tags {
            sqlx::query("INSERT OR IGNORE INTO recipe_tags (recipe_id, tag) VALUES ($1, $2)")
                .bind(recipe_id.to_string())
                .bind(tag.trim())
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to tag recipe: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe update: {e}")))?;

        debug!(recipe_id = %recipe_id, version = next_version, "updated recipe");

        self.get(recipe_id).await
    }

    /// Copy an old version's content into a brand-new version number.
    ///
    /// History stays append-only: the target version is never rewritten or
    /// renumbered. Reverting to the current version is a no-op returning the
    /// current state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown recipe or version, or a database
    /// error if any write fails
    pub async fn revert_to_version(
        &self,
        recipe_id: Uuid,
        target_version: i64,
        actor: Uuid,
    ) -> AppResult<RecipeDetail> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let recipe = Self::fetch_recipe(&mut tx, recipe_id).await?;
        if target_version == recipe.current_version {
            drop(tx);
            return self.get(recipe_id).await;
        }

        let (version, ingredients) =
            Self::fetch_version(&mut tx, recipe_id, target_version).await?;

        let next_version = recipe.current_version + 1;
        let request = CreateRecipeRequest {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            servings: version.servings,
            prep_minutes: version.prep_minutes,
            cook_minutes: version.cook_minutes,
            difficulty: version.difficulty,
            ingredients: ingredients
                .into_iter()
                .map(|i| IngredientInput {
                    name: i.name,
                    quantity: i.quantity,
                    unit: i.unit,
                    category: i.category,
                    is_optional: i.is_optional,
                })
                .collect(),
            instructions: version.instructions,
            tags: Vec::new(),
        };
        Self::insert_version(&mut tx, recipe_id, next_version, &request, actor).await?;

        sqlx::query("UPDATE recipes SET current_version = $1, updated_at = $2 WHERE id = $3")
            .bind(next_version)
            .bind(now.to_rfc3339())
            .bind(recipe_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to advance recipe version: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit revert: {e}")))?;

        debug!(
            recipe_id = %recipe_id,
            from = target_version,
            to = next_version,
            "reverted recipe"
        );

        self.get(recipe_id).await
    }

    /// Soft-delete a recipe.
    ///
    /// The record and all versions remain queryable for plans and history
    /// that reference them, but the recipe disappears from listings and
    /// suggestions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown recipe
    pub async fn soft_delete(&self, recipe_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE recipes SET is_deleted = 1, updated_at = $1 WHERE id = $2")
            .bind(Utc::now().to_rfc3339())
            .bind(recipe_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        debug!(recipe_id = %recipe_id, "soft-deleted recipe");
        Ok(())
    }

    /// Get a recipe with its current version, ingredients, and tags.
    ///
    /// Soft-deleted recipes are returned too - menu plans and inventory
    /// history may still reference them.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown recipe
    pub async fn get(&self, recipe_id: Uuid) -> AppResult<RecipeDetail> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, created_by, current_version, is_deleted,
                   last_cooked_date, times_cooked, created_at, updated_at
            FROM recipes WHERE id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        let recipe = row
            .as_ref()
            .map(row_to_recipe)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        let (version, ingredients) = self
            .get_version(recipe_id, recipe.current_version)
            .await?;
        let tags = self.list_tags(recipe_id).await?;

        Ok(RecipeDetail {
            recipe,
            version,
            ingredients,
            tags,
        })
    }

    /// Get one version of a recipe with its ingredients
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown recipe/version pair
    pub async fn get_version(
        &self,
        recipe_id: Uuid,
        version_number: i64,
    ) -> AppResult<(RecipeVersion, Vec<RecipeIngredient>)> {
        let row = sqlx::query(
            r"
            SELECT id, recipe_id, version_number, servings, prep_minutes, cook_minutes,
                   difficulty, instructions, created_by, created_at
            FROM recipe_versions WHERE recipe_id = $1 AND version_number = $2
            ",
        )
        .bind(recipe_id.to_string())
        .bind(version_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe version: {e}")))?;

        let version = row
            .as_ref()
            .map(row_to_version)
            .transpose()?
            .ok_or_else(|| {
                AppError::not_found(format!("Version {version_number} of recipe {recipe_id}"))
            })?;

        let ingredients = self.list_ingredients(version.id).await?;
        Ok((version, ingredients))
    }

    /// List all versions of a recipe, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_versions(&self, recipe_id: Uuid) -> AppResult<Vec<RecipeVersion>> {
        let rows = sqlx::query(
            r"
            SELECT id, recipe_id, version_number, servings, prep_minutes, cook_minutes,
                   difficulty, instructions, created_by, created_at
            FROM recipe_versions WHERE recipe_id = $1
            ORDER BY version_number
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list versions: {e}")))?;

        rows.iter().map(row_to_version).collect()
    }

    /// List active (non-deleted) recipes with optional tag and title filters
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_active(&self, filter: &ListRecipesFilter) -> AppResult<Vec<Recipe>> {
        let tag_filter = if filter.tag.is_some() {
            "AND r.id IN (SELECT recipe_id FROM recipe_tags WHERE tag = ?)"
        } else {
            ""
        };
        let title_filter = if filter.title_contains.is_some() {
            "AND LOWER(r.title) LIKE ?"
        } else {
            ""
        };
        let query = format!(
            r"
            SELECT r.id, r.title, r.description, r.created_by, r.current_version, r.is_deleted,
                   r.last_cooked_date, r.times_cooked, r.created_at, r.updated_at
            FROM recipes r
            WHERE {ACTIVE_RECIPE_PREDICATE}
            {tag_filter}
            {title_filter}
            ORDER BY r.title
            "
        );

        let mut statement = sqlx::query(&query);
        if let Some(tag) = &filter.tag {
            statement = statement.bind(tag.clone());
        }
        if let Some(title) = &filter.title_contains {
            statement = statement.bind(format!("%{}%", title.to_lowercase()));
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// List a recipe's tags, alphabetically
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_tags(&self, recipe_id: Uuid) -> AppResult<Vec<String>> {
        let rows = sqlx::query("SELECT tag FROM recipe_tags WHERE recipe_id = $1 ORDER BY tag")
            .bind(recipe_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list tags: {e}")))?;
        Ok(rows.iter().map(|r| r.get("tag")).collect())
    }

    /// Load every active recipe as a suggestion candidate: current-version
    /// timing and ingredients, tags, and rating counts.
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails
    pub async fn suggestion_candidates(&self) -> AppResult<Vec<SuggestionCandidate>> {
        let recipe_rows = sqlx::query(&format!(
            r"
            SELECT r.id, r.title, r.created_at, r.last_cooked_date, r.times_cooked,
                   rv.prep_minutes + rv.cook_minutes AS total_minutes
            FROM recipes r
            JOIN recipe_versions rv
              ON rv.recipe_id = r.id AND rv.version_number = r.current_version
            WHERE {ACTIVE_RECIPE_PREDICATE}
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load candidates: {e}")))?;

        let ingredient_rows = sqlx::query(&format!(
            r"
            SELECT rv.recipe_id, ri.name
            FROM recipe_ingredients ri
            JOIN recipe_versions rv ON ri.version_id = rv.id
            JOIN recipes r
              ON rv.recipe_id = r.id AND rv.version_number = r.current_version
            WHERE {ACTIVE_RECIPE_PREDICATE}
            ORDER BY ri.display_order
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load candidate ingredients: {e}")))?;

        let tag_rows = sqlx::query(&format!(
            r"
            SELECT rt.recipe_id, rt.tag
            FROM recipe_tags rt
            JOIN recipes r ON rt.recipe_id = r.id
            WHERE {ACTIVE_RECIPE_PREDICATE}
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load candidate tags: {e}")))?;

        let rating_rows = sqlx::query(
            r"
            SELECT recipe_id, COUNT(*) AS total, SUM(is_positive) AS thumbs_up
            FROM ratings GROUP BY recipe_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load candidate ratings: {e}")))?;

        let mut ingredients_by_recipe: HashMap<String, Vec<String>> = HashMap::new();
        for row in &ingredient_rows {
            let recipe_id: String = row.get("recipe_id");
            ingredients_by_recipe
                .entry(recipe_id)
                .or_default()
                .push(row.get("name"));
        }
        let mut tags_by_recipe: HashMap<String, Vec<String>> = HashMap::new();
        for row in &tag_rows {
            let recipe_id: String = row.get("recipe_id");
            tags_by_recipe.entry(recipe_id).or_default().push(row.get("tag"));
        }
        let mut ratings_by_recipe: HashMap<String, (u32, u32)> = HashMap::new();
        for row in &rating_rows {
            let recipe_id: String = row.get("recipe_id");
            let total: i64 = row.get("total");
            let thumbs_up: i64 = row.try_get("thumbs_up").unwrap_or(0);
            ratings_by_recipe.insert(recipe_id, (total as u32, thumbs_up as u32));
        }

        recipe_rows
            .iter()
            .map(|row| {
                let id_str: String = row.get("id");
                let created_at_str: String = row.get("created_at");
                let last_cooked_str: Option<String> = row.get("last_cooked_date");
                let (ratings_total, ratings_up) =
                    ratings_by_recipe.get(&id_str).copied().unwrap_or((0, 0));
                Ok(SuggestionCandidate {
                    recipe_id: parse_uuid(&id_str, "recipes.id")?,
                    title: row.get("title"),
                    created_at: parse_datetime(&created_at_str, "recipes.created_at")?,
                    last_cooked_date: parse_date_opt(
                        last_cooked_str.as_deref(),
                        "recipes.last_cooked_date",
                    )?,
                    times_cooked: row.get("times_cooked"),
                    total_minutes: row.get("total_minutes"),
                    ingredient_names: ingredients_by_recipe.remove(&id_str).unwrap_or_default(),
                    tags: tags_by_recipe.remove(&id_str).unwrap_or_default(),
                    ratings_total,
                    ratings_up,
                })
            })
            .collect()
    }

    /// Bump cook statistics inside the cook-transition transaction
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown recipe
    pub async fn record_cooked(
        tx: &mut Transaction<'_, Sqlite>,
        recipe_id: Uuid,
        cooked_on: NaiveDate,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE recipes
            SET times_cooked = times_cooked + 1, last_cooked_date = $1, updated_at = $2
            WHERE id = $3
            ",
        )
        .bind(cooked_on.to_string())
        .bind(Utc::now().to_rfc3339())
        .bind(recipe_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to record cook: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        Ok(())
    }

    /// Load the recipe row inside a transaction
    async fn fetch_recipe(
        tx: &mut Transaction<'_, Sqlite>,
        recipe_id: Uuid,
    ) -> AppResult<Recipe> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, created_by, current_version, is_deleted,
                   last_cooked_date, times_cooked, created_at, updated_at
            FROM recipes WHERE id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.as_ref()
            .map(row_to_recipe)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
    }

    /// Load one version and its ingredients inside a transaction
    async fn fetch_version(
        tx: &mut Transaction<'_, Sqlite>,
        recipe_id: Uuid,
        version_number: i64,
    ) -> AppResult<(RecipeVersion, Vec<RecipeIngredient>)> {
        let row = sqlx::query(
            r"
            SELECT id, recipe_id, version_number, servings, prep_minutes, cook_minutes,
                   difficulty, instructions, created_by, created_at
            FROM recipe_versions WHERE recipe_id = $1 AND version_number = $2
            ",
        )
        .bind(recipe_id.to_string())
        .bind(version_number)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe version: {e}")))?;

        let version = row
            .as_ref()
            .map(row_to_version)
            .transpose()?
            .ok_or_else(|| {
                AppError::not_found(format!("Version {version_number} of recipe {recipe_id}"))
            })?;

        let rows = sqlx::query(
            r"
            SELECT id, version_id, name, quantity, unit, category, display_order, is_optional
            FROM recipe_ingredients WHERE version_id = $1
            ORDER BY display_order
            ",
        )
        .bind(version.id.to_string())
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        let ingredients = rows.iter().map(row_to_ingredient).collect::<AppResult<_>>()?;
        Ok((version, ingredients))
    }

    /// Write one immutable version row plus its ingredient rows
    async fn insert_version(
        tx: &mut Transaction<'_, Sqlite>,
        recipe_id: Uuid,
        version_number: i64,
        request: &CreateRecipeRequest,
        actor: Uuid,
    ) -> AppResult<()> {
        let now = Utc::now();
        let version_id = Uuid::new_v4();
        let instructions_json = serde_json::to_string(&request.instructions)?;

        sqlx::query(
            r"
            INSERT INTO recipe_versions (
                id, recipe_id, version_number, servings, prep_minutes, cook_minutes,
                difficulty, instructions, created_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(version_id.to_string())
        .bind(recipe_id.to_string())
        .bind(version_number)
        .bind(request.servings)
        .bind(request.prep_minutes)
        .bind(request.cook_minutes)
        .bind(request.difficulty.as_str())
        .bind(&instructions_json)
        .bind(actor.to_string())
        .bind(now.to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe version: {e}")))?;

        for (order, input) in request.ingredients.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO recipe_ingredients (
                    id, version_id, name, quantity, unit, category, display_order, is_optional
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(version_id.to_string())
            .bind(input.name.trim())
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(&input.category)
            .bind(order as i64)
            .bind(input.is_optional)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to add ingredient: {e}")))?;
        }

        Ok(())
    }

    /// List one version's ingredients in display order
    async fn list_ingredients(&self, version_id: Uuid) -> AppResult<Vec<RecipeIngredient>> {
        let rows = sqlx::query(
            r"
            SELECT id, version_id, name, quantity, unit, category, display_order, is_optional
            FROM recipe_ingredients WHERE version_id = $1
            ORDER BY display_order
            ",
        )
        .bind(version_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }
}

fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let id_str: String = row.get("id");
    let created_by_str: String = row.get("created_by");
    let last_cooked_str: Option<String> = row.get("last_cooked_date");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");
    let is_deleted: i64 = row.get("is_deleted");

    Ok(Recipe {
        id: parse_uuid(&id_str, "recipes.id")?,
        title: row.get("title"),
        description: row.get("description"),
        created_by: parse_uuid(&created_by_str, "recipes.created_by")?,
        current_version: row.get("current_version"),
        is_deleted: is_deleted == 1,
        last_cooked_date: parse_date_opt(last_cooked_str.as_deref(), "recipes.last_cooked_date")?,
        times_cooked: row.get("times_cooked"),
        created_at: parse_datetime(&created_at_str, "recipes.created_at")?,
        updated_at: parse_datetime(&updated_at_str, "recipes.updated_at")?,
    })
}

fn row_to_version(row: &SqliteRow) -> AppResult<RecipeVersion> {
    let id_str: String = row.get("id");
    let recipe_id_str: String = row.get("recipe_id");
    let difficulty_str: String = row.get("difficulty");
    let instructions_json: String = row.get("instructions");
    let created_by_str: String = row.get("created_by");
    let created_at_str: String = row.get("created_at");

    let instructions: Vec<String> = serde_json::from_str(&instructions_json)?;

    Ok(RecipeVersion {
        id: parse_uuid(&id_str, "recipe_versions.id")?,
        recipe_id: parse_uuid(&recipe_id_str, "recipe_versions.recipe_id")?,
        version_number: row.get("version_number"),
        servings: row.get("servings"),
        prep_minutes: row.get("prep_minutes"),
        cook_minutes: row.get("cook_minutes"),
        difficulty: Difficulty::parse(&difficulty_str),
        instructions,
        created_by: parse_uuid(&created_by_str, "recipe_versions.created_by")?,
        created_at: parse_datetime(&created_at_str, "recipe_versions.created_at")?,
    })
}

fn row_to_ingredient(row: &SqliteRow) -> AppResult<RecipeIngredient> {
    let id_str: String = row.get("id");
    let version_id_str: String = row.get("version_id");
    let is_optional: i64 = row.get("is_optional");

    Ok(RecipeIngredient {
        id: parse_uuid(&id_str, "recipe_ingredients.id")?,
        version_id: parse_uuid(&version_id_str, "recipe_ingredients.version_id")?,
        name: row.get("name"),
        quantity: row.get("quantity"),
        unit: row.get("unit"),
        category: row.get("category"),
        display_order: row.get("display_order"),
        is_optional: is_optional == 1,
    })
}
