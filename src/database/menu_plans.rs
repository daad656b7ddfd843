// ABOUTME: Menu plan database operations - weekly plans and their meal slots
// ABOUTME: Week starts are validated as Mondays; cooked meals keep their history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{DateTime, Datelike, Days, Utc, Weekday};
use potager_core::errors::{AppError, AppResult};
use potager_core::models::{
    AddPlannedMealRequest, CreateMenuPlanRequest, MealType, MenuPlan, PlannedMeal,
};
use potager_engine::shopping_list::{MealIngredientLine, MealIngredients};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::row::{parse_date, parse_datetime, parse_datetime_opt, parse_uuid, parse_uuid_opt};

/// Menu plan database operations manager
pub struct MenuPlansManager {
    pool: SqlitePool,
}

impl MenuPlansManager {
    /// Create a new menu plans manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a weekly menu plan
    ///
    /// # Errors
    ///
    /// Returns a validation error when `week_start` is not a Monday, a
    /// conflict error when the user already has a plan for that week, or a
    /// database error if the write fails
    pub async fn create(&self, request: &CreateMenuPlanRequest, actor: Uuid) -> AppResult<MenuPlan> {
        if request.week_start.weekday() != Weekday::Mon {
            return Err(AppError::invalid_input(format!(
                "Week start {} is not a Monday",
                request.week_start
            )));
        }

        let plan_id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO menu_plans (id, week_start, name, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(plan_id.to_string())
        .bind(request.week_start.to_string())
        .bind(&request.name)
        .bind(actor.to_string())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::conflict(
                format!("A plan for the week of {} already exists", request.week_start),
            ),
            _ => AppError::database(format!("Failed to create menu plan: {e}")),
        })?;

        debug!(plan_id = %plan_id, week_start = %request.week_start, "created menu plan");

        Ok(MenuPlan {
            id: plan_id,
            week_start: request.week_start,
            name: request.name.clone(),
            created_by: actor,
            created_at: now,
        })
    }

    /// Get a menu plan by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown plan
    pub async fn get(&self, plan_id: Uuid) -> AppResult<MenuPlan> {
        let row = sqlx::query(
            "SELECT id, week_start, name, created_by, created_at FROM menu_plans WHERE id = $1",
        )
        .bind(plan_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get menu plan: {e}")))?;

        row.as_ref()
            .map(row_to_plan)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Menu plan {plan_id}")))
    }

    /// Add a meal slot to a plan
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown plan or recipe, and a validation
    /// error when the recipe is deleted, the date falls outside the plan
    /// week, or servings are not positive
    pub async fn add_meal(
        &self,
        plan_id: Uuid,
        request: &AddPlannedMealRequest,
    ) -> AppResult<PlannedMeal> {
        if request.servings_planned <= 0 {
            return Err(AppError::out_of_range(
                "Planned servings must be greater than zero",
            ));
        }

        let plan = self.get(plan_id).await?;
        let week_end = plan
            .week_start
            .checked_add_days(Days::new(6))
            .ok_or_else(|| AppError::out_of_range("Plan week overflows the calendar"))?;
        if request.meal_date < plan.week_start || request.meal_date > week_end {
            return Err(AppError::invalid_input(format!(
                "Meal date {} is outside the plan week starting {}",
                request.meal_date, plan.week_start
            )));
        }

        let recipe_row = sqlx::query("SELECT is_deleted FROM recipes WHERE id = $1")
            .bind(request.recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?;
        let Some(recipe_row) = recipe_row else {
            return Err(AppError::not_found(format!("Recipe {}", request.recipe_id)));
        };
        let is_deleted: i64 = recipe_row.get("is_deleted");
        if is_deleted == 1 {
            return Err(AppError::invalid_input(
                "Deleted recipes cannot be planned",
            ));
        }

        let meal_id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO planned_meals (
                id, plan_id, recipe_id, meal_date, meal_type,
                servings_planned, cooked, cooked_date, cooked_by
            ) VALUES ($1, $2, $3, $4, $5, $6, 0, NULL, NULL)
            ",
        )
        .bind(meal_id.to_string())
        .bind(plan_id.to_string())
        .bind(request.recipe_id.to_string())
        .bind(request.meal_date.to_string())
        .bind(request.meal_type.as_str())
        .bind(request.servings_planned)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add planned meal: {e}")))?;

        debug!(meal_id = %meal_id, plan_id = %plan_id, "added planned meal");

        self.get_meal(meal_id).await
    }

    /// Get a planned meal by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown meal
    pub async fn get_meal(&self, meal_id: Uuid) -> AppResult<PlannedMeal> {
        let row = sqlx::query(
            r"
            SELECT id, plan_id, recipe_id, meal_date, meal_type,
                   servings_planned, cooked, cooked_date, cooked_by
            FROM planned_meals WHERE id = $1
            ",
        )
        .bind(meal_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get planned meal: {e}")))?;

        row.as_ref()
            .map(row_to_meal)
            .transpose()?
            .ok_or_else(|| AppError::not_found(format!("Planned meal {meal_id}")))
    }

    /// List a plan's meals, by date then meal type
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_meals(&self, plan_id: Uuid) -> AppResult<Vec<PlannedMeal>> {
        let rows = sqlx::query(
            r"
            SELECT id, plan_id, recipe_id, meal_date, meal_type,
                   servings_planned, cooked, cooked_date, cooked_by
            FROM planned_meals
            WHERE plan_id = $1
            ORDER BY meal_date, meal_type
            ",
        )
        .bind(plan_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list planned meals: {e}")))?;

        rows.iter().map(row_to_meal).collect()
    }

    /// Remove an uncooked meal slot from its plan.
    ///
    /// Cooked meals are kept - they are part of the cooking history and
    /// already drove inventory deductions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown meal and a validation error for a
    /// cooked one
    pub async fn remove_meal(&self, meal_id: Uuid) -> AppResult<()> {
        let meal = self.get_meal(meal_id).await?;
        if meal.cooked {
            return Err(AppError::invalid_input(
                "Cooked meals cannot be removed from a plan",
            ));
        }
        sqlx::query("DELETE FROM planned_meals WHERE id = $1")
            .bind(meal_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove planned meal: {e}")))?;
        Ok(())
    }

    /// Load the uncooked meals of a plan with their current-version
    /// ingredients, shaped for the shopping-list aggregator.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown plan
    pub async fn shopping_rows(&self, plan_id: Uuid) -> AppResult<Vec<MealIngredients>> {
        // Existence check so an unknown plan is NotFound, not an empty list
        self.get(plan_id).await?;

        let rows = sqlx::query(
            r"
            SELECT pm.id AS meal_id, pm.servings_planned, rv.servings AS version_servings,
                   ri.name, ri.quantity, ri.unit, ri.category, ri.is_optional
            FROM planned_meals pm
            JOIN recipes r ON pm.recipe_id = r.id
            JOIN recipe_versions rv
              ON rv.recipe_id = r.id AND rv.version_number = r.current_version
            JOIN recipe_ingredients ri ON ri.version_id = rv.id
            WHERE pm.plan_id = $1 AND pm.cooked = 0
            ORDER BY pm.id, ri.display_order
            ",
        )
        .bind(plan_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load shopping rows: {e}")))?;

        let mut meals: HashMap<String, MealIngredients> = HashMap::new();
        for row in &rows {
            let meal_id: String = row.get("meal_id");
            let is_optional: i64 = row.get("is_optional");
            let entry = meals.entry(meal_id).or_insert_with(|| MealIngredients {
                cooked: false,
                servings_planned: row.get("servings_planned"),
                version_servings: row.get("version_servings"),
                ingredients: Vec::new(),
            });
            entry.ingredients.push(MealIngredientLine {
                name: row.get("name"),
                quantity: row.get("quantity"),
                unit: row.get("unit"),
                category: row.get("category"),
                is_optional: is_optional == 1,
            });
        }

        Ok(meals.into_values().collect())
    }

    /// Flip a meal to cooked inside the cook-transition transaction.
    ///
    /// Test-and-set: the `cooked = 0` guard in the UPDATE makes the check
    /// and the flip one atomic statement, so a concurrent caller observes
    /// zero affected rows and short-circuits instead of deducting twice.
    /// Returns `false` when the meal was already cooked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn set_cooked(
        tx: &mut Transaction<'_, Sqlite>,
        meal_id: Uuid,
        actor: Uuid,
        cooked_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE planned_meals
            SET cooked = 1, cooked_date = $1, cooked_by = $2
            WHERE id = $3 AND cooked = 0
            ",
        )
        .bind(cooked_at.to_rfc3339())
        .bind(actor.to_string())
        .bind(meal_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to mark meal cooked: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_plan(row: &SqliteRow) -> AppResult<MenuPlan> {
    let id_str: String = row.get("id");
    let week_start_str: String = row.get("week_start");
    let created_by_str: String = row.get("created_by");
    let created_at_str: String = row.get("created_at");

    Ok(MenuPlan {
        id: parse_uuid(&id_str, "menu_plans.id")?,
        week_start: parse_date(&week_start_str, "menu_plans.week_start")?,
        name: row.get("name"),
        created_by: parse_uuid(&created_by_str, "menu_plans.created_by")?,
        created_at: parse_datetime(&created_at_str, "menu_plans.created_at")?,
    })
}

fn row_to_meal(row: &SqliteRow) -> AppResult<PlannedMeal> {
    let id_str: String = row.get("id");
    let plan_id_str: String = row.get("plan_id");
    let recipe_id_str: String = row.get("recipe_id");
    let meal_date_str: String = row.get("meal_date");
    let meal_type_str: String = row.get("meal_type");
    let cooked: i64 = row.get("cooked");
    let cooked_date_str: Option<String> = row.get("cooked_date");
    let cooked_by_str: Option<String> = row.get("cooked_by");

    Ok(PlannedMeal {
        id: parse_uuid(&id_str, "planned_meals.id")?,
        plan_id: parse_uuid(&plan_id_str, "planned_meals.plan_id")?,
        recipe_id: parse_uuid(&recipe_id_str, "planned_meals.recipe_id")?,
        meal_date: parse_date(&meal_date_str, "planned_meals.meal_date")?,
        meal_type: MealType::parse(&meal_type_str),
        servings_planned: row.get("servings_planned"),
        cooked: cooked == 1,
        cooked_date: parse_datetime_opt(cooked_date_str.as_deref(), "planned_meals.cooked_date")?,
        cooked_by: parse_uuid_opt(cooked_by_str.as_deref(), "planned_meals.cooked_by")?,
    })
}
