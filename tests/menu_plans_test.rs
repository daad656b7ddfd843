// ABOUTME: Integration tests for menu plan creation and meal slot management
// ABOUTME: Monday validation, week bounds, duplicate-week conflicts, removal rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{add_dinner, create_plan, create_recipe, create_test_database, recipe_request};
use potager_core::errors::ErrorCode;
use potager_core::models::{AddPlannedMealRequest, CreateMenuPlanRequest, MealType};
use potager_server::services::CookTransitionCoordinator;
use uuid::Uuid;

#[tokio::test]
async fn test_week_start_must_be_monday() {
    let db = create_test_database().await;
    let err = db
        .menu_plans()
        .create(
            &CreateMenuPlanRequest {
                // 2025-06-04 is a Wednesday
                week_start: "2025-06-04".parse().unwrap(),
                name: None,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_duplicate_week_for_same_user_conflicts() {
    let db = create_test_database().await;
    let plans = db.menu_plans();
    let actor = Uuid::new_v4();
    let request = CreateMenuPlanRequest {
        week_start: "2025-06-02".parse().unwrap(),
        name: None,
    };

    plans.create(&request, actor).await.unwrap();
    let err = plans.create(&request, actor).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceConflict);

    // A different user can plan the same week
    plans.create(&request, Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_meal_date_must_fall_within_the_week() {
    let db = create_test_database().await;
    let recipe = create_recipe(&db, &recipe_request("Quiche")).await;
    let plan = create_plan(&db).await;

    let err = db
        .menu_plans()
        .add_meal(
            plan.id,
            &AddPlannedMealRequest {
                recipe_id: recipe.recipe.id,
                // The Monday after the plan week
                meal_date: "2025-06-09".parse().unwrap(),
                meal_type: MealType::Dinner,
                servings_planned: 2,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // Sunday of the same week is fine
    db.menu_plans()
        .add_meal(
            plan.id,
            &AddPlannedMealRequest {
                recipe_id: recipe.recipe.id,
                meal_date: "2025-06-08".parse().unwrap(),
                meal_type: MealType::Dinner,
                servings_planned: 2,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deleted_recipes_cannot_be_planned() {
    let db = create_test_database().await;
    let recipe = create_recipe(&db, &recipe_request("Retired Dish")).await;
    db.recipes().soft_delete(recipe.recipe.id).await.unwrap();
    let plan = create_plan(&db).await;

    let err = db
        .menu_plans()
        .add_meal(
            plan.id,
            &AddPlannedMealRequest {
                recipe_id: recipe.recipe.id,
                meal_date: plan.week_start,
                meal_type: MealType::Lunch,
                servings_planned: 2,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_remove_meal_keeps_cooked_history() {
    let db = create_test_database().await;
    let recipe = create_recipe(&db, &recipe_request("Tagine")).await;
    let plan = create_plan(&db).await;
    let uncooked = add_dinner(&db, &plan, recipe.recipe.id, 2).await;
    let cooked = add_dinner(&db, &plan, recipe.recipe.id, 2).await;

    CookTransitionCoordinator::new(db.clone())
        .mark_cooked(cooked.id, Uuid::new_v4())
        .await
        .unwrap();

    db.menu_plans().remove_meal(uncooked.id).await.unwrap();
    let err = db.menu_plans().remove_meal(cooked.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let remaining = db.menu_plans().list_meals(plan.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].cooked);
}

#[tokio::test]
async fn test_cooked_date_set_iff_cooked() {
    let db = create_test_database().await;
    let recipe = create_recipe(&db, &recipe_request("Bibimbap")).await;
    let plan = create_plan(&db).await;
    let meal = add_dinner(&db, &plan, recipe.recipe.id, 2).await;

    assert!(!meal.cooked);
    assert!(meal.cooked_date.is_none());
    assert!(meal.cooked_by.is_none());

    let outcome = CookTransitionCoordinator::new(db.clone())
        .mark_cooked(meal.id, Uuid::new_v4())
        .await
        .unwrap();
    assert!(outcome.meal.cooked);
    assert!(outcome.meal.cooked_date.is_some());
}
