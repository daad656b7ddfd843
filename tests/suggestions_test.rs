// ABOUTME: Integration tests for the suggestion pipeline over stored recipes
// ABOUTME: Strategy orderings, soft-delete exclusion, and inventory match scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use chrono::NaiveDate;
use common::{create_inventory_item, create_recipe, create_test_database, ingredient, recipe_request};
use potager_core::config::EngineConfig;
use potager_engine::suggestions::suggest;
use potager_engine::{InventoryIndex, SuggestionStrategy};
use potager_server::database::Database;
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

/// Set cook statistics directly, bypassing the cook transition
async fn set_cooked_stats(db: &Database, recipe_id: Uuid, times: i64, last: Option<NaiveDate>) {
    sqlx::query("UPDATE recipes SET times_cooked = $1, last_cooked_date = $2 WHERE id = $3")
        .bind(times)
        .bind(last.map(|d| d.to_string()))
        .bind(recipe_id.to_string())
        .execute(db.pool())
        .await
        .unwrap();
}

/// Load candidates and rank them with a fixed reference date
async fn rank(db: &Database, strategy: SuggestionStrategy) -> Vec<String> {
    let candidates = db.recipes().suggestion_candidates().await.unwrap();
    let items = db.inventory().list().await.unwrap();
    let inventory = InventoryIndex::from_items(items.iter().map(|i| (i.name.as_str(), i.quantity)));
    suggest(
        candidates,
        strategy,
        10,
        &EngineConfig::default(),
        today(),
        &inventory,
    )
    .into_iter()
    .map(|s| s.title)
    .collect()
}

#[tokio::test]
async fn test_rotation_orders_never_cooked_then_stalest() {
    let db = create_test_database().await;
    let a = create_recipe(&db, &recipe_request("Recipe A")).await;
    let b = create_recipe(&db, &recipe_request("Recipe B")).await;
    let c = create_recipe(&db, &recipe_request("Recipe C")).await;

    // A never cooked, B cooked 10 days ago, C cooked 40 days ago
    set_cooked_stats(&db, a.recipe.id, 0, None).await;
    set_cooked_stats(&db, b.recipe.id, 3, Some(today() - chrono::Days::new(10))).await;
    set_cooked_stats(&db, c.recipe.id, 5, Some(today() - chrono::Days::new(40))).await;

    let titles = rank(&db, SuggestionStrategy::Rotation).await;
    assert_eq!(titles, ["Recipe A", "Recipe C", "Recipe B"]);
}

#[tokio::test]
async fn test_soft_deleted_recipes_never_appear() {
    let db = create_test_database().await;
    let deleted = create_recipe(&db, &recipe_request("Deleted Favorite")).await;
    create_recipe(&db, &recipe_request("Plain Survivor")).await;

    // The deleted recipe would otherwise top every strategy
    for _ in 0..4 {
        db.ratings()
            .upsert(deleted.recipe.id, Uuid::new_v4(), true)
            .await
            .unwrap();
    }
    db.recipes().soft_delete(deleted.recipe.id).await.unwrap();

    for strategy in [
        SuggestionStrategy::Rotation,
        SuggestionStrategy::Favorites,
        SuggestionStrategy::NeverTried,
        SuggestionStrategy::AvailableInventory,
        SuggestionStrategy::Seasonal,
        SuggestionStrategy::QuickMeals,
    ] {
        let titles = rank(&db, strategy).await;
        assert!(
            !titles.iter().any(|t| t == "Deleted Favorite"),
            "deleted recipe surfaced under {strategy:?}"
        );
    }
}

#[tokio::test]
async fn test_available_inventory_match_percentage() {
    let db = create_test_database().await;

    let mut request = recipe_request("Big Pot");
    request.ingredients = (0..10)
        .map(|i| ingredient(&format!("item-{i}"), 1.0, "cups"))
        .collect();
    create_recipe(&db, &request).await;

    // 8 of the 10 ingredients stocked
    for i in 0..8 {
        create_inventory_item(&db, &format!("item-{i}"), 2.0).await;
    }

    let candidates = db.recipes().suggestion_candidates().await.unwrap();
    let items = db.inventory().list().await.unwrap();
    let inventory = InventoryIndex::from_items(items.iter().map(|i| (i.name.as_str(), i.quantity)));
    let ranked = suggest(
        candidates,
        SuggestionStrategy::AvailableInventory,
        10,
        &EngineConfig::default(),
        today(),
        &inventory,
    );

    assert_eq!(ranked.len(), 1);
    assert!((ranked[0].match_percentage.unwrap() - 80.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_seasonal_uses_reference_date() {
    let db = create_test_database().await;
    let mut request = recipe_request("June Salad");
    request.tags = vec!["summer".to_owned()];
    create_recipe(&db, &request).await;
    let mut request = recipe_request("October Soup");
    request.tags = vec!["fall".to_owned()];
    create_recipe(&db, &request).await;

    // Reference date June 15: only the summer recipe qualifies
    let titles = rank(&db, SuggestionStrategy::Seasonal).await;
    assert_eq!(titles, ["June Salad"]);
}

#[tokio::test]
async fn test_quick_meals_respects_total_time() {
    let db = create_test_database().await;
    let mut request = recipe_request("Fast Noodles");
    request.prep_minutes = 5;
    request.cook_minutes = 10;
    create_recipe(&db, &request).await;
    let mut request = recipe_request("Sunday Braise");
    request.prep_minutes = 30;
    request.cook_minutes = 120;
    create_recipe(&db, &request).await;

    let titles = rank(&db, SuggestionStrategy::QuickMeals).await;
    assert_eq!(titles, ["Fast Noodles"]);
}

#[tokio::test]
async fn test_candidates_use_current_version_timing() {
    let db = create_test_database().await;
    let mut request = recipe_request("Evolving Dish");
    request.prep_minutes = 60;
    request.cook_minutes = 60;
    let detail = create_recipe(&db, &request).await;

    // Nothing qualifies as quick yet
    assert!(rank(&db, SuggestionStrategy::QuickMeals).await.is_empty());

    // A new version brings it under the cutoff
    request.prep_minutes = 5;
    request.cook_minutes = 15;
    db.recipes()
        .update(detail.recipe.id, &request, Uuid::new_v4())
        .await
        .unwrap();

    let titles = rank(&db, SuggestionStrategy::QuickMeals).await;
    assert_eq!(titles, ["Evolving Dish"]);
}
