// ABOUTME: Demo data seeder for the Potager meal planning backend
// ABOUTME: Populates recipes, inventory, a menu plan, and ratings, then prints a sample run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! Demo data seeder for Potager.
//!
//! Populates the database with a small household's worth of recipes,
//! pantry stock, ratings, and one planned week, then exercises the
//! suggestion ranker and shopping-list generator against it.
//!
//! Usage:
//! ```bash
//! # Seed an on-disk database (created if missing)
//! cargo run --bin seed-demo-data -- --database-url sqlite:potager.db
//!
//! # Verbose output
//! cargo run --bin seed-demo-data -- -v
//! ```

use anyhow::Result;
use chrono::{Datelike, Days, Local};
use clap::Parser;
use potager_core::config::EngineConfig;
use potager_core::models::{
    AddPlannedMealRequest, CreateInventoryItemRequest, CreateMenuPlanRequest, CreateRecipeRequest,
    Difficulty, IngredientInput, MealType,
};
use potager_engine::SuggestionStrategy;
use potager_server::database::Database;
use potager_server::services::{ShoppingListService, SuggestionService};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Potager demo data seeder",
    long_about = "Populate the database with demo recipes, inventory, and a planned week"
)]
struct SeedArgs {
    /// Database URL (defaults to an on-disk demo database)
    #[arg(long, default_value = "sqlite:potager_demo.db")]
    database_url: String,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One demo recipe definition
struct DemoRecipe {
    title: &'static str,
    servings: i64,
    prep_minutes: i64,
    cook_minutes: i64,
    difficulty: Difficulty,
    ingredients: &'static [(&'static str, f64, &'static str, &'static str)],
    instructions: &'static [&'static str],
    tags: &'static [&'static str],
}

const DEMO_RECIPES: &[DemoRecipe] = &[
    DemoRecipe {
        title: "Ratatouille",
        servings: 4,
        prep_minutes: 30,
        cook_minutes: 45,
        difficulty: Difficulty::Medium,
        ingredients: &[
            ("eggplant", 1.0, "pieces", "produce"),
            ("zucchini", 2.0, "pieces", "produce"),
            ("tomatoes", 4.0, "pieces", "produce"),
            ("olive oil", 3.0, "tbsp", "pantry"),
        ],
        instructions: &[
            "Slice the vegetables thinly",
            "Layer in a baking dish with olive oil",
            "Bake at 190C until tender",
        ],
        tags: &["summer", "vegetarian"],
    },
    DemoRecipe {
        title: "Weeknight Omelette",
        servings: 2,
        prep_minutes: 5,
        cook_minutes: 10,
        difficulty: Difficulty::Easy,
        ingredients: &[
            ("eggs", 4.0, "pieces", "dairy"),
            ("butter", 1.0, "tbsp", "dairy"),
            ("chives", 1.0, "tbsp", "produce"),
        ],
        instructions: &["Whisk the eggs", "Cook gently in butter", "Fold and serve"],
        tags: &["quick"],
    },
    DemoRecipe {
        title: "Squash Soup",
        servings: 6,
        prep_minutes: 20,
        cook_minutes: 40,
        difficulty: Difficulty::Easy,
        ingredients: &[
            ("butternut squash", 1.0, "pieces", "produce"),
            ("onion", 1.0, "pieces", "produce"),
            ("vegetable stock", 4.0, "cups", "pantry"),
        ],
        instructions: &[
            "Roast the squash until soft",
            "Sweat the onion, add stock and squash",
            "Blend until smooth",
        ],
        tags: &["fall", "vegetarian"],
    },
];

const DEMO_INVENTORY: &[(&str, f64, &str, &str, &str)] = &[
    ("eggs", 6.0, "pieces", "dairy", "fridge"),
    ("butter", 4.0, "tbsp", "dairy", "fridge"),
    ("olive oil", 12.0, "tbsp", "pantry", "pantry"),
    ("tomatoes", 2.0, "pieces", "produce", "counter"),
    ("vegetable stock", 2.0, "cups", "pantry", "pantry"),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let db = Database::new(&args.database_url).await?;
    let actor = Uuid::new_v4();
    let rater = Uuid::new_v4();

    info!(database_url = %args.database_url, "seeding demo data");

    let recipes = db.recipes();
    let mut recipe_ids = Vec::new();
    for demo in DEMO_RECIPES {
        let request = CreateRecipeRequest {
            title: demo.title.to_owned(),
            description: None,
            servings: demo.servings,
            prep_minutes: demo.prep_minutes,
            cook_minutes: demo.cook_minutes,
            difficulty: demo.difficulty,
            ingredients: demo
                .ingredients
                .iter()
                .map(|(name, quantity, unit, category)| IngredientInput {
                    name: (*name).to_owned(),
                    quantity: *quantity,
                    unit: (*unit).to_owned(),
                    category: (*category).to_owned(),
                    is_optional: false,
                })
                .collect(),
            instructions: demo.instructions.iter().map(|s| (*s).to_owned()).collect(),
            tags: demo.tags.iter().map(|t| (*t).to_owned()).collect(),
        };
        let detail = recipes.create(&request, actor).await?;
        info!(title = %detail.recipe.title, id = %detail.recipe.id, "seeded recipe");
        recipe_ids.push(detail.recipe.id);
    }

    let inventory = db.inventory();
    for (name, quantity, unit, category, location) in DEMO_INVENTORY {
        let item = inventory
            .create(
                &CreateInventoryItemRequest {
                    name: (*name).to_owned(),
                    quantity: *quantity,
                    unit: (*unit).to_owned(),
                    category: (*category).to_owned(),
                    location: (*location).to_owned(),
                    expiration_date: None,
                    minimum_stock: 1.0,
                },
                actor,
            )
            .await?;
        info!(name = %item.name, quantity = item.quantity, "seeded inventory item");
    }

    let ratings = db.ratings();
    for recipe_id in &recipe_ids {
        ratings.upsert(*recipe_id, actor, true).await?;
        ratings.upsert(*recipe_id, rater, true).await?;
    }

    // Plan the current week, starting from its Monday
    let today = Local::now().date_naive();
    let days_back = today.weekday().num_days_from_monday();
    let week_start = today - Days::new(u64::from(days_back));
    let plans = db.menu_plans();
    let plan = plans
        .create(
            &CreateMenuPlanRequest {
                week_start,
                name: Some("Demo week".to_owned()),
            },
            actor,
        )
        .await?;
    for (offset, recipe_id) in recipe_ids.iter().enumerate() {
        plans
            .add_meal(
                plan.id,
                &AddPlannedMealRequest {
                    recipe_id: *recipe_id,
                    meal_date: week_start + Days::new(offset as u64),
                    meal_type: MealType::Dinner,
                    servings_planned: 4,
                },
            )
            .await?;
    }
    info!(plan_id = %plan.id, week_start = %week_start, "seeded menu plan");

    // Exercise the engine against the seeded data
    let config = EngineConfig::from_env();
    let suggestions = SuggestionService::new(db.clone(), config);
    for strategy in [
        SuggestionStrategy::Rotation,
        SuggestionStrategy::AvailableInventory,
        SuggestionStrategy::QuickMeals,
    ] {
        let ranked = suggestions.suggest(strategy, Some(5)).await?;
        println!("== {} ==", strategy.as_str());
        for suggestion in ranked {
            println!("  {} - {}", suggestion.title, suggestion.reason);
        }
    }

    let shopping = ShoppingListService::new(db.clone());
    let list = shopping.generate(plan.id).await?;
    println!(
        "== shopping list ({} to buy, {} in stock) ==",
        list.summary.to_buy, list.summary.in_stock
    );
    for (category, items) in &list.groups {
        println!("  [{category}]");
        for item in items {
            println!(
                "    {} - need {:.1} {}, have {:.1} ({})",
                item.name,
                item.net_needed,
                item.unit,
                item.current_stock,
                item.status.as_str()
            );
        }
    }

    Ok(())
}
