// ABOUTME: Domain orchestration services bridging the database layer and the engine
// ABOUTME: Cook transition, favorites, suggestions, and shopping-list generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

//! # Services
//!
//! Thin orchestration over the database managers and the pure
//! `potager-engine` compute. Each service method is one logical operation
//! of the engine's contract surface; the enclosing API layer calls these
//! after handling auth and request parsing.

/// The atomic mark-meal-cooked state change
pub mod cook_transition;

/// Ratings-derived favorite summaries
pub mod favorites;

/// Shopping-list generation for a menu plan
pub mod shopping_list;

/// Recipe suggestions under the six ranking strategies
pub mod suggestions;

pub use cook_transition::CookTransitionCoordinator;
pub use favorites::FavoritesService;
pub use shopping_list::ShoppingListService;
pub use suggestions::SuggestionService;
