// ABOUTME: Domain intelligence for the Potager meal planning platform
// ABOUTME: Pure compute over fetched records - no I/O, deterministic per call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

#![deny(unsafe_code)]

//! # Potager Engine
//!
//! The algorithmic heart of the meal planner: recipe suggestion ranking,
//! favorites derivation, ingredient/inventory matching, and shopping-list
//! aggregation. Every function here is pure compute over records the caller
//! has already fetched - the engine performs no I/O, reads no global state,
//! and produces identical output for identical input, which keeps ranking
//! reproducible and trivially testable.
//!
//! ## Modules
//!
//! - **matching**: the single name-normalization and inventory-matching
//!   logic shared by suggestions and shopping lists
//! - **favorites**: derives favorite status from per-user thumbs up/down votes
//! - **suggestions**: the six-strategy recipe ranker
//! - **`shopping_list`**: nets planned-meal ingredient needs against stock

/// Ingredient-name normalization and inventory matching
pub mod matching;

/// Favorite status derivation from rating counts
pub mod favorites;

/// Six-strategy recipe suggestion ranker
pub mod suggestions;

/// Shopping-list aggregation and inventory netting
pub mod shopping_list;

pub use matching::{match_stats, normalize_name, InventoryIndex, MatchStats};
pub use suggestions::{Season, Suggestion, SuggestionCandidate, SuggestionStrategy};
