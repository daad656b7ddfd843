// ABOUTME: Main library entry point for the Potager meal planning backend
// ABOUTME: Wires the sqlx persistence layer to the potager-engine domain compute
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

#![deny(unsafe_code)]

//! # Potager Server
//!
//! Domain engine for a household meal planner: versioned recipes, kitchen
//! inventory with a full change ledger, weekly menu plans, ratings-derived
//! favorites, recipe suggestions, and shopping-list generation.
//!
//! The enclosing API layer owns HTTP routing, authentication, and request
//! validation; it calls into the managers and services exposed here. Every
//! operation executes within one database transaction and returns a typed
//! [`errors::AppError`] on failure - no partial writes survive an error.
//!
//! ## Architecture
//!
//! - **database**: sqlx/SQLite managers, one per domain area (recipes,
//!   inventory, menu plans, ratings), plus schema migrations
//! - **services**: orchestration that loads records, invokes the pure
//!   `potager-engine` compute, and writes results back - including the
//!   atomic cook transition
//! - **`potager-core`** (re-exported): models, errors, engine configuration
//! - **`potager-engine`** (re-exported): suggestion ranking, favorites,
//!   ingredient matching, shopping-list aggregation

/// Database management and per-area sqlx managers
pub mod database;

/// Domain orchestration services (cook transition, suggestions, shopping list)
pub mod services;

pub use potager_core::{config, errors, models};
pub use potager_engine as engine;
