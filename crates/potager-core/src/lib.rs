// ABOUTME: Core types and constants for the Potager meal planning platform
// ABOUTME: Foundation crate with error types, domain models, and engine configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

#![deny(unsafe_code)]

//! # Potager Core
//!
//! Foundation crate providing shared types for the Potager meal planning
//! platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Domain records (recipes, versions, inventory, menu plans, ratings)
//! - **config**: Engine configuration passed explicitly into domain computations

/// Unified error handling system with standard error codes and HTTP status mapping
pub mod errors;

/// Core data models (Recipe, `RecipeVersion`, `InventoryItem`, `MenuPlan`, Rating)
pub mod models;

/// Engine configuration (favorites thresholds, quick-meal cutoff)
pub mod config;
