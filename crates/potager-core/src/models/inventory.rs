// ABOUTME: Kitchen inventory models with an append-only quantity change ledger
// ABOUTME: InventoryItem, InventoryHistoryEntry, and InventoryChangeType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why an inventory quantity changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryChangeType {
    /// Stock bought and added
    Purchased,
    /// Stock consumed outside of cooking a planned meal
    Used,
    /// Stock discarded past its expiration date
    Expired,
    /// Manual correction of the tracked quantity
    Adjusted,
    /// Deduction performed when a planned meal was marked cooked
    AutoDeducted,
}

impl InventoryChangeType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Purchased => "purchased",
            Self::Used => "used",
            Self::Expired => "expired",
            Self::Adjusted => "adjusted",
            Self::AutoDeducted => "auto_deducted",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "purchased" => Self::Purchased,
            "used" => Self::Used,
            "expired" => Self::Expired,
            "auto_deducted" => Self::AutoDeducted,
            _ => Self::Adjusted,
        }
    }
}

/// One tracked item of kitchen stock.
///
/// Quantity never goes below zero: deduction clamps rather than erroring,
/// since over-use of a tracked item is expected and not a fault condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier
    pub id: Uuid,
    /// Item name; matched case-insensitively against recipe ingredients
    pub name: String,
    /// Current quantity on hand (>= 0)
    pub quantity: f64,
    /// Measurement unit
    pub unit: String,
    /// Grocery category
    pub category: String,
    /// Where the item is stored (pantry, fridge, freezer, ...)
    pub location: String,
    /// Optional expiration date
    pub expiration_date: Option<NaiveDate>,
    /// Threshold below which the item shows up in the low-stock report (>= 0)
    pub minimum_stock: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Immutable record of one inventory quantity change.
///
/// Appended automatically whenever an item's quantity changes, whatever the
/// cause; the ledger is never updated or pruned by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryHistoryEntry {
    /// Monotonic ledger id
    pub id: i64,
    /// Item whose quantity changed
    pub item_id: Uuid,
    /// Quantity before the change
    pub quantity_before: f64,
    /// Quantity after the change
    pub quantity_after: f64,
    /// Why the quantity changed
    pub change_type: InventoryChangeType,
    /// Recipe that triggered an automatic deduction, if any
    pub recipe_id: Option<Uuid>,
    /// User responsible for the change
    pub changed_by: Uuid,
    /// When the change happened
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInventoryItemRequest {
    /// Item name
    pub name: String,
    /// Starting quantity (>= 0)
    pub quantity: f64,
    /// Measurement unit
    pub unit: String,
    /// Grocery category
    #[serde(default)]
    pub category: String,
    /// Storage location
    #[serde(default)]
    pub location: String,
    /// Optional expiration date
    pub expiration_date: Option<NaiveDate>,
    /// Low-stock threshold (>= 0)
    #[serde(default)]
    pub minimum_stock: f64,
}

/// Request payload for editing an inventory item's descriptive fields.
///
/// Quantity is deliberately absent; quantity changes go through
/// `InventoryManager::adjust` so every change lands in the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInventoryItemRequest {
    /// New name (if provided)
    pub name: Option<String>,
    /// New unit (if provided)
    pub unit: Option<String>,
    /// New category (if provided)
    pub category: Option<String>,
    /// New storage location (if provided)
    pub location: Option<String>,
    /// New expiration date (`Some(None)` clears it)
    pub expiration_date: Option<Option<NaiveDate>>,
    /// New low-stock threshold (if provided)
    pub minimum_stock: Option<f64>,
}
