// ABOUTME: Row parsing helpers shared by the database managers
// ABOUTME: TEXT-stored uuids, RFC 3339 timestamps, and ISO dates back to domain types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Potager

use chrono::{DateTime, NaiveDate, Utc};
use potager_core::errors::{AppError, AppResult};
use uuid::Uuid;

/// Parse a TEXT-stored uuid column
pub(crate) fn parse_uuid(raw: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid uuid in {column}: {e}")))
}

/// Parse an optional TEXT-stored uuid column
pub(crate) fn parse_uuid_opt(raw: Option<&str>, column: &str) -> AppResult<Option<Uuid>> {
    raw.map(|r| parse_uuid(r, column)).transpose()
}

/// Parse an RFC 3339 TEXT-stored timestamp column
pub(crate) fn parse_datetime(raw: &str, column: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in {column}: {e}")))
}

/// Parse an optional RFC 3339 TEXT-stored timestamp column
pub(crate) fn parse_datetime_opt(
    raw: Option<&str>,
    column: &str,
) -> AppResult<Option<DateTime<Utc>>> {
    raw.map(|r| parse_datetime(r, column)).transpose()
}

/// Parse an ISO 8601 (YYYY-MM-DD) TEXT-stored date column
pub(crate) fn parse_date(raw: &str, column: &str) -> AppResult<NaiveDate> {
    raw.parse()
        .map_err(|e| AppError::database(format!("Invalid date in {column}: {e}")))
}

/// Parse an optional ISO 8601 TEXT-stored date column
pub(crate) fn parse_date_opt(raw: Option<&str>, column: &str) -> AppResult<Option<NaiveDate>> {
    raw.map(|r| parse_date(r, column)).transpose()
}
