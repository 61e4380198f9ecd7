//! Request types for the Production Incentive Engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint. Produced quantities and worked hours tolerate malformed
//! numeric input by coercing it to zero, preserving a usable (if zeroed)
//! derived state instead of rejecting the request.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Request body for the `/calculate` endpoint.
///
/// Contains the full entry context and roster needed to evaluate targets
/// and incentives for every worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    /// The building code to enter against.
    pub building: String,
    /// The production nature code to enter against.
    pub nature: String,
    /// The shift code to enter against.
    pub shift: String,
    /// Optional override for the entry's live manpower value.
    #[serde(default)]
    pub manpower: Option<Decimal>,
    /// Optional override for the entry's production hours (defaults to the
    /// shift's hours).
    #[serde(default)]
    pub production_hrs: Option<Decimal>,
    /// Optional override for the nature's baseline norms.
    #[serde(default)]
    pub norms: Option<Decimal>,
    /// The workers on the entry.
    pub workers: Vec<WorkerRequest>,
}

/// One worker row in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    /// The worker's employee code.
    pub emp_code: String,
    /// The worker's display name.
    pub name: String,
    /// The quantity produced; malformed input coerces to zero.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub produced_qty: Decimal,
    /// The hours worked; malformed input coerces to zero.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub worked_hrs: Decimal,
}

/// Deserializes a decimal from a number, numeric string, or anything else,
/// coercing unparseable input to zero.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

fn coerce_decimal(value: &serde_json::Value) -> Decimal {
    let text = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => return Decimal::ZERO,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or(Decimal::ZERO)
}
