//! Stock ledger models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity-and-value state for one stocked item.
///
/// Keyed by (item_code, unit). `total_value` is the monetary value
/// attributed to the good bucket only; `weighted_avg_price` is
/// `total_value / good_qty`, or zero when no good stock remains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockLedgerEntry {
    pub item_code: String,
    pub description: String,
    pub unit: String,
    /// Issuable stock: received quantity that passed (or is pending) QA.
    pub good_qty: Decimal,
    /// Rejected stock: damage, shelf-life and expiry failures. Never issuable.
    pub damaged_qty: Decimal,
    pub total_value: Decimal,
    pub weighted_avg_price: Decimal,
}

impl StockLedgerEntry {
    /// Everything physically in the store, regardless of quality.
    pub fn on_hand(&self) -> Decimal {
        self.good_qty + self.damaged_qty
    }

    /// Re-derive the weighted average from the current quantity and value.
    pub fn recompute_average(&mut self) {
        self.weighted_avg_price = if self.good_qty > Decimal::ZERO {
            self.total_value / self.good_qty
        } else {
            Decimal::ZERO
        };
    }
}

/// Ledger-wide totals for the stock overview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockSummary {
    pub good_qty: Decimal,
    pub damaged_qty: Decimal,
    pub total_value: Decimal,
    pub item_count: usize,
}
