//! Quality disposition models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of inspecting one received lot.
///
/// The four disposition quantities partition the lot's received quantity
/// exactly; a lot is disposed at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaDisposition {
    pub id: Uuid,
    pub lot_no: String,
    pub item_code: String,
    pub description: String,
    pub lot_quantity: Decimal,
    pub unit: String,
    pub pass_qty: Decimal,
    pub damage_qty: Decimal,
    pub shelf_life_fail_qty: Decimal,
    pub expiry_fail_qty: Decimal,
    pub remark: String,
    pub check_date: DateTime<Utc>,
}

impl QaDisposition {
    /// Quantity rejected for any reason (damage, shelf life, expiry).
    pub fn failed_quantity(&self) -> Decimal {
        self.damage_qty + self.shelf_life_fail_qty + self.expiry_fail_qty
    }

    /// Total inspected quantity across all four buckets.
    pub fn inspected_quantity(&self) -> Decimal {
        self.pass_qty + self.failed_quantity()
    }
}
