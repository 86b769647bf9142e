//! Goods receipt and lot traceability models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A received lot against one purchase order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLineItem {
    pub id: Uuid,
    /// The purchase order line this lot was received against.
    pub po_item_id: Uuid,
    pub item_code: String,
    pub description: String,
    pub received_quantity: Decimal,
    pub unit: String,
    pub manufacturing_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub invoice_no: String,
    pub invoice_date: NaiveDate,
    /// Generated lot number (e.g., "LOT-2026-0001"), unique per receipt line.
    pub lot_no: String,
    /// Scannable payload carrying the lot's provenance fields.
    pub traceability_code: String,
    pub received_at: DateTime<Utc>,
}

/// Record of physical receipt of purchase order lines. Append-only once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodsReceipt {
    pub id: Uuid,
    pub po_id: Uuid,
    pub items: Vec<ReceiptLineItem>,
    pub created_at: DateTime<Utc>,
}

/// Generate a lot number
pub fn generate_lot_number(prefix: &str, year: i32, sequence: u32, width: usize) -> String {
    format!("{}-{}-{:0width$}", prefix, year, sequence, width = width)
}

/// Compose the traceability payload for a lot:
/// item code, lot number, manufacturing date, expiry date, invoice number,
/// invoice date, joined by `delimiter`.
pub fn compose_traceability_code(
    item_code: &str,
    lot_no: &str,
    manufacturing_date: NaiveDate,
    expiry_date: NaiveDate,
    invoice_no: &str,
    invoice_date: NaiveDate,
    delimiter: &str,
) -> String {
    [
        item_code.to_string(),
        lot_no.to_string(),
        manufacturing_date.to_string(),
        expiry_date.to_string(),
        invoice_no.to_string(),
        invoice_date.to_string(),
    ]
    .join(delimiter)
}
