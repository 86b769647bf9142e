//! Purchase order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DocumentStatus;

/// A priced line on a purchase order.
///
/// `value`, `gst_amount` and `total_amount` are derived from
/// `rate`, `po_quantity` and `gst_percentage` by [`OrderItem::new`] and are
/// never set independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    /// Originating requisition line, when the order was raised against one.
    pub pr_item_id: Option<Uuid>,
    pub item_code: String,
    pub description: String,
    pub po_quantity: Decimal,
    pub unit: String,
    /// Unit price agreed with the vendor.
    pub rate: Decimal,
    pub value: Decimal,
    pub gst_percentage: Decimal,
    pub gst_amount: Decimal,
    pub total_amount: Decimal,
}

impl OrderItem {
    /// Build a line with its money fields computed from rate, quantity
    /// and GST percentage.
    pub fn new(
        pr_item_id: Option<Uuid>,
        item_code: String,
        description: String,
        po_quantity: Decimal,
        unit: String,
        rate: Decimal,
        gst_percentage: Decimal,
    ) -> Self {
        let value = rate * po_quantity;
        let gst_amount = value * gst_percentage / Decimal::from(100);
        let total_amount = value + gst_amount;
        Self {
            id: Uuid::new_v4(),
            pr_item_id,
            item_code,
            description,
            po_quantity,
            unit,
            rate,
            value,
            gst_percentage,
            gst_amount,
            total_amount,
        }
    }
}

/// A vendor-facing order raised against one or more requisitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    /// Requisitions this order was raised against.
    pub pr_ids: Vec<Uuid>,
    pub vendor: String,
    pub status: DocumentStatus,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Look up a line by its id.
    pub fn item(&self, item_id: Uuid) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}
