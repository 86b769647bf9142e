//! Purchase requisition models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DocumentStatus;

/// A single requested line on a purchase requisition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequisitionItem {
    pub id: Uuid,
    pub item_code: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit: String,
}

/// An internal request for goods, raised before any vendor is involved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequisition {
    pub id: Uuid,
    pub requested_by: String,
    pub status: DocumentStatus,
    pub items: Vec<RequisitionItem>,
    pub created_at: DateTime<Utc>,
}

impl PurchaseRequisition {
    /// Look up a line by its id.
    pub fn item(&self, item_id: Uuid) -> Option<&RequisitionItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}
