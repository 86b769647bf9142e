//! Append-only domain event log
//!
//! Every applied command is recorded here with its full payload, in
//! application order. Replaying the log through
//! [`ProcurementEngine::replay`](crate::ProcurementEngine::replay) rebuilds
//! an identical engine, which is the only durability contract the engine
//! offers to persistence collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{GoodsReceipt, PurchaseOrder, PurchaseRequisition, QaDisposition};

/// A domain-level fact recorded after a command is applied
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    RequisitionCreated { requisition: PurchaseRequisition },
    RequisitionApproved { id: Uuid },
    RequisitionRejected { id: Uuid },
    OrderCreated { order: PurchaseOrder },
    OrderApproved { id: Uuid },
    OrderRejected { id: Uuid },
    ReceiptPosted { receipt: GoodsReceipt },
    LotDisposed { record: QaDisposition },
    StockIssued { item_code: String, quantity: Decimal },
}

/// Append-only sequence of domain events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<DomainEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[DomainEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
