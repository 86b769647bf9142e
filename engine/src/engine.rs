//! The procurement engine facade
//!
//! `ProcurementEngine` owns the document store, the stock ledger, the
//! domain event log and the lot sequence counter. Every command runs as a
//! synchronous read-validate-mutate sequence on `&mut self`; callers in a
//! multi-actor deployment wrap the engine in their own mutual exclusion.

use chrono::{Datelike, Utc};
use serde::Serialize;
use shared::{
    generate_lot_number, DocumentStatus, GoodsReceipt, PurchaseOrder, PurchaseRequisition,
    QaDisposition, StockLedgerEntry, StockSummary,
};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::events::{DomainEvent, EventLog};
use crate::ledger::StockLedger;
use crate::store::DocumentStore;

/// Single-process, in-memory procure-to-pay engine
#[derive(Debug, Clone)]
pub struct ProcurementEngine {
    pub(crate) config: EngineConfig,
    pub(crate) store: DocumentStore,
    pub(crate) ledger: StockLedger,
    pub(crate) events: EventLog,
    pub(crate) lot_seq: u32,
}

/// Counts of lifecycle documents by status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    fn tally(statuses: impl Iterator<Item = DocumentStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                DocumentStatus::Pending => counts.pending += 1,
                DocumentStatus::Approved => counts.approved += 1,
                DocumentStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

/// Dashboard-level overview of the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentCounts {
    pub requisitions: StatusCounts,
    pub orders: StatusCounts,
    pub receipts: usize,
    pub dispositions: usize,
}

impl ProcurementEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            store: DocumentStore::new(),
            ledger: StockLedger::new(),
            events: EventLog::new(),
            lot_seq: 0,
        }
    }

    /// Next lot number in sequence, e.g. "LOT-2026-0001".
    pub(crate) fn next_lot_no(&mut self) -> String {
        self.lot_seq += 1;
        generate_lot_number(
            &self.config.lot.prefix,
            Utc::now().year(),
            self.lot_seq,
            self.config.lot.sequence_width,
        )
    }

    // ------------------------------------------------------------------
    // Read model
    // ------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn requisitions(&self) -> &[PurchaseRequisition] {
        self.store.requisitions()
    }

    pub fn orders(&self) -> &[PurchaseOrder] {
        self.store.orders()
    }

    pub fn receipts(&self) -> &[GoodsReceipt] {
        self.store.receipts()
    }

    pub fn dispositions(&self) -> &[QaDisposition] {
        self.store.dispositions()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Ledger entries in first-receipt order.
    pub fn ledger_snapshot(&self) -> Vec<StockLedgerEntry> {
        self.ledger.snapshot()
    }

    /// Ledger-wide stock totals.
    pub fn stock_summary(&self) -> StockSummary {
        self.ledger.summary()
    }

    /// Document counts by lifecycle status.
    pub fn document_counts(&self) -> DocumentCounts {
        DocumentCounts {
            requisitions: StatusCounts::tally(
                self.store.requisitions().iter().map(|pr| pr.status),
            ),
            orders: StatusCounts::tally(self.store.orders().iter().map(|po| po.status)),
            receipts: self.store.receipts().len(),
            dispositions: self.store.dispositions().len(),
        }
    }

    // ------------------------------------------------------------------
    // Replay
    // ------------------------------------------------------------------

    /// Rebuild an engine by folding a recorded event log in order.
    ///
    /// Events carry full documents and were valid when emitted, so replay
    /// applies them through the same ledger arithmetic as the live path
    /// without re-running business validation. The lot sequence continues
    /// from the replayed receipt lines.
    pub fn replay(config: EngineConfig, events: &[DomainEvent]) -> EngineResult<Self> {
        let mut engine = Self::new(config);

        for event in events {
            match event {
                DomainEvent::RequisitionCreated { requisition } => {
                    engine.store.insert_requisition(requisition.clone());
                }
                DomainEvent::RequisitionApproved { id } => {
                    engine
                        .store
                        .requisition_mut(*id)
                        .ok_or_else(|| EngineError::NotFound(format!("Requisition {id}")))?
                        .status = DocumentStatus::Approved;
                }
                DomainEvent::RequisitionRejected { id } => {
                    engine
                        .store
                        .requisition_mut(*id)
                        .ok_or_else(|| EngineError::NotFound(format!("Requisition {id}")))?
                        .status = DocumentStatus::Rejected;
                }
                DomainEvent::OrderCreated { order } => {
                    engine.store.insert_order(order.clone());
                }
                DomainEvent::OrderApproved { id } => {
                    engine
                        .store
                        .order_mut(*id)
                        .ok_or_else(|| EngineError::NotFound(format!("Purchase order {id}")))?
                        .status = DocumentStatus::Approved;
                }
                DomainEvent::OrderRejected { id } => {
                    engine
                        .store
                        .order_mut(*id)
                        .ok_or_else(|| EngineError::NotFound(format!("Purchase order {id}")))?
                        .status = DocumentStatus::Rejected;
                }
                DomainEvent::ReceiptPosted { receipt } => {
                    for line in &receipt.items {
                        let rate = engine
                            .store
                            .order(receipt.po_id)
                            .and_then(|po| po.item(line.po_item_id))
                            .map(|po_item| po_item.rate)
                            .ok_or_else(|| {
                                EngineError::NotFound(format!(
                                    "Order line {} for receipt {}",
                                    line.po_item_id, receipt.id
                                ))
                            })?;
                        engine.ledger.receive(
                            &line.item_code,
                            &line.description,
                            &line.unit,
                            line.received_quantity,
                            rate,
                        );
                    }
                    engine.store.insert_receipt(receipt.clone());
                    engine.lot_seq = engine.store.receipt_line_count() as u32;
                }
                DomainEvent::LotDisposed { record } => {
                    engine.ledger.apply_disposition(
                        &record.item_code,
                        record.pass_qty,
                        record.failed_quantity(),
                    )?;
                    engine.store.insert_disposition(record.clone());
                }
                DomainEvent::StockIssued {
                    item_code,
                    quantity,
                } => {
                    engine.ledger.issue(item_code, *quantity)?;
                }
            }
            engine.events.record(event.clone());
        }

        Ok(engine)
    }
}

impl Default for ProcurementEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
