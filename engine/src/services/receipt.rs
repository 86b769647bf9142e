//! Goods receipt posting and receivable-order queries

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{
    compose_traceability_code, validate_date_window, validate_positive_quantity,
    validate_required_text, DocumentStatus, GoodsReceipt, PurchaseOrder, ReceiptLineItem,
};

use crate::engine::ProcurementEngine;
use crate::error::{EngineError, EngineResult};
use crate::events::DomainEvent;

/// Input for one received lot. Item code, description, unit and rate come
/// from the referenced order line.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptLineInput {
    pub po_item_id: Uuid,
    pub received_quantity: Decimal,
    pub manufacturing_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub invoice_no: String,
    pub invoice_date: NaiveDate,
}

/// Receivable state of one order line
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutstandingLine {
    pub po_item_id: Uuid,
    pub item_code: String,
    pub description: String,
    pub unit: String,
    pub ordered: Decimal,
    pub received: Decimal,
    pub outstanding: Decimal,
}

impl ProcurementEngine {
    /// Post a goods receipt against an approved purchase order.
    ///
    /// The whole batch is validated before anything is applied: if any line
    /// fails, no receipt is created and the ledger is untouched. Once
    /// posted, a receipt is permanent. Each accepted line becomes a lot
    /// with a generated lot number and traceability code, and its quantity
    /// and value land in the good bucket pending quality disposition.
    pub fn post_receipt(
        &mut self,
        po_id: Uuid,
        lines: Vec<ReceiptLineInput>,
    ) -> EngineResult<GoodsReceipt> {
        let order = self
            .store
            .order(po_id)
            .ok_or_else(|| EngineError::NotFound(format!("Purchase order {po_id}")))?;
        if order.status != DocumentStatus::Approved {
            return Err(EngineError::InvalidState(format!(
                "Purchase order {po_id} is {} and cannot receive goods",
                order.status
            )));
        }
        if lines.is_empty() {
            return Err(EngineError::validation(
                "lines",
                "A receipt needs at least one line",
            ));
        }

        // Validate every line and pick up its pricing before mutating
        // anything. Duplicate po_item_id lines within this batch accumulate
        // against the same outstanding quantity.
        let mut batch_received: HashMap<Uuid, Decimal> = HashMap::new();
        let mut priced_lines: Vec<(ReceiptLineInput, String, String, String, Decimal)> =
            Vec::with_capacity(lines.len());

        for (index, line) in lines.into_iter().enumerate() {
            let field = format!("lines[{index}]");
            let po_item = order.item(line.po_item_id).ok_or_else(|| {
                EngineError::NotFound(format!(
                    "Order line {} on purchase order {po_id}",
                    line.po_item_id
                ))
            })?;

            validate_positive_quantity(line.received_quantity)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_required_text(&line.invoice_no)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_date_window(line.manufacturing_date, line.expiry_date)
                .map_err(|msg| EngineError::validation(&field, msg))?;

            let already_received = self.store.received_quantity_for(po_id, line.po_item_id)
                + batch_received
                    .get(&line.po_item_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
            let outstanding = po_item.po_quantity - already_received;
            if line.received_quantity > outstanding {
                return Err(EngineError::QuantityExceedsOrder {
                    item_code: po_item.item_code.clone(),
                    requested: line.received_quantity,
                    outstanding,
                });
            }
            *batch_received.entry(line.po_item_id).or_default() += line.received_quantity;

            priced_lines.push((
                line,
                po_item.item_code.clone(),
                po_item.description.clone(),
                po_item.unit.clone(),
                po_item.rate,
            ));
        }

        // All lines valid: generate lots, fold the ledger, store the receipt.
        let delimiter = self.config.traceability.delimiter.clone();
        let mut items = Vec::with_capacity(priced_lines.len());
        for (line, item_code, description, unit, rate) in priced_lines {
            let lot_no = self.next_lot_no();
            let traceability_code = compose_traceability_code(
                &item_code,
                &lot_no,
                line.manufacturing_date,
                line.expiry_date,
                &line.invoice_no,
                line.invoice_date,
                &delimiter,
            );
            self.ledger.receive(
                &item_code,
                &description,
                &unit,
                line.received_quantity,
                rate,
            );
            items.push(ReceiptLineItem {
                id: Uuid::new_v4(),
                po_item_id: line.po_item_id,
                item_code,
                description,
                received_quantity: line.received_quantity,
                unit,
                manufacturing_date: line.manufacturing_date,
                expiry_date: line.expiry_date,
                invoice_no: line.invoice_no,
                invoice_date: line.invoice_date,
                lot_no,
                traceability_code,
                received_at: Utc::now(),
            });
        }

        let receipt = GoodsReceipt {
            id: Uuid::new_v4(),
            po_id,
            items,
            created_at: Utc::now(),
        };

        tracing::info!(
            receipt_id = %receipt.id,
            order_id = %po_id,
            lots = receipt.items.len(),
            "posted goods receipt"
        );
        self.store.insert_receipt(receipt.clone());
        self.events.record(DomainEvent::ReceiptPosted {
            receipt: receipt.clone(),
        });
        Ok(receipt)
    }

    /// Approved orders that still have outstanding quantity on some line.
    pub fn receivable_orders(&self) -> Vec<&PurchaseOrder> {
        self.store
            .orders()
            .iter()
            .filter(|po| {
                po.status == DocumentStatus::Approved
                    && po.items.iter().any(|item| {
                        self.store.received_quantity_for(po.id, item.id) < item.po_quantity
                    })
            })
            .collect()
    }

    /// Ordered / received / outstanding breakdown for an order's
    /// not-yet-fully-received lines.
    pub fn outstanding_lines(&self, po_id: Uuid) -> EngineResult<Vec<OutstandingLine>> {
        let order = self
            .store
            .order(po_id)
            .ok_or_else(|| EngineError::NotFound(format!("Purchase order {po_id}")))?;

        Ok(order
            .items
            .iter()
            .filter_map(|item| {
                let received = self.store.received_quantity_for(po_id, item.id);
                let outstanding = item.po_quantity - received;
                (outstanding > Decimal::ZERO).then(|| OutstandingLine {
                    po_item_id: item.id,
                    item_code: item.item_code.clone(),
                    description: item.description.clone(),
                    unit: item.unit.clone(),
                    ordered: item.po_quantity,
                    received,
                    outstanding,
                })
            })
            .collect())
    }
}
