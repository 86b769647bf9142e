//! Quality disposition of received lots

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::{
    validate_disposition_partition, validate_required_text, QaDisposition, ReceiptLineItem,
};

use crate::engine::ProcurementEngine;
use crate::error::{EngineError, EngineResult};
use crate::events::DomainEvent;

/// Input for disposing one lot after inspection
#[derive(Debug, Clone, Deserialize)]
pub struct DispositionInput {
    pub lot_no: String,
    pub pass_qty: Decimal,
    pub damage_qty: Decimal,
    pub shelf_life_fail_qty: Decimal,
    pub expiry_fail_qty: Decimal,
    pub remark: String,
}

impl ProcurementEngine {
    /// Dispose a received lot into pass/damage/shelf-life/expiry buckets.
    ///
    /// The four quantities must partition the lot's received quantity
    /// exactly. On acceptance the item's ledger entry is re-partitioned:
    /// the good bucket becomes the pass quantity, the damaged bucket the
    /// failures, and the entry's value is scaled by the pass fraction.
    /// A lot can be disposed at most once.
    pub fn dispose_lot(&mut self, input: DispositionInput) -> EngineResult<QaDisposition> {
        let lot = self
            .store
            .find_lot(&input.lot_no)
            .ok_or_else(|| EngineError::NotFound(format!("Lot {}", input.lot_no)))?;

        if self.store.is_lot_disposed(&input.lot_no) {
            return Err(EngineError::AlreadyDisposed(input.lot_no));
        }

        validate_required_text(&input.remark)
            .map_err(|msg| EngineError::validation("remark", msg))?;

        for (field, qty) in [
            ("pass_qty", input.pass_qty),
            ("damage_qty", input.damage_qty),
            ("shelf_life_fail_qty", input.shelf_life_fail_qty),
            ("expiry_fail_qty", input.expiry_fail_qty),
        ] {
            if qty < Decimal::ZERO {
                return Err(EngineError::validation(
                    field,
                    "Disposition quantities cannot be negative",
                ));
            }
        }

        let submitted =
            input.pass_qty + input.damage_qty + input.shelf_life_fail_qty + input.expiry_fail_qty;
        validate_disposition_partition(
            input.pass_qty,
            input.damage_qty,
            input.shelf_life_fail_qty,
            input.expiry_fail_qty,
            lot.received_quantity,
        )
        .map_err(|_| EngineError::QuantityMismatch {
            lot_no: input.lot_no.clone(),
            submitted,
            expected: lot.received_quantity,
        })?;

        let record = QaDisposition {
            id: Uuid::new_v4(),
            lot_no: input.lot_no,
            item_code: lot.item_code.clone(),
            description: lot.description.clone(),
            lot_quantity: lot.received_quantity,
            unit: lot.unit.clone(),
            pass_qty: input.pass_qty,
            damage_qty: input.damage_qty,
            shelf_life_fail_qty: input.shelf_life_fail_qty,
            expiry_fail_qty: input.expiry_fail_qty,
            remark: input.remark,
            check_date: Utc::now(),
        };

        self.ledger.apply_disposition(
            &record.item_code,
            record.pass_qty,
            record.failed_quantity(),
        )?;

        tracing::info!(
            lot_no = %record.lot_no,
            item_code = %record.item_code,
            pass = %record.pass_qty,
            failed = %record.failed_quantity(),
            "disposed lot"
        );
        self.store.insert_disposition(record.clone());
        self.events.record(DomainEvent::LotDisposed {
            record: record.clone(),
        });
        Ok(record)
    }

    /// Received lots awaiting quality disposition, in receipt order.
    pub fn undisposed_lots(&self) -> Vec<&ReceiptLineItem> {
        self.store.undisposed_lots()
    }
}
