//! Stock issuance from the good-quality bucket

use rust_decimal::Decimal;

use shared::{validate_positive_quantity, StockLedgerEntry};

use crate::engine::ProcurementEngine;
use crate::error::{EngineError, EngineResult};
use crate::events::DomainEvent;

impl ProcurementEngine {
    /// Issue stock out of the store.
    ///
    /// Only the good-quality bucket is issuable; damaged stock never is.
    /// The issued quantity is valued at the current weighted average
    /// price, which stays unchanged as the cost basis of what remains.
    pub fn issue_stock(
        &mut self,
        item_code: &str,
        quantity: Decimal,
    ) -> EngineResult<StockLedgerEntry> {
        validate_positive_quantity(quantity)
            .map_err(|msg| EngineError::validation("quantity", msg))?;

        let updated = self.ledger.issue(item_code, quantity)?.clone();

        tracing::info!(
            item_code,
            %quantity,
            remaining = %updated.good_qty,
            "issued stock"
        );
        self.events.record(DomainEvent::StockIssued {
            item_code: item_code.to_string(),
            quantity,
        });
        Ok(updated)
    }
}
