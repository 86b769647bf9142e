//! Stock ledger: weighted-average quantity-and-value state per item
//!
//! Entries keep insertion order so snapshots list items in first-receipt
//! order. Receipts address entries by (item_code, unit); disposition and
//! issuance address the first entry for an item code, which keys the
//! good/damaged repartition the same way the stores desk does.

use rust_decimal::Decimal;

use shared::{StockLedgerEntry, StockSummary};

use crate::error::{EngineError, EngineResult};

/// Derived aggregate of all receipt, disposition and issue events
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    entries: Vec<StockLedgerEntry>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for an item code, if any stock was ever received for it.
    pub fn entry(&self, item_code: &str) -> Option<&StockLedgerEntry> {
        self.entries.iter().find(|e| e.item_code == item_code)
    }

    fn entry_mut(&mut self, item_code: &str) -> Option<&mut StockLedgerEntry> {
        self.entries.iter_mut().find(|e| e.item_code == item_code)
    }

    /// Fold one received lot into the ledger.
    ///
    /// New quantity lands in the good bucket pending quality disposition;
    /// the weighted average price is recomputed over the enlarged bucket.
    pub fn receive(
        &mut self,
        item_code: &str,
        description: &str,
        unit: &str,
        quantity: Decimal,
        rate: Decimal,
    ) {
        let lot_value = quantity * rate;
        match self
            .entries
            .iter_mut()
            .find(|e| e.item_code == item_code && e.unit == unit)
        {
            Some(entry) => {
                entry.good_qty += quantity;
                entry.total_value += lot_value;
                entry.recompute_average();
            }
            None => {
                self.entries.push(StockLedgerEntry {
                    item_code: item_code.to_string(),
                    description: description.to_string(),
                    unit: unit.to_string(),
                    good_qty: quantity,
                    damaged_qty: Decimal::ZERO,
                    total_value: lot_value,
                    weighted_avg_price: rate,
                });
            }
        }
    }

    /// Re-partition an item's stock after quality inspection.
    ///
    /// The entry's good bucket becomes exactly `pass_qty`, the damaged
    /// bucket the sum of the failure quantities, and the entry's entire
    /// value is scaled by the pass fraction of the inspected lot. This is
    /// correct while the entry consists of a single undisposed lot; with
    /// several undisposed lots of one item it reallocates across them.
    pub fn apply_disposition(
        &mut self,
        item_code: &str,
        pass_qty: Decimal,
        failed_qty: Decimal,
    ) -> EngineResult<&StockLedgerEntry> {
        let entry = self
            .entry_mut(item_code)
            .ok_or_else(|| EngineError::NotFound(format!("Stock entry for item {item_code}")))?;

        let inspected = pass_qty + failed_qty;
        let pass_fraction = if inspected > Decimal::ZERO {
            pass_qty / inspected
        } else {
            Decimal::ZERO
        };

        entry.good_qty = pass_qty;
        entry.damaged_qty = failed_qty;
        entry.total_value = (entry.total_value * pass_fraction).max(Decimal::ZERO);
        entry.recompute_average();
        Ok(entry)
    }

    /// Debit the good bucket at the current weighted average price.
    ///
    /// The average itself is left untouched: disposing stock at its own
    /// average cost does not shift the cost basis of what remains.
    pub fn issue(&mut self, item_code: &str, quantity: Decimal) -> EngineResult<&StockLedgerEntry> {
        let entry = self
            .entry_mut(item_code)
            .ok_or_else(|| EngineError::NotFound(format!("Stock entry for item {item_code}")))?;

        if quantity > entry.good_qty {
            return Err(EngineError::InsufficientStock {
                item_code: item_code.to_string(),
                requested: quantity,
                available: entry.good_qty,
            });
        }

        entry.good_qty -= quantity;
        entry.total_value =
            (entry.total_value - quantity * entry.weighted_avg_price).max(Decimal::ZERO);
        Ok(entry)
    }

    /// Entries in first-receipt order.
    pub fn snapshot(&self) -> Vec<StockLedgerEntry> {
        self.entries.clone()
    }

    /// Totals across every entry.
    pub fn summary(&self) -> StockSummary {
        StockSummary {
            good_qty: self.entries.iter().map(|e| e.good_qty).sum(),
            damaged_qty: self.entries.iter().map(|e| e.damaged_qty).sum(),
            total_value: self.entries.iter().map(|e| e.total_value).sum(),
            item_count: self.entries.len(),
        }
    }
}
