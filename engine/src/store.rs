//! Document store: owns all procure-to-pay documents
//!
//! The store is the single owner of requisitions, orders, receipts and
//! disposition records; the stock ledger is a derived aggregate maintained
//! alongside it. Receipts are append-only once inserted.

use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{GoodsReceipt, PurchaseOrder, PurchaseRequisition, QaDisposition, ReceiptLineItem};

/// In-memory owner of PR/PO/GR/QA documents
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    requisitions: Vec<PurchaseRequisition>,
    orders: Vec<PurchaseOrder>,
    receipts: Vec<GoodsReceipt>,
    dispositions: Vec<QaDisposition>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Requisitions
    // ------------------------------------------------------------------

    pub fn insert_requisition(&mut self, requisition: PurchaseRequisition) {
        self.requisitions.push(requisition);
    }

    pub fn requisition(&self, id: Uuid) -> Option<&PurchaseRequisition> {
        self.requisitions.iter().find(|pr| pr.id == id)
    }

    pub fn requisition_mut(&mut self, id: Uuid) -> Option<&mut PurchaseRequisition> {
        self.requisitions.iter_mut().find(|pr| pr.id == id)
    }

    pub fn requisitions(&self) -> &[PurchaseRequisition] {
        &self.requisitions
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    pub fn insert_order(&mut self, order: PurchaseOrder) {
        self.orders.push(order);
    }

    pub fn order(&self, id: Uuid) -> Option<&PurchaseOrder> {
        self.orders.iter().find(|po| po.id == id)
    }

    pub fn order_mut(&mut self, id: Uuid) -> Option<&mut PurchaseOrder> {
        self.orders.iter_mut().find(|po| po.id == id)
    }

    pub fn orders(&self) -> &[PurchaseOrder] {
        &self.orders
    }

    // ------------------------------------------------------------------
    // Receipts
    // ------------------------------------------------------------------

    pub fn insert_receipt(&mut self, receipt: GoodsReceipt) {
        self.receipts.push(receipt);
    }

    pub fn receipts(&self) -> &[GoodsReceipt] {
        &self.receipts
    }

    /// Cumulative quantity received so far against one purchase order line,
    /// summed across every receipt posted for that order.
    pub fn received_quantity_for(&self, po_id: Uuid, po_item_id: Uuid) -> Decimal {
        self.receipts
            .iter()
            .filter(|gr| gr.po_id == po_id)
            .flat_map(|gr| gr.items.iter())
            .filter(|line| line.po_item_id == po_item_id)
            .map(|line| line.received_quantity)
            .sum()
    }

    /// Find a received lot by its lot number.
    pub fn find_lot(&self, lot_no: &str) -> Option<&ReceiptLineItem> {
        self.receipts
            .iter()
            .flat_map(|gr| gr.items.iter())
            .find(|line| line.lot_no == lot_no)
    }

    /// Count of receipt lines ever posted; used to seed lot numbering on replay.
    pub fn receipt_line_count(&self) -> usize {
        self.receipts.iter().map(|gr| gr.items.len()).sum()
    }

    // ------------------------------------------------------------------
    // Dispositions
    // ------------------------------------------------------------------

    pub fn insert_disposition(&mut self, record: QaDisposition) {
        self.dispositions.push(record);
    }

    pub fn dispositions(&self) -> &[QaDisposition] {
        &self.dispositions
    }

    pub fn is_lot_disposed(&self, lot_no: &str) -> bool {
        self.dispositions.iter().any(|qa| qa.lot_no == lot_no)
    }

    /// Receipt lines that have not been through a quality check yet,
    /// in receipt order.
    pub fn undisposed_lots(&self) -> Vec<&ReceiptLineItem> {
        self.receipts
            .iter()
            .flat_map(|gr| gr.items.iter())
            .filter(|line| !self.is_lot_disposed(&line.lot_no))
            .collect()
    }
}
