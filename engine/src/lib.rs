//! Procure-to-Pay Inventory Valuation & Lot Disposition Engine
//!
//! Models the document lifecycle of purchase requisitions, purchase orders,
//! goods receipts and quality dispositions, and folds receipt, disposition
//! and issuance events into a weighted-average-costed stock ledger.
//!
//! The engine is a single-process, in-memory command processor: every
//! operation validates its inputs in full before touching any state, so a
//! rejected command leaves the documents and the ledger exactly as they
//! were. All applied commands are recorded in an append-only domain event
//! log from which an identical engine can be rebuilt by replay.

mod config;
mod engine;
mod error;
mod events;
mod ledger;
mod logging;
mod services;
mod store;

pub use config::{EngineConfig, LotConfig, TraceabilityConfig};
pub use engine::{DocumentCounts, ProcurementEngine, StatusCounts};
pub use error::{EngineError, EngineResult};
pub use events::{DomainEvent, EventLog};
pub use ledger::StockLedger;
pub use logging::init_tracing;
pub use services::order::OrderItemInput;
pub use services::quality::DispositionInput;
pub use services::receipt::{OutstandingLine, ReceiptLineInput};
pub use services::requisition::RequisitionItemInput;
pub use store::DocumentStore;
