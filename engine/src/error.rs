//! Error handling for the procure-to-pay engine
//!
//! Every operation validates in full before mutating, so any error here
//! means the engine state is unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    // Input errors
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{0} not found")]
    NotFound(String),

    // Lifecycle errors
    #[error("Invalid state transition: {0}")]
    InvalidState(String),

    // Receipt errors
    #[error(
        "Received quantity {requested} for item {item_code} exceeds outstanding order quantity {outstanding}"
    )]
    QuantityExceedsOrder {
        item_code: String,
        requested: Decimal,
        outstanding: Decimal,
    },

    // Disposition errors
    #[error("Disposition quantities sum to {submitted} but lot {lot_no} holds {expected}")]
    QuantityMismatch {
        lot_no: String,
        submitted: Decimal,
        expected: Decimal,
    },

    #[error("Lot {0} has already been disposed")]
    AlreadyDisposed(String),

    // Issue errors
    #[error("Cannot issue {requested} of item {item_code}: only {available} good stock available")]
    InsufficientStock {
        item_code: String,
        requested: Decimal,
        available: Decimal,
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl EngineError {
    /// Stable machine-readable code for callers that surface errors to users.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation { .. } => "VALIDATION_ERROR",
            EngineError::NotFound(_) => "NOT_FOUND",
            EngineError::InvalidState(_) => "INVALID_STATE",
            EngineError::QuantityExceedsOrder { .. } => "QUANTITY_EXCEEDS_ORDER",
            EngineError::QuantityMismatch { .. } => "QUANTITY_MISMATCH",
            EngineError::AlreadyDisposed(_) => "ALREADY_DISPOSED",
            EngineError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            EngineError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
