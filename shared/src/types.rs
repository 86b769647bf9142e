//! Common types used across the procure-to-pay workflow

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by purchase requisitions and purchase orders.
///
/// A document is created `Pending` and moves to `Approved` or `Rejected`
/// exactly once; both are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, DocumentStatus::Pending)
    }

    /// Approved and Rejected admit no further transition.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Pending => write!(f, "Pending"),
            DocumentStatus::Approved => write!(f, "Approved"),
            DocumentStatus::Rejected => write!(f, "Rejected"),
        }
    }
}
