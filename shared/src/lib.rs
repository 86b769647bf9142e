//! Shared types and models for the Procure-to-Pay workflow
//!
//! This crate contains the document and stock models shared between the
//! valuation engine and its collaborators (persistence, presentation).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
