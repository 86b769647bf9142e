//! Purchase requisition lifecycle operations

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::{
    validate_item_code, validate_positive_quantity, validate_required_text, DocumentStatus,
    PurchaseRequisition, RequisitionItem,
};

use crate::engine::ProcurementEngine;
use crate::error::{EngineError, EngineResult};
use crate::events::DomainEvent;

/// Input for one requested line
#[derive(Debug, Clone, Deserialize)]
pub struct RequisitionItemInput {
    pub item_code: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit: String,
}

impl ProcurementEngine {
    /// Raise a new purchase requisition in Pending state.
    pub fn create_requisition(
        &mut self,
        requested_by: &str,
        items: Vec<RequisitionItemInput>,
    ) -> EngineResult<PurchaseRequisition> {
        validate_required_text(requested_by)
            .map_err(|msg| EngineError::validation("requested_by", msg))?;
        if items.is_empty() {
            return Err(EngineError::validation(
                "items",
                "A requisition needs at least one item",
            ));
        }
        let delimiter = self.config.traceability.delimiter.clone();
        for (index, item) in items.iter().enumerate() {
            let field = format!("items[{index}]");
            validate_item_code(&item.item_code, &delimiter)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_required_text(&item.description)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_positive_quantity(item.quantity)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_required_text(&item.unit)
                .map_err(|msg| EngineError::validation(&field, msg))?;
        }

        let requisition = PurchaseRequisition {
            id: Uuid::new_v4(),
            requested_by: requested_by.to_string(),
            status: DocumentStatus::Pending,
            items: items
                .into_iter()
                .map(|item| RequisitionItem {
                    id: Uuid::new_v4(),
                    item_code: item.item_code,
                    description: item.description,
                    quantity: item.quantity,
                    unit: item.unit,
                })
                .collect(),
            created_at: Utc::now(),
        };

        tracing::info!(
            requisition_id = %requisition.id,
            requested_by,
            items = requisition.items.len(),
            "created purchase requisition"
        );
        self.store.insert_requisition(requisition.clone());
        self.events.record(DomainEvent::RequisitionCreated {
            requisition: requisition.clone(),
        });
        Ok(requisition)
    }

    /// Approve a pending requisition. Terminal: no further transitions.
    pub fn approve_requisition(&mut self, id: Uuid) -> EngineResult<PurchaseRequisition> {
        self.transition_requisition(id, DocumentStatus::Approved)
    }

    /// Reject a pending requisition. Terminal: no further transitions.
    pub fn reject_requisition(&mut self, id: Uuid) -> EngineResult<PurchaseRequisition> {
        self.transition_requisition(id, DocumentStatus::Rejected)
    }

    fn transition_requisition(
        &mut self,
        id: Uuid,
        target: DocumentStatus,
    ) -> EngineResult<PurchaseRequisition> {
        let requisition = self
            .store
            .requisition_mut(id)
            .ok_or_else(|| EngineError::NotFound(format!("Requisition {id}")))?;

        if !requisition.status.is_pending() {
            return Err(EngineError::InvalidState(format!(
                "Requisition {id} is already {}",
                requisition.status
            )));
        }

        requisition.status = target;
        let updated = requisition.clone();

        tracing::info!(requisition_id = %id, status = %target, "requisition transitioned");
        self.events.record(match target {
            DocumentStatus::Approved => DomainEvent::RequisitionApproved { id },
            _ => DomainEvent::RequisitionRejected { id },
        });
        Ok(updated)
    }
}
