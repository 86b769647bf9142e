//! Purchase order lifecycle operations

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::{
    validate_gst_percentage, validate_item_code, validate_positive_quantity, validate_rate,
    validate_required_text, DocumentStatus, OrderItem, PurchaseOrder,
};

use crate::engine::ProcurementEngine;
use crate::error::{EngineError, EngineResult};
use crate::events::DomainEvent;

/// Input for one ordered line. Money fields are derived, never supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    /// Originating requisition line, when ordering against one.
    pub pr_item_id: Option<Uuid>,
    pub item_code: String,
    pub description: String,
    pub po_quantity: Decimal,
    pub unit: String,
    pub rate: Decimal,
    pub gst_percentage: Decimal,
}

impl ProcurementEngine {
    /// Raise a purchase order against one or more requisitions.
    ///
    /// Every linked requisition must exist and be Pending or Approved;
    /// a rejected requisition cannot be ordered against.
    pub fn create_order(
        &mut self,
        pr_ids: Vec<Uuid>,
        vendor: &str,
        items: Vec<OrderItemInput>,
    ) -> EngineResult<PurchaseOrder> {
        validate_required_text(vendor).map_err(|msg| EngineError::validation("vendor", msg))?;
        if pr_ids.is_empty() {
            return Err(EngineError::validation(
                "pr_ids",
                "An order must link at least one requisition",
            ));
        }
        if items.is_empty() {
            return Err(EngineError::validation(
                "items",
                "An order needs at least one item",
            ));
        }

        for pr_id in &pr_ids {
            let requisition = self
                .store
                .requisition(*pr_id)
                .ok_or_else(|| EngineError::NotFound(format!("Requisition {pr_id}")))?;
            if requisition.status == DocumentStatus::Rejected {
                return Err(EngineError::InvalidState(format!(
                    "Requisition {pr_id} is rejected and cannot be ordered against"
                )));
            }
        }

        let delimiter = self.config.traceability.delimiter.clone();
        for (index, item) in items.iter().enumerate() {
            let field = format!("items[{index}]");
            validate_item_code(&item.item_code, &delimiter)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_required_text(&item.description)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_positive_quantity(item.po_quantity)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_required_text(&item.unit)
                .map_err(|msg| EngineError::validation(&field, msg))?;
            validate_rate(item.rate).map_err(|msg| EngineError::validation(&field, msg))?;
            validate_gst_percentage(item.gst_percentage)
                .map_err(|msg| EngineError::validation(&field, msg))?;

            if let Some(pr_item_id) = item.pr_item_id {
                let linked = pr_ids.iter().any(|pr_id| {
                    self.store
                        .requisition(*pr_id)
                        .is_some_and(|pr| pr.item(pr_item_id).is_some())
                });
                if !linked {
                    return Err(EngineError::validation(
                        &field,
                        "pr_item_id does not belong to any linked requisition",
                    ));
                }
            }
        }

        let order = PurchaseOrder {
            id: Uuid::new_v4(),
            pr_ids,
            vendor: vendor.to_string(),
            status: DocumentStatus::Pending,
            items: items
                .into_iter()
                .map(|item| {
                    OrderItem::new(
                        item.pr_item_id,
                        item.item_code,
                        item.description,
                        item.po_quantity,
                        item.unit,
                        item.rate,
                        item.gst_percentage,
                    )
                })
                .collect(),
            created_at: Utc::now(),
        };

        tracing::info!(
            order_id = %order.id,
            vendor,
            items = order.items.len(),
            "created purchase order"
        );
        self.store.insert_order(order.clone());
        self.events.record(DomainEvent::OrderCreated {
            order: order.clone(),
        });
        Ok(order)
    }

    /// Approve a pending order. Terminal: no further transitions.
    pub fn approve_order(&mut self, id: Uuid) -> EngineResult<PurchaseOrder> {
        self.transition_order(id, DocumentStatus::Approved)
    }

    /// Reject a pending order. Terminal: no further transitions.
    pub fn reject_order(&mut self, id: Uuid) -> EngineResult<PurchaseOrder> {
        self.transition_order(id, DocumentStatus::Rejected)
    }

    fn transition_order(
        &mut self,
        id: Uuid,
        target: DocumentStatus,
    ) -> EngineResult<PurchaseOrder> {
        let order = self
            .store
            .order_mut(id)
            .ok_or_else(|| EngineError::NotFound(format!("Purchase order {id}")))?;

        if !order.status.is_pending() {
            return Err(EngineError::InvalidState(format!(
                "Purchase order {id} is already {}",
                order.status
            )));
        }

        order.status = target;
        let updated = order.clone();

        tracing::info!(order_id = %id, status = %target, "purchase order transitioned");
        self.events.record(match target {
            DocumentStatus::Approved => DomainEvent::OrderApproved { id },
            _ => DomainEvent::OrderRejected { id },
        });
        Ok(updated)
    }
}
