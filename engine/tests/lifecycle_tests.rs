//! Document lifecycle tests
//!
//! Tests for requisition and order lifecycles including:
//! - Property 1: Terminal Status Immutability
//! - Property 2: Derived Money Field Consistency
//! - Property 3: Rejected Commands Leave No Trace

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use p2p_engine::{EngineError, OrderItemInput, ProcurementEngine, RequisitionItemInput};
use shared::DocumentStatus;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn requisition_item(code: &str, qty: &str) -> RequisitionItemInput {
    RequisitionItemInput {
        item_code: code.to_string(),
        description: "Raw material".to_string(),
        quantity: dec(qty),
        unit: "KG".to_string(),
    }
}

fn order_item(code: &str, qty: &str, rate: &str, gst: &str) -> OrderItemInput {
    OrderItemInput {
        pr_item_id: None,
        item_code: code.to_string(),
        description: "Raw material".to_string(),
        po_quantity: dec(qty),
        unit: "KG".to_string(),
        rate: dec(rate),
        gst_percentage: dec(gst),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_create_requisition_starts_pending() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();

        assert_eq!(pr.status, DocumentStatus::Pending);
        assert_eq!(pr.requested_by, "stores");
        assert_eq!(pr.items.len(), 1);
        assert_eq!(engine.requisitions().len(), 1);
    }

    #[test]
    fn test_create_requisition_rejects_blank_requester() {
        let mut engine = ProcurementEngine::default();
        let err = engine
            .create_requisition("  ", vec![requisition_item("RM-100", "50")])
            .unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(engine.requisitions().is_empty());
    }

    #[test]
    fn test_create_requisition_rejects_empty_items() {
        let mut engine = ProcurementEngine::default();
        let err = engine.create_requisition("stores", vec![]).unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_create_requisition_rejects_non_positive_quantity() {
        let mut engine = ProcurementEngine::default();
        let err = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "0")])
            .unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(engine.requisitions().is_empty());
    }

    #[test]
    fn test_create_requisition_rejects_item_code_with_delimiter() {
        let mut engine = ProcurementEngine::default();
        let err = engine
            .create_requisition("stores", vec![requisition_item("RM|100", "5")])
            .unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_requisition_approval_is_terminal() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();

        let approved = engine.approve_requisition(pr.id).unwrap();
        assert_eq!(approved.status, DocumentStatus::Approved);

        // Re-approving or rejecting a terminal document fails without mutation
        assert!(matches!(
            engine.approve_requisition(pr.id).unwrap_err(),
            EngineError::InvalidState(_)
        ));
        assert!(matches!(
            engine.reject_requisition(pr.id).unwrap_err(),
            EngineError::InvalidState(_)
        ));
        assert_eq!(
            engine.requisitions()[0].status,
            DocumentStatus::Approved
        );
    }

    #[test]
    fn test_requisition_rejection_is_terminal() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();

        engine.reject_requisition(pr.id).unwrap();
        assert!(matches!(
            engine.approve_requisition(pr.id).unwrap_err(),
            EngineError::InvalidState(_)
        ));
        assert_eq!(engine.requisitions()[0].status, DocumentStatus::Rejected);
    }

    #[test]
    fn test_transition_on_unknown_requisition_is_not_found() {
        let mut engine = ProcurementEngine::default();
        let err = engine.approve_requisition(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_create_order_against_pending_and_approved_requisitions() {
        let mut engine = ProcurementEngine::default();
        let pending = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();
        let approved = engine
            .create_requisition("stores", vec![requisition_item("RM-200", "20")])
            .unwrap();
        engine.approve_requisition(approved.id).unwrap();

        let po = engine
            .create_order(
                vec![pending.id, approved.id],
                "Acme Supplies",
                vec![order_item("RM-100", "50", "10", "18")],
            )
            .unwrap();

        assert_eq!(po.status, DocumentStatus::Pending);
        assert_eq!(po.pr_ids.len(), 2);
        assert_eq!(po.vendor, "Acme Supplies");
    }

    #[test]
    fn test_create_order_against_rejected_requisition_fails() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();
        engine.reject_requisition(pr.id).unwrap();

        let err = engine
            .create_order(
                vec![pr.id],
                "Acme Supplies",
                vec![order_item("RM-100", "50", "10", "18")],
            )
            .unwrap_err();

        assert_eq!(err.code(), "INVALID_STATE");
        assert!(engine.orders().is_empty());
    }

    #[test]
    fn test_create_order_requires_known_requisitions_and_vendor() {
        let mut engine = ProcurementEngine::default();

        let err = engine
            .create_order(
                vec![Uuid::new_v4()],
                "Acme Supplies",
                vec![order_item("RM-100", "50", "10", "18")],
            )
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();
        let err = engine
            .create_order(vec![pr.id], "", vec![order_item("RM-100", "50", "10", "18")])
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = engine.create_order(vec![], "Acme Supplies", vec![]).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_create_order_rejects_negative_rate_and_gst() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();

        let err = engine
            .create_order(
                vec![pr.id],
                "Acme Supplies",
                vec![order_item("RM-100", "50", "-1", "18")],
            )
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = engine
            .create_order(
                vec![pr.id],
                "Acme Supplies",
                vec![order_item("RM-100", "50", "10", "-5")],
            )
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(engine.orders().is_empty());
    }

    #[test]
    fn test_order_item_links_must_belong_to_linked_requisitions() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();

        let mut item = order_item("RM-100", "50", "10", "18");
        item.pr_item_id = Some(Uuid::new_v4());

        let err = engine
            .create_order(vec![pr.id], "Acme Supplies", vec![item])
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let mut item = order_item("RM-100", "50", "10", "18");
        item.pr_item_id = Some(pr.items[0].id);
        assert!(engine
            .create_order(vec![pr.id], "Acme Supplies", vec![item])
            .is_ok());
    }

    #[test]
    fn test_order_money_fields_are_derived() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "10")])
            .unwrap();
        let po = engine
            .create_order(
                vec![pr.id],
                "Acme Supplies",
                vec![order_item("RM-100", "10", "25.50", "18")],
            )
            .unwrap();

        let item = &po.items[0];
        assert_eq!(item.value, dec("255.00"));
        assert_eq!(item.gst_amount, dec("45.90"));
        assert_eq!(item.total_amount, dec("300.90"));
    }

    #[test]
    fn test_order_approval_is_terminal() {
        let mut engine = ProcurementEngine::default();
        let pr = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();
        let po = engine
            .create_order(
                vec![pr.id],
                "Acme Supplies",
                vec![order_item("RM-100", "50", "10", "18")],
            )
            .unwrap();

        engine.approve_order(po.id).unwrap();
        assert!(matches!(
            engine.reject_order(po.id).unwrap_err(),
            EngineError::InvalidState(_)
        ));
        assert_eq!(engine.orders()[0].status, DocumentStatus::Approved);
    }

    #[test]
    fn test_document_counts_track_statuses() {
        let mut engine = ProcurementEngine::default();
        let a = engine
            .create_requisition("stores", vec![requisition_item("RM-100", "50")])
            .unwrap();
        let b = engine
            .create_requisition("stores", vec![requisition_item("RM-200", "10")])
            .unwrap();
        engine.approve_requisition(a.id).unwrap();
        engine.reject_requisition(b.id).unwrap();

        let counts = engine.document_counts();
        assert_eq!(counts.requisitions.pending, 0);
        assert_eq!(counts.requisitions.approved, 1);
        assert_eq!(counts.requisitions.rejected, 1);
        assert_eq!(counts.receipts, 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for quantities in 0.1 .. 1000.0
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for rates in 0.01 .. 100.00
    fn rate_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for GST percentages in 0 .. 28
    fn gst_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=28i64).prop_map(Decimal::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 2: value, GST amount and total are always consistent
        /// with rate, quantity and GST percentage.
        #[test]
        fn prop_order_money_fields_consistent(
            qty in quantity_strategy(),
            rate in rate_strategy(),
            gst in gst_strategy(),
        ) {
            let mut engine = ProcurementEngine::default();
            let pr = engine
                .create_requisition("stores", vec![requisition_item("RM-100", "1")])
                .unwrap();

            let mut item = order_item("RM-100", "1", "1", "0");
            item.po_quantity = qty;
            item.rate = rate;
            item.gst_percentage = gst;

            let po = engine
                .create_order(vec![pr.id], "Acme Supplies", vec![item])
                .unwrap();
            let line = &po.items[0];

            prop_assert_eq!(line.value, rate * qty);
            prop_assert_eq!(line.gst_amount, line.value * gst / Decimal::from(100));
            prop_assert_eq!(line.total_amount, line.value + line.gst_amount);
        }

        /// Property 1: after any first transition, the second transition
        /// always fails and the status never changes again.
        #[test]
        fn prop_terminal_status_immutable(first in any::<bool>(), second in any::<bool>()) {
            let mut engine = ProcurementEngine::default();
            let pr = engine
                .create_requisition("stores", vec![requisition_item("RM-100", "5")])
                .unwrap();

            let expected = if first {
                engine.approve_requisition(pr.id).unwrap();
                DocumentStatus::Approved
            } else {
                engine.reject_requisition(pr.id).unwrap();
                DocumentStatus::Rejected
            };

            let result = if second {
                engine.approve_requisition(pr.id)
            } else {
                engine.reject_requisition(pr.id)
            };

            prop_assert!(result.is_err());
            prop_assert_eq!(engine.requisitions()[0].status, expected);
        }
    }
}
