//! Validation utilities for procure-to-pay documents

use chrono::NaiveDate;
use rust_decimal::Decimal;

// ============================================================================
// Quantity & Money Validations
// ============================================================================

/// Validate a quantity is strictly positive
pub fn validate_positive_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a unit rate is not negative
pub fn validate_rate(rate: Decimal) -> Result<(), &'static str> {
    if rate < Decimal::ZERO {
        return Err("Rate cannot be negative");
    }
    Ok(())
}

/// Validate a GST percentage is not negative
pub fn validate_gst_percentage(gst_percentage: Decimal) -> Result<(), &'static str> {
    if gst_percentage < Decimal::ZERO {
        return Err("GST percentage cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Disposition Validations
// ============================================================================

/// Validate the four disposition quantities partition a lot exactly:
/// all non-negative, and pass + damage + shelf-life + expiry equals the
/// lot's received quantity with no tolerance.
pub fn validate_disposition_partition(
    pass_qty: Decimal,
    damage_qty: Decimal,
    shelf_life_fail_qty: Decimal,
    expiry_fail_qty: Decimal,
    lot_quantity: Decimal,
) -> Result<(), &'static str> {
    if pass_qty < Decimal::ZERO
        || damage_qty < Decimal::ZERO
        || shelf_life_fail_qty < Decimal::ZERO
        || expiry_fail_qty < Decimal::ZERO
    {
        return Err("Disposition quantities cannot be negative");
    }
    let total = pass_qty + damage_qty + shelf_life_fail_qty + expiry_fail_qty;
    if total != lot_quantity {
        return Err("Disposition quantities must sum to the lot quantity");
    }
    Ok(())
}

// ============================================================================
// Document Field Validations
// ============================================================================

/// Validate an item code: non-empty, at most 32 characters, and free of
/// the traceability delimiter so composed codes stay parseable.
pub fn validate_item_code(code: &str, delimiter: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Item code must not be empty");
    }
    if code.len() > 32 {
        return Err("Item code must be at most 32 characters");
    }
    if code.contains(delimiter) {
        return Err("Item code must not contain the traceability delimiter");
    }
    Ok(())
}

/// Validate a free-text field is present (non-blank)
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field must not be empty");
    }
    Ok(())
}

/// Validate a manufacturing/expiry date pair: the lot must not expire
/// before it was made.
pub fn validate_date_window(
    manufacturing_date: NaiveDate,
    expiry_date: NaiveDate,
) -> Result<(), &'static str> {
    if expiry_date < manufacturing_date {
        return Err("Expiry date cannot precede manufacturing date");
    }
    Ok(())
}
