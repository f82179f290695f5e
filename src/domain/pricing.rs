//! Cart/order totals calculation
//!
//! One calculator feeds the cart page, checkout summary, order detail and
//! confirmation pages. Amounts accumulate at full precision and are rounded
//! half-up to display scale exactly once per component.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::value_objects::round_display;

/// A purchasable line as the calculator sees it: catalog price times a
/// positive quantity. Prices come from the catalog, never from user input.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub product_reference: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Shipping and tax rules in effect for the current storefront.
#[derive(Clone, Debug)]
pub struct PricingRules {
    pub free_shipping_threshold: Decimal,
    pub flat_shipping_cost: Decimal,
    pub tax_rate: Decimal,
}

/// Monetary breakdown displayed to the customer. Every field is already
/// rounded to display scale and non-negative, and
/// `total == subtotal + shipping_cost + tax - discount` holds exactly.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Input-validation failures. These guard against impossible data from the
/// caller (catalog corruption, sign bugs), not user mistakes, so they fail
/// fast instead of producing a silently wrong total.
#[derive(Debug, Clone, Error)]
pub enum PricingError {
    #[error("line item {item_id} has a negative unit price")]
    NegativeUnitPrice { item_id: String },
    #[error("line item {item_id} has zero quantity")]
    ZeroQuantity { item_id: String },
    #[error("tax rate is negative")]
    NegativeTaxRate,
    #[error("shipping rule amounts must be non-negative")]
    NegativeShippingRule,
}

/// Compute the displayed totals for a set of line items.
///
/// Free shipping requires the subtotal to be **strictly above** the
/// threshold: an order exactly at the threshold still pays the flat rate.
/// The discount is clamped to `[0, subtotal]` so it can never drive the
/// total negative. An empty item list short-circuits to all-zero totals,
/// shipping included: an empty cart owes nothing.
pub fn compute_totals(
    items: &[LineItem],
    rules: &PricingRules,
    discount: Option<Decimal>,
) -> Result<OrderTotals, PricingError> {
    if rules.tax_rate < Decimal::ZERO {
        return Err(PricingError::NegativeTaxRate);
    }
    if rules.flat_shipping_cost < Decimal::ZERO || rules.free_shipping_threshold < Decimal::ZERO {
        return Err(PricingError::NegativeShippingRule);
    }
    for item in items {
        if item.unit_price < Decimal::ZERO {
            return Err(PricingError::NegativeUnitPrice { item_id: item.id.clone() });
        }
        if item.quantity == 0 {
            return Err(PricingError::ZeroQuantity { item_id: item.id.clone() });
        }
    }

    if items.is_empty() {
        return Ok(OrderTotals::default());
    }

    let raw_subtotal: Decimal = items
        .iter()
        .map(|i| i.unit_price * Decimal::from(i.quantity))
        .sum();
    let subtotal = round_display(raw_subtotal);

    let shipping_cost = if subtotal > rules.free_shipping_threshold {
        Decimal::ZERO
    } else {
        rules.flat_shipping_cost
    };

    let tax = round_display(subtotal * rules.tax_rate);
    let discount = round_display(
        discount
            .unwrap_or(Decimal::ZERO)
            .clamp(Decimal::ZERO, subtotal),
    );
    let total = subtotal + shipping_cost + tax - discount;

    Ok(OrderTotals { subtotal, shipping_cost, tax, discount, total })
}
