//! Backend order records and their normalization
//!
//! The backend's order schema drifted over time: `price` became
//! `unit_price`, `notes` became `customer_notes`, sale pricing arrived as
//! `current_price`/`is_on_sale`, and some list payloads carry an
//! `item_count` instead of the items themselves. Every variant is absorbed
//! here, once, at the fetch boundary. Past this module there is exactly one
//! shape, [`OrderRecord`], and no fallback chains.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::{LineItem, OrderTotals};
use crate::domain::status::{classify, StatusBadge};
use crate::domain::value_objects::{round_display, Money};

/// Wire shape of an order as the backend returns it. Aliases cover the
/// historical field names; the richer recent variant is canonical.
#[derive(Clone, Debug, Deserialize)]
pub struct RawOrder {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default, alias = "line_items")]
    pub items: Vec<RawOrderItem>,
    pub item_count: Option<u32>,
    pub subtotal: Option<f64>,
    pub tax_amount: Option<f64>,
    pub shipping_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub total: Option<f64>,
    pub currency: Option<String>,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub shipping_address: Option<Address>,
    #[serde(alias = "notes")]
    pub customer_notes: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawOrderItem {
    pub id: Option<String>,
    #[serde(default)]
    pub product_id: String,
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(alias = "price")]
    pub unit_price: Option<f64>,
    pub current_price: Option<f64>,
    #[serde(default)]
    pub is_on_sale: bool,
    pub quantity: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<String>,
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub zip: String,
    pub country: String,
}

/// Canonical order record consumed by the rendering layer.
#[derive(Clone, Debug, Serialize)]
pub struct OrderRecord {
    pub id: String,
    pub status: String,
    pub payment_status: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub currency: String,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub shipping_address: Option<Address>,
    pub customer_notes: Option<String>,
    stored_item_count: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub name: String,
    /// Sale-resolved price: `current_price` when the sale flag is set,
    /// otherwise the catalog unit price.
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        round_display(self.unit_price * Decimal::from(self.quantity))
    }
}

impl RawOrder {
    /// Map a backend response into the canonical record. Missing or
    /// unparseable amounts default to zero; quantities default to one.
    pub fn normalize(self) -> OrderRecord {
        let currency = self.currency.unwrap_or_else(|| "USD".to_string());
        let items = self.items.into_iter().map(RawOrderItem::normalize).collect();
        OrderRecord {
            id: self.id.clone(),
            status: self.status,
            payment_status: self.payment_status,
            items,
            subtotal: amount_or_zero(self.subtotal, &self.id, "subtotal"),
            tax: amount_or_zero(self.tax_amount, &self.id, "tax_amount"),
            shipping: amount_or_zero(self.shipping_amount, &self.id, "shipping_amount"),
            discount: amount_or_zero(self.discount_amount, &self.id, "discount_amount"),
            total: amount_or_zero(self.total, &self.id, "total"),
            currency,
            tracking_number: self.tracking_number,
            estimated_delivery: self.estimated_delivery,
            created_at: self.created_at,
            shipping_address: self.shipping_address,
            customer_notes: self.customer_notes,
            stored_item_count: self.item_count,
        }
    }
}

impl RawOrderItem {
    fn normalize(self) -> OrderItem {
        let base = self.unit_price;
        let effective = if self.is_on_sale { self.current_price.or(base) } else { base };
        OrderItem {
            id: self.id.unwrap_or_else(|| self.product_id.clone()),
            product_id: self.product_id,
            name: self.name,
            unit_price: effective
                .and_then(Decimal::from_f64)
                .unwrap_or(Decimal::ZERO),
            quantity: self.quantity.unwrap_or(1).max(1),
        }
    }
}

impl OrderRecord {
    /// Number of lines, falling back to the list-payload count when the
    /// backend omitted the items themselves.
    pub fn item_count(&self) -> usize {
        if self.items.is_empty() {
            self.stored_item_count.unwrap_or(0) as usize
        } else {
            self.items.len()
        }
    }

    pub fn status_badge(&self) -> StatusBadge { classify(&self.status) }
    pub fn payment_badge(&self) -> StatusBadge { classify(&self.payment_status) }

    /// Breakdown as stored by the backend, for the order detail page.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: round_display(self.subtotal),
            shipping_cost: round_display(self.shipping),
            tax: round_display(self.tax),
            discount: round_display(self.discount),
            total: round_display(self.total),
        }
    }

    pub fn total_money(&self) -> Money {
        Money::new(self.total, &self.currency)
    }

    /// Lines in calculator form, for pages that recompute locally.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(|i| LineItem {
            id: i.id.clone(),
            product_reference: i.product_id.clone(),
            unit_price: i.unit_price,
            quantity: i.quantity,
        }).collect()
    }
}

fn amount_or_zero(value: Option<f64>, order_id: &str, field: &str) -> Decimal {
    match value {
        None => Decimal::ZERO,
        Some(v) => match Decimal::from_f64(v) {
            Some(d) => round_display(d),
            None => {
                tracing::warn!(order_id, field, value = v, "unparseable amount, defaulting to zero");
                Decimal::ZERO
            }
        },
    }
}
