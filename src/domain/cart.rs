//! Cart aggregate
//!
//! Owned by the cart page; recomputed display values come from
//! [`pricing::compute_totals`]. Quantity edits are clamped against the
//! stock figure supplied by the catalog, never trusted from the input field.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::pricing::{self, LineItem, OrderTotals, PricingError, PricingRules};
use crate::domain::value_objects::{Money, Quantity};

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    customer_id: Option<String>,
    items: Vec<CartItem>,
    subtotal: Money,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct CartItem {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl CartItem {
    pub fn line_total(&self) -> Money { self.unit_price.multiply(self.quantity) }
}

impl Cart {
    pub fn new(currency: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(), customer_id: None,
            items: vec![], subtotal: Money::zero(currency), currency: currency.to_string(),
            created_at: Utc::now(), updated_at: Utc::now(),
        }
    }

    pub fn for_customer(customer_id: impl Into<String>, currency: &str) -> Self {
        let mut cart = Self::new(currency);
        cart.customer_id = Some(customer_id.into());
        cart
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == item.product_id && i.variant_id == item.variant_id) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
        self.recalculate();
    }

    /// Set a line's quantity, clamped to `[1, stock_available]`. Dropping a
    /// line entirely goes through [`Cart::remove_item`].
    pub fn set_quantity(&mut self, product_id: &str, requested: u32, stock_available: u32) -> Result<u32, CartError> {
        let item = self.items.iter_mut().find(|i| i.product_id == product_id).ok_or(CartError::ItemNotFound)?;
        let clamped = Quantity::clamped(requested, stock_available).value();
        if clamped != requested {
            tracing::debug!(product_id, requested, clamped, "quantity clamped to stock");
        }
        item.quantity = clamped;
        self.recalculate();
        Ok(clamped)
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() == before { return Err(CartError::ItemNotFound); }
        self.recalculate();
        Ok(())
    }

    pub fn clear(&mut self) { self.items.clear(); self.recalculate(); }

    /// Displayed monetary breakdown under the current shipping/tax rules.
    pub fn totals(&self, rules: &PricingRules, discount: Option<Decimal>) -> Result<OrderTotals, PricingError> {
        let lines: Vec<LineItem> = self.items.iter().map(|i| LineItem {
            id: i.product_id.clone(),
            product_reference: i.product_id.clone(),
            unit_price: i.unit_price.amount(),
            quantity: i.quantity,
        }).collect();
        pricing::compute_totals(&lines, rules, discount)
    }

    fn recalculate(&mut self) {
        self.subtotal = self.items.iter().fold(Money::zero(&self.currency), |acc, i| acc.add(&i.line_total()).unwrap_or(acc));
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("item not found in cart")]
    ItemNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(qty: u32) -> CartItem {
        CartItem { product_id: "P1".into(), variant_id: None, name: "Widget".into(), quantity: qty, unit_price: Money::usd(Decimal::new(10, 0)) }
    }

    #[test]
    fn test_cart_operations() {
        let mut cart = Cart::new("USD");
        cart.add_item(widget(2));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal().amount(), Decimal::new(20, 0));
        cart.add_item(widget(1));
        assert_eq!(cart.items()[0].quantity, 3); // Merged
    }

    #[test]
    fn test_set_quantity_clamps_to_stock() {
        let mut cart = Cart::new("USD");
        cart.add_item(widget(2));
        assert_eq!(cart.set_quantity("P1", 99, 5).unwrap(), 5);
        assert_eq!(cart.set_quantity("P1", 0, 5).unwrap(), 1);
        assert!(cart.set_quantity("P2", 1, 5).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::for_customer("CUST1", "USD");
        cart.add_item(widget(1));
        cart.remove_item("P1").unwrap();
        assert!(cart.is_empty());
        assert!(cart.remove_item("P1").is_err());
        cart.add_item(widget(4));
        cart.clear();
        assert_eq!(cart.subtotal().amount(), Decimal::ZERO);
    }

    #[test]
    fn test_cart_totals_delegate_to_calculator() {
        let mut cart = Cart::new("USD");
        cart.add_item(CartItem { product_id: "P1".into(), variant_id: None, name: "A".into(), quantity: 2, unit_price: Money::usd(Decimal::new(2999, 2)) });
        cart.add_item(CartItem { product_id: "P2".into(), variant_id: None, name: "B".into(), quantity: 1, unit_price: Money::usd(Decimal::new(1000, 2)) });
        let rules = PricingRules {
            free_shipping_threshold: Decimal::new(50, 0),
            flat_shipping_cost: Decimal::new(999, 2),
            tax_rate: Decimal::new(8, 2),
        };
        let t = cart.totals(&rules, None).unwrap();
        assert_eq!(t.total, Decimal::new(7558, 2));
    }
}
