//! Storefront display-logic core
//!
//! The derived-value layer behind an e-commerce storefront frontend: it
//! turns backend cart/order records into the monetary breakdowns, status
//! badges and list-request parameters the pages render, and drives the
//! checkout wizard. Everything here is synchronous and pure; data fetching
//! and rendering live in the enclosing application.
//!
//! ## Features
//! - Cart/order totals with free-shipping threshold, tax and discounts
//! - Status classification into display badges
//! - List-view query parameter parsing and serialization
//! - Checkout wizard (Shipping -> Payment -> Review) with form validation
//! - Backend response normalization into one canonical order shape

pub mod checkout;
pub mod domain;
pub mod query;

pub use checkout::{CheckoutStep, CheckoutWizard};
pub use domain::cart::{Cart, CartItem};
pub use domain::order::{OrderRecord, RawOrder};
pub use domain::pricing::{compute_totals, LineItem, OrderTotals, PricingRules};
pub use domain::status::{classify, StatusBadge, StatusCategory};
pub use domain::value_objects::{Money, Quantity};
pub use query::{ListQueryParams, SortOrder};
