//! Checkout wizard state machine
//!
//! A linear three-step flow: Shipping -> Payment -> Review. Moving forward
//! requires the current step's form to validate; moving back is always
//! allowed. Submission is only possible from Review and is recoverable: a
//! failed placement returns to Review with the error surfaced and the cart
//! untouched. The cart is cleared only once placement succeeds.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::cart::Cart;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Review,
}

impl CheckoutStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }

    fn next(&self) -> Self {
        match self {
            Self::Shipping => Self::Payment,
            Self::Payment | Self::Review => Self::Review,
        }
    }

    fn previous(&self) -> Self {
        match self {
            Self::Shipping | Self::Payment => Self::Shipping,
            Self::Review => Self::Payment,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct ShippingForm {
    #[validate(length(min = 1, message = "full name is required"))]
    pub full_name: String,
    #[validate(email(message = "enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "enter a valid phone number"))]
    pub phone: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address1: String,
    pub address2: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "postal code is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct PaymentForm {
    #[validate(length(min = 1, message = "cardholder name is required"))]
    pub card_holder: String,
    #[validate(length(min = 12, max = 19, message = "enter a valid card number"))]
    pub card_number: String,
    #[validate(length(min = 4, max = 7, message = "enter a valid expiry"))]
    pub expiry: String,
    #[validate(length(min = 3, max = 4, message = "enter a valid security code"))]
    pub cvv: String,
    pub billing_same_as_shipping: bool,
    #[validate]
    pub billing_address: Option<BillingAddress>,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            card_holder: String::new(),
            card_number: String::new(),
            expiry: String::new(),
            cvv: String::new(),
            billing_same_as_shipping: true,
            billing_address: None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct BillingAddress {
    #[validate(length(min = 1, message = "address is required"))]
    pub address1: String,
    pub address2: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "postal code is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("order can only be submitted from the review step")]
    NotOnReview,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

/// Wizard state for the checkout page. Owns the step forms; the enclosing
/// page owns the cart and the actual submission call.
#[derive(Clone, Debug)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    submitting: bool,
    completed: bool,
    error: Option<String>,
    pub shipping: ShippingForm,
    pub payment: PaymentForm,
}

impl Default for CheckoutWizard {
    fn default() -> Self { Self::new() }
}

impl CheckoutWizard {
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Shipping,
            submitting: false,
            completed: false,
            error: None,
            shipping: ShippingForm::default(),
            payment: PaymentForm::default(),
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Always in `[1, 3]`.
    pub fn step_number(&self) -> u8 {
        self.step().number()
    }

    pub fn is_submitting(&self) -> bool { self.submitting }
    pub fn is_completed(&self) -> bool { self.completed }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    /// Move one step forward if the current step's fields validate. At
    /// Review this is a clamped no-op. Validation failure blocks the
    /// transition and returns the per-field errors for inline display.
    pub fn advance(&mut self) -> Result<(), ValidationErrors> {
        if self.submitting {
            return Ok(());
        }
        self.validate_current_step()?;
        let from = self.step();
        let to = from.next();
        if from != to {
            tracing::debug!(from = from.number(), to = to.number(), "checkout step advanced");
        }
        self.step = to;
        Ok(())
    }

    /// Move one step back, clamped at Shipping. Never validates.
    pub fn retreat(&mut self) {
        if self.submitting {
            return;
        }
        self.step = self.step().previous();
    }

    /// Begin order placement. Only valid from Review and not re-entrant.
    pub fn submit(&mut self) -> Result<(), CheckoutError> {
        if self.submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }
        if self.step() != CheckoutStep::Review {
            return Err(CheckoutError::NotOnReview);
        }
        self.submitting = true;
        self.error = None;
        tracing::debug!("checkout submission started");
        Ok(())
    }

    /// Placement succeeded: clear the cart and mark the flow complete.
    pub fn submission_succeeded(&mut self, cart: &mut Cart) {
        cart.clear();
        self.submitting = false;
        self.completed = true;
        self.error = None;
    }

    /// Placement failed: roll back to Review with the message surfaced.
    /// The cart is untouched so the customer can retry.
    pub fn submission_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(error = %message, "checkout submission failed");
        self.submitting = false;
        self.step = CheckoutStep::Review;
        self.error = Some(message);
    }

    fn validate_current_step(&self) -> Result<(), ValidationErrors> {
        match self.step() {
            CheckoutStep::Shipping => self.shipping.validate(),
            CheckoutStep::Payment => {
                let mut errors = match self.payment.validate() {
                    Ok(()) => ValidationErrors::new(),
                    Err(e) => e,
                };
                // Separate billing details become required the moment the
                // same-as-shipping toggle is switched off.
                if !self.payment.billing_same_as_shipping && self.payment.billing_address.is_none() {
                    errors.add("billing_address", ValidationError::new("required"));
                }
                if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
            }
            CheckoutStep::Review => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartItem;
    use crate::domain::value_objects::Money;
    use rust_decimal::Decimal;

    fn valid_shipping() -> ShippingForm {
        ShippingForm {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "07012345678".into(),
            address1: "1 Analytical Way".into(),
            address2: None,
            city: "London".into(),
            postal_code: "EC1A 1BB".into(),
            country: "GB".into(),
        }
    }

    fn valid_payment() -> PaymentForm {
        PaymentForm {
            card_holder: "Ada Lovelace".into(),
            card_number: "4242424242424242".into(),
            expiry: "12/27".into(),
            cvv: "123".into(),
            billing_same_as_shipping: true,
            billing_address: None,
        }
    }

    fn wizard_at_review() -> CheckoutWizard {
        let mut w = CheckoutWizard::new();
        w.shipping = valid_shipping();
        w.payment = valid_payment();
        w.advance().unwrap();
        w.advance().unwrap();
        assert_eq!(w.step(), CheckoutStep::Review);
        w
    }

    #[test]
    fn test_advance_blocked_by_invalid_shipping() {
        let mut w = CheckoutWizard::new();
        let errors = w.advance().unwrap_err();
        assert!(errors.errors().contains_key("email"));
        assert_eq!(w.step_number(), 1);
    }

    #[test]
    fn test_advance_and_retreat_are_clamped() {
        let mut w = CheckoutWizard::new();
        w.retreat();
        assert_eq!(w.step_number(), 1); // No step zero.

        let mut w = wizard_at_review();
        w.advance().unwrap();
        assert_eq!(w.step_number(), 3); // No step four.
    }

    #[test]
    fn test_steps_never_skip() {
        let mut w = CheckoutWizard::new();
        w.shipping = valid_shipping();
        w.advance().unwrap();
        assert_eq!(w.step(), CheckoutStep::Payment);
        w.retreat();
        assert_eq!(w.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_billing_required_when_toggle_off() {
        let mut w = CheckoutWizard::new();
        w.shipping = valid_shipping();
        w.advance().unwrap();
        w.payment = valid_payment();
        w.payment.billing_same_as_shipping = false;

        let errors = w.advance().unwrap_err();
        assert!(errors.errors().contains_key("billing_address"));
        assert_eq!(w.step(), CheckoutStep::Payment);

        w.payment.billing_address = Some(BillingAddress {
            address1: "2 Billing Rd".into(),
            address2: None,
            city: "London".into(),
            postal_code: "EC2A 2BB".into(),
            country: "GB".into(),
        });
        w.advance().unwrap();
        assert_eq!(w.step(), CheckoutStep::Review);
    }

    #[test]
    fn test_submit_only_from_review() {
        let mut w = CheckoutWizard::new();
        assert!(matches!(w.submit(), Err(CheckoutError::NotOnReview)));

        let mut w = wizard_at_review();
        w.submit().unwrap();
        assert!(w.is_submitting());
        assert!(matches!(w.submit(), Err(CheckoutError::SubmissionInFlight)));
    }

    #[test]
    fn test_failed_submission_is_recoverable() {
        let mut cart = Cart::new("USD");
        cart.add_item(CartItem {
            product_id: "P1".into(),
            variant_id: None,
            name: "Widget".into(),
            quantity: 1,
            unit_price: Money::usd(Decimal::new(1000, 2)),
        });

        let mut w = wizard_at_review();
        w.submit().unwrap();
        w.submission_failed("card declined");

        assert!(!w.is_submitting());
        assert_eq!(w.step(), CheckoutStep::Review);
        assert_eq!(w.error(), Some("card declined"));
        assert!(!cart.is_empty()); // Cart preserved for retry.

        w.submit().unwrap();
        w.submission_succeeded(&mut cart);
        assert!(w.is_completed());
        assert!(cart.is_empty());
        assert_eq!(w.error(), None);
    }
}
