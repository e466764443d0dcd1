//! Payment processing in factory-method style.
//!
//! [`PaymentProcessor::process_payment`] is written once against
//! [`PaymentMethod`]. Each processor only decides which method to create, so
//! a new payment option is one new method type plus one new creator.

use std::fmt;
use std::sync::Arc;

use crate::{CreationRegistry, Creator, FactoryResult, Product, ProductCollection, Variant};

pub const CREDIT_CARD: Variant = Variant::new("CreditCard");
pub const PAYPAL: Variant = Variant::new("PayPal");

/// Receipt of a completed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub method: Variant,
    pub amount: u64,
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Paid {} via {}", self.amount, self.method)
    }
}

pub trait PaymentMethod: Product {
    fn pay(&self, amount: u64) -> Payment;
}

pub struct CreditCardPayment;

impl Product for CreditCardPayment {
    fn variant(&self) -> Variant {
        CREDIT_CARD
    }
}

impl PaymentMethod for CreditCardPayment {
    fn pay(&self, amount: u64) -> Payment {
        Payment { method: CREDIT_CARD, amount }
    }
}

pub struct PayPalPayment;

impl Product for PayPalPayment {
    fn variant(&self) -> Variant {
        PAYPAL
    }
}

impl PaymentMethod for PayPalPayment {
    fn pay(&self, amount: u64) -> Payment {
        Payment { method: PAYPAL, amount }
    }
}

/// The payment template, available on every payment-method creator.
///
/// # Examples
///
/// ```
/// use ferrous_factory::families::payment::{
///     CreditCardProcessor, PayPalProcessor, PaymentProcessor, CREDIT_CARD, PAYPAL,
/// };
///
/// let card = CreditCardProcessor.process_payment(10_000);
/// assert_eq!(card.method, CREDIT_CARD);
/// assert_eq!(card.amount, 10_000);
///
/// let processors: Vec<Box<dyn PaymentProcessor>> =
///     vec![Box::new(CreditCardProcessor), Box::new(PayPalProcessor)];
/// let methods: Vec<_> = processors.iter().map(|p| p.process_payment(1).method).collect();
/// assert_eq!(methods, vec![CREDIT_CARD, PAYPAL]);
/// ```
pub trait PaymentProcessor: Creator<Product = dyn PaymentMethod> {
    fn process_payment(&self, amount: u64) -> Payment {
        let method = self.make_product();
        tracing::debug!(target: "ferrous_factory", method = %method.variant(), amount, "processing payment");
        method.pay(amount)
    }
}

impl<C: ?Sized + Creator<Product = dyn PaymentMethod>> PaymentProcessor for C {}

pub struct CreditCardProcessor;

impl Creator for CreditCardProcessor {
    type Product = dyn PaymentMethod;

    fn make_product(&self) -> Arc<dyn PaymentMethod> {
        Arc::new(CreditCardPayment)
    }
}

pub struct PayPalProcessor;

impl Creator for PayPalProcessor {
    type Product = dyn PaymentMethod;

    fn make_product(&self) -> Arc<dyn PaymentMethod> {
        Arc::new(PayPalPayment)
    }
}

/// Registry with both processors registered as creators.
pub fn registry() -> FactoryResult<CreationRegistry> {
    let mut products = ProductCollection::new();
    products
        .add_creator(CREDIT_CARD, CreditCardProcessor)
        .add_creator(PAYPAL, PayPalProcessor);
    products.build()
}
