/// Factory-method scenarios: one creator per variant, a shared template

use ferrous_factory::families::gui::{Dialog, MacDialog, WindowsDialog};
use ferrous_factory::families::payment::{
    self, CreditCardProcessor, PayPalProcessor, Payment, PaymentMethod, PaymentProcessor,
    CREDIT_CARD, PAYPAL,
};
use ferrous_factory::{Creator, Lifetime, Product, Resolver, Variant};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn each_processor_pays_with_its_own_method() {
    assert_eq!(
        CreditCardProcessor.process_payment(10_000),
        Payment { method: CREDIT_CARD, amount: 10_000 }
    );
    assert_eq!(
        PayPalProcessor.process_payment(20_000),
        Payment { method: PAYPAL, amount: 20_000 }
    );
}

#[test]
fn client_code_works_through_the_base_trait() {
    fn checkout(processor: &dyn PaymentProcessor, amount: u64) -> Payment {
        processor.process_payment(amount)
    }

    let processors: Vec<(Box<dyn PaymentProcessor>, Variant)> = vec![
        (Box::new(CreditCardProcessor), CREDIT_CARD),
        (Box::new(PayPalProcessor), PAYPAL),
    ];

    for (processor, expected) in &processors {
        let payment = checkout(processor.as_ref(), 42);
        assert_eq!(payment.method, *expected);
        assert_eq!(payment.amount, 42);
    }
}

// Records every pay() call so we can prove no other creator's logic runs
struct Ledger {
    calls: AtomicUsize,
}

struct GiftCardPayment(Arc<Ledger>);

const GIFT_CARD: Variant = Variant::new("GiftCard");

impl Product for GiftCardPayment {
    fn variant(&self) -> Variant {
        GIFT_CARD
    }
}

impl PaymentMethod for GiftCardPayment {
    fn pay(&self, amount: u64) -> Payment {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        Payment { method: GIFT_CARD, amount }
    }
}

struct GiftCardProcessor(Arc<Ledger>);

impl Creator for GiftCardProcessor {
    type Product = dyn PaymentMethod;

    fn make_product(&self) -> Arc<dyn PaymentMethod> {
        Arc::new(GiftCardPayment(self.0.clone()))
    }
}

#[test]
fn new_variant_extends_without_modification() {
    let ledger = Arc::new(Ledger { calls: AtomicUsize::new(0) });
    let gift = GiftCardProcessor(ledger.clone());

    // The template is inherited, not rewritten
    assert_eq!(gift.process_payment(500), Payment { method: GIFT_CARD, amount: 500 });
    assert_eq!(ledger.calls.load(Ordering::SeqCst), 1);

    // Other processors never reach the new method
    CreditCardProcessor.process_payment(1);
    PayPalProcessor.process_payment(1);
    assert_eq!(ledger.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn perform_task_runs_domain_logic_on_a_fresh_product() {
    let ledger = Arc::new(Ledger { calls: AtomicUsize::new(0) });
    let gift = GiftCardProcessor(ledger.clone());

    let amounts: Vec<u64> = (1..=3).map(|n| gift.perform_task(|m| m.pay(n * 10).amount)).collect();
    assert_eq!(amounts, vec![10, 20, 30]);
    assert_eq!(ledger.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn creators_resolve_through_the_registry() {
    let registry = payment::registry().unwrap();

    let card = registry.resolve::<dyn PaymentMethod>(CREDIT_CARD, Lifetime::Transient).unwrap();
    let paypal = registry.resolve::<dyn PaymentMethod>(PAYPAL, Lifetime::Transient).unwrap();

    assert_eq!(card.pay(7).method, CREDIT_CARD);
    assert_eq!(paypal.pay(7).method, PAYPAL);

    let sources: Vec<&str> = registry.descriptors().iter().map(|d| d.source).collect();
    assert!(sources.iter().any(|s| s.ends_with("CreditCardProcessor")));
    assert!(sources.iter().any(|s| s.ends_with("PayPalProcessor")));
}

#[test]
fn dialog_template_wraps_the_created_button() {
    assert_eq!(WindowsDialog.render(), "This dialog's button is [Windows Button]");
    assert_eq!(MacDialog.render(), "This dialog's button is [Mac Button]");

    let dialogs: Vec<Box<dyn Dialog>> = vec![Box::new(WindowsDialog), Box::new(MacDialog)];
    let rendered: Vec<String> = dialogs.iter().map(|d| d.render()).collect();
    assert_eq!(rendered.len(), 2);
    assert!(rendered[0].contains("Windows"));
}
