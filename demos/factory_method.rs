//! Factory method: a fixed template, one creator per variant.

use ferrous_factory::families::gui::{Dialog, MacDialog, WindowsDialog};
use ferrous_factory::families::payment::{
    self, CreditCardProcessor, PayPalProcessor, PaymentMethod, PaymentProcessor,
};
use ferrous_factory::{FactoryResult, Resolver};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ===== Client Code =====

fn client_payment_code(processor: &dyn PaymentProcessor, amount: u64) {
    info!("Client: I don't know the processor's concrete type, but it still works.");
    let payment = processor.process_payment(amount);
    info!("{}", payment);
}

fn client_dialog_code(dialog: &dyn Dialog) {
    info!("{}", dialog.render());
}

fn main() -> FactoryResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    client_dialog_code(&WindowsDialog);
    client_dialog_code(&MacDialog);

    info!("App: launched with the CreditCardProcessor.");
    client_payment_code(&CreditCardProcessor, 10_000);

    info!("App: launched with the PayPalProcessor.");
    client_payment_code(&PayPalProcessor, 20_000);

    // The same creators, looked up by name as a simple factory
    let registry = payment::registry()?;
    for name in ["CreditCard", "PayPal", "Cash"] {
        match registry.create_by_name("PaymentMethod", name) {
            Ok(product) => {
                let method = product.downcast::<dyn PaymentMethod>()?;
                info!("{}", method.pay(500));
            }
            Err(error) => warn!("{}", error),
        }
    }

    let method = registry.resolve_transient::<dyn PaymentMethod>(payment::PAYPAL)?;
    info!("{}", method.pay(1));

    Ok(())
}
