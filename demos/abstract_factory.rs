//! Abstract factory: pick a widget family once, render without naming types.
//!
//! Run with `RUST_LOG=ferrous_factory=debug cargo run --example abstract_factory`
//! to also see registry events.

use ferrous_factory::families::gui::{self, GuiFactory, MAC, WINDOWS};
use ferrous_factory::families::reference::{self, ProductA, ProductB, V1, V2};
use ferrous_factory::{FactoryResult, LoggingObserver, Variant};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ===== Client Code =====

fn render_ui(factory: &dyn GuiFactory) -> FactoryResult<()> {
    let button = factory.create_button()?;
    let checkbox = factory.create_checkbox()?;

    info!("{}", button.render());
    info!("{}", checkbox.render());
    Ok(())
}

fn main() -> FactoryResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut products = gui::collection();
    products.add_observer(Arc::new(LoggingObserver::with_prefix("gui")));
    let registry = products.build()?;

    for variant in [MAC, WINDOWS] {
        info!("App: launched with the {} factory", variant);
        render_ui(&registry.resolve_family(variant)?)?;
    }

    // Platforms outside the closed set are rejected up front
    if let Err(error) = registry.resolve_family(Variant::new("Linux")) {
        warn!("{}", error);
    }

    // Generic products: collaboration only works within one variant
    let registry = reference::registry()?;
    for variant in [V1, V2] {
        info!("Client: testing client code with the {} factory", variant);
        let family = registry.resolve_family(variant)?;
        let a = family.create::<dyn ProductA>()?;
        let b = family.create::<dyn ProductB>()?;

        info!("{}", b.useful_function_b());
        info!("{}", b.collaborate(a.as_ref())?);
    }

    let a1 = registry.resolve_family(V1)?.create::<dyn ProductA>()?;
    let b2 = registry.resolve_family(V2)?.create::<dyn ProductB>()?;
    match b2.collaborate(a1.as_ref()) {
        Ok(result) => info!("{}", result),
        Err(error) => warn!("Mixed families refused: {}", error),
    }

    Ok(())
}
