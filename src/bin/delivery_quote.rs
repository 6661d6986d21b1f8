//! Computes delivery quotes from a JSON catalog.
//!
//! ```text
//! delivery-quote --catalog catalog.json --request request.json
//! ```
//!
//! The catalog holds providers, pricing rules, zones, product attributes and
//! category defaults. The request is a serialized `QuoteRequest`. The ranked
//! quote set is printed as JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use delivery_gateway::application::services::{QuoteCalculator, QuoteRequest};
use delivery_gateway::config::AppConfig;
use delivery_gateway::domain::entities::{
    CategoryDefaults, DeliveryAttributes, PricingRule, Provider, Zone,
};
use delivery_gateway::domain::value_objects::ProductId;
use delivery_gateway::infrastructure::persistence::in_memory::{
    InMemoryAttributeRepository, InMemoryPricingRepository,
};
use delivery_gateway::infrastructure::persistence::traits::AttributeRepository;
use delivery_gateway::telemetry;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Compute ranked delivery quotes for a cart
#[derive(Parser, Debug)]
#[command(name = "delivery-quote")]
#[command(about = "Compute ranked delivery quotes from a JSON catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog file (providers, rules, zones, attributes)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Quote request file
    #[arg(short, long)]
    request: PathBuf,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Catalog {
    providers: Vec<Provider>,
    rules: Vec<PricingRule>,
    zones: Vec<Zone>,
    product_attributes: HashMap<ProductId, DeliveryAttributes>,
    category_defaults: Vec<CategoryDefaults>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    let catalog: Catalog = read_json(&cli.catalog)?;
    let request: QuoteRequest = read_json(&cli.request)?;
    info!(
        providers = catalog.providers.len(),
        rules = catalog.rules.len(),
        zones = catalog.zones.len(),
        "catalog loaded"
    );

    let attributes = InMemoryAttributeRepository::new();
    for (product_id, attrs) in &catalog.product_attributes {
        attributes.save_product_attributes(product_id, attrs).await?;
    }
    for defaults in &catalog.category_defaults {
        attributes.save_category_defaults(defaults).await?;
    }
    let pricing =
        InMemoryPricingRepository::with_catalog(catalog.providers, catalog.rules, catalog.zones);

    let calculator =
        QuoteCalculator::new(Arc::new(pricing), Arc::new(attributes), config.quote_config());
    let quotes = calculator.quote(&request).await?;

    let out = if cli.compact {
        serde_json::to_string(&quotes)?
    } else {
        serde_json::to_string_pretty(&quotes)?
    };
    println!("{out}");
    Ok(())
}
