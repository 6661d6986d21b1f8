//! Benchmarks for quote calculation
//!
//! - Packaging consolidation for growing carts
//! - Rule evaluation for one provider
//! - Full multi-provider quotes against in-memory repositories
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use delivery_gateway::application::services::{
    PackagingOptimizer, PricingEvaluator, PricingOptions, QuoteCalculator, QuoteRequest,
};
use delivery_gateway::domain::entities::{
    DeliveryAttributes, PricingRule, Provider, QuoteItem, ResolvedItem, WeightTier,
};
use delivery_gateway::domain::value_objects::{
    Address, Dimensions, PackagingType, PricingRuleType, ProviderCode, ZoneType,
};
use delivery_gateway::infrastructure::persistence::in_memory::{
    InMemoryAttributeRepository, InMemoryPricingRepository,
};
use rust_decimal::Decimal;

const PACKAGING: [PackagingType; 3] = [
    PackagingType::Box,
    PackagingType::Envelope,
    PackagingType::Custom,
];

fn attributes(i: usize) -> DeliveryAttributes {
    let dims = Dimensions::new(Decimal::from(30), Decimal::from(20), Decimal::from(10))
        .expect("valid dimensions");
    DeliveryAttributes::new(Decimal::new(5 + (i as i64 % 20), 1), Some(dims))
        .with_packaging(PACKAGING[i % PACKAGING.len()])
}

fn catalog(provider_count: usize) -> (Vec<Provider>, Vec<PricingRule>) {
    let codes = [ProviderCode::PostExpress, ProviderCode::BexExpress, ProviderCode::Dhl];
    let mut providers = Vec::with_capacity(provider_count);
    let mut rules = Vec::new();
    for i in 0..provider_count {
        let id = format!("p{i}");
        providers.push(Provider::new(id.as_str(), codes[i % codes.len()], format!("Provider {i}")));
        for (tier, to_kg) in [5i64, 20, 100].into_iter().enumerate() {
            rules.push(
                PricingRule::new(format!("r{i}-{tier}"), id.as_str(), PricingRuleType::WeightBased)
                    .with_priority(tier as i32)
                    .with_weight_tier(WeightTier::new(
                        Decimal::ZERO,
                        Decimal::from(to_kg),
                        Decimal::from(200 + 50 * i as i64),
                        Decimal::from(10),
                    )),
            );
        }
    }
    (providers, rules)
}

fn bench_packaging(c: &mut Criterion) {
    let mut group = c.benchmark_group("packaging");

    for items in [1usize, 10, 100] {
        let cart: Vec<ResolvedItem> =
            (0..items).map(|i| ResolvedItem::new(attributes(i), 2)).collect();
        group.throughput(Throughput::Elements(items as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &cart, |b, cart| {
            b.iter(|| black_box(PackagingOptimizer.optimize(black_box(cart)).unwrap()));
        });
    }

    group.finish();
}

fn bench_rule_evaluation(c: &mut Criterion) {
    let (providers, rules) = catalog(1);
    let cart: Vec<ResolvedItem> = (0..10).map(|i| ResolvedItem::new(attributes(i), 1)).collect();
    let packages = PackagingOptimizer.optimize(&cart).unwrap();
    let options = PricingOptions::default();

    c.bench_function("evaluate_rules", |b| {
        b.iter(|| {
            black_box(
                PricingEvaluator::new()
                    .evaluate(
                        &providers[0],
                        &rules,
                        black_box(&packages),
                        ZoneType::National,
                        &options,
                    )
                    .unwrap(),
            )
        });
    });
}

fn bench_full_quote(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("quote");

    for provider_count in [1usize, 5, 20] {
        let (providers, rules) = catalog(provider_count);
        let calculator = QuoteCalculator::with_defaults(
            Arc::new(InMemoryPricingRepository::with_catalog(providers, rules, Vec::new())),
            Arc::new(InMemoryAttributeRepository::new()),
        );
        let request = (0..5).fold(
            QuoteRequest::new(Address::new("Belgrade", "RS"), Address::new("Nis", "RS")),
            |r, i| {
                r.with_item(QuoteItem::new(format!("sku-{i}"), 1).with_attributes(attributes(i)))
            },
        );

        group.bench_with_input(BenchmarkId::from_parameter(provider_count), &request, |b, request| {
            b.to_async(&runtime)
                .iter(|| async { black_box(calculator.quote(request).await.unwrap()) });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_packaging, bench_rule_evaluation, bench_full_quote);
criterion_main!(benches);
