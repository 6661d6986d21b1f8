//! # Pricing Rule Evaluator
//!
//! Prices a package set with one provider's rules.
//!
//! Active rules are scanned in descending priority and the first rule whose
//! predicate matches is applied:
//!
//! | Rule type | Matches when | Base and weight surcharge |
//! |-----------|--------------|---------------------------|
//! | weight    | weight tier holds billable weight | tier base, `(weight - from) * per_kg` |
//! | volume    | volume tier holds total volume | tier base, `(volume - from) * per_m3` |
//! | zone      | weight tier matches, zone has a multiplier | weight tier price × multiplier |
//! | combined  | weight or volume tier matches | larger tier price × multiplier (or 1) |
//!
//! Fees then stack on top: rule surcharges (fragile, oversized, special
//! handling), insurance and COD when requested and supported, the provider's
//! fuel rate on base plus weight surcharge, the remote-area fee, tax on the
//! pre-tax subtotal and finally the discount. The total is clamped to the
//! rule's price bounds and never goes below zero.

use crate::domain::entities::package::{total_billable_weight, total_volume_m3};
use crate::domain::entities::{CostBreakdown, Package, PricingRule, Provider};
use crate::domain::value_objects::arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic, clamp_optional, fraction_of, round_money,
};
use crate::domain::value_objects::{PricingRuleType, RuleId, ZoneType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Insurance fee as a fraction of the insured value.
pub const INSURANCE_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// COD fee as a fraction of the collected amount.
pub const COD_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Minimum COD fee.
pub const COD_MIN_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Why a provider could not price a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The provider has no active rules.
    #[error("No pricing rules configured")]
    NoRules,

    /// No active rule matched the packages and zone.
    #[error("No matching pricing rule")]
    NoMatchingRule,

    /// Checked arithmetic failed while pricing.
    #[error("pricing arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Result type for pricing.
pub type PricingResult<T> = Result<T, PricingError>;

/// Optional services requested with a quote.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingOptions {
    /// Value to insure.
    #[serde(default)]
    pub insured_value: Option<Decimal>,
    /// Amount to collect on delivery.
    #[serde(default)]
    pub cod_amount: Option<Decimal>,
    /// Request special handling.
    #[serde(default)]
    pub special_handling: bool,
    /// Destination is a remote area.
    #[serde(default)]
    pub remote_area: bool,
    /// Flat discount applied after tax.
    #[serde(default)]
    pub discount: Decimal,
}

impl PricingOptions {
    /// Requests insurance for `value`.
    #[must_use]
    pub fn with_insurance(mut self, value: Decimal) -> Self {
        self.insured_value = Some(value);
        self
    }

    /// Requests cash on delivery of `amount`.
    #[must_use]
    pub fn with_cod(mut self, amount: Decimal) -> Self {
        self.cod_amount = Some(amount);
        self
    }

    /// Requests special handling.
    #[must_use]
    pub fn with_special_handling(mut self) -> Self {
        self.special_handling = true;
        self
    }

    /// Flags the destination as remote.
    #[must_use]
    pub fn with_remote_area(mut self) -> Self {
        self.remote_area = true;
        self
    }

    /// Sets a discount.
    #[must_use]
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }
}

/// A successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedRule {
    /// Rule that matched.
    pub rule_id: RuleId,
    /// Itemized price.
    pub breakdown: CostBreakdown,
}

/// Base price and weight surcharge produced by a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TierPrice {
    base: Decimal,
    surcharge: Decimal,
}

impl TierPrice {
    fn total(self) -> ArithmeticResult<Decimal> {
        self.base.safe_add(self.surcharge)
    }

    fn scaled(self, multiplier: Decimal) -> ArithmeticResult<Self> {
        Ok(Self {
            base: self.base.safe_mul(multiplier)?,
            surcharge: self.surcharge.safe_mul(multiplier)?,
        })
    }
}

/// Measurements a rule predicate looks at.
#[derive(Debug, Clone, Copy)]
struct Shape {
    weight: Decimal,
    volume: Decimal,
    zone: ZoneType,
}

fn weight_price(rule: &PricingRule, weight: Decimal) -> ArithmeticResult<Option<TierPrice>> {
    let Some(tier) = rule.weight_tier_for(weight) else {
        return Ok(None);
    };
    let surcharge = weight.safe_sub(tier.from_kg)?.safe_mul(tier.price_per_kg)?;
    Ok(Some(TierPrice {
        base: tier.base_price,
        surcharge,
    }))
}

fn volume_price(rule: &PricingRule, volume: Decimal) -> ArithmeticResult<Option<TierPrice>> {
    let Some(tier) = rule.volume_tier_for(volume) else {
        return Ok(None);
    };
    let surcharge = volume.safe_sub(tier.from_m3)?.safe_mul(tier.price_per_m3)?;
    Ok(Some(TierPrice {
        base: tier.base_price,
        surcharge,
    }))
}

/// Applies the rule predicate; `None` when the rule does not match.
fn match_rule(rule: &PricingRule, shape: Shape) -> ArithmeticResult<Option<TierPrice>> {
    match rule.rule_type {
        PricingRuleType::WeightBased => weight_price(rule, shape.weight),
        PricingRuleType::VolumeBased => volume_price(rule, shape.volume),
        PricingRuleType::ZoneBased => {
            let Some(multiplier) = rule.zone_multiplier(shape.zone) else {
                return Ok(None);
            };
            weight_price(rule, shape.weight)?
                .map(|p| p.scaled(multiplier))
                .transpose()
        }
        PricingRuleType::Combined => {
            let by_weight = weight_price(rule, shape.weight)?;
            let by_volume = volume_price(rule, shape.volume)?;
            let chosen = match (by_weight, by_volume) {
                (Some(w), Some(v)) => {
                    if v.total()? > w.total()? {
                        v
                    } else {
                        w
                    }
                }
                (Some(w), None) => w,
                (None, Some(v)) => v,
                (None, None) => return Ok(None),
            };
            let multiplier = rule.zone_multiplier(shape.zone).unwrap_or(Decimal::ONE);
            chosen.scaled(multiplier).map(Some)
        }
    }
}

/// Evaluates pricing rules for one provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEvaluator;

impl PricingEvaluator {
    /// Creates a new evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Prices `packages` shipped to `zone` with `provider` using `rules`.
    ///
    /// Inactive rules are ignored; the rest are scanned highest priority
    /// first, keeping the given order among equal priorities.
    ///
    /// # Errors
    ///
    /// - `PricingError::NoRules` if no rule is active
    /// - `PricingError::NoMatchingRule` if no active rule matches
    /// - `PricingError::Arithmetic` on overflow or a zero volumetric divisor
    pub fn evaluate(
        &self,
        provider: &Provider,
        rules: &[PricingRule],
        packages: &[Package],
        zone: ZoneType,
        options: &PricingOptions,
    ) -> PricingResult<PricedRule> {
        let mut active: Vec<&PricingRule> = rules.iter().filter(|r| r.is_active).collect();
        if active.is_empty() {
            return Err(PricingError::NoRules);
        }
        active.sort_by(|a, b| b.priority.cmp(&a.priority));

        let shape = Shape {
            weight: total_billable_weight(packages, provider.volumetric_divisor)?,
            volume: total_volume_m3(packages)?,
            zone,
        };

        for rule in active {
            if let Some(price) = match_rule(rule, shape)? {
                let breakdown = Self::breakdown(provider, rule, packages, price, options)?;
                return Ok(PricedRule {
                    rule_id: rule.id.clone(),
                    breakdown,
                });
            }
        }
        Err(PricingError::NoMatchingRule)
    }

    fn breakdown(
        provider: &Provider,
        rule: &PricingRule,
        packages: &[Package],
        price: TierPrice,
        options: &PricingOptions,
    ) -> ArithmeticResult<CostBreakdown> {
        let surcharge_if = |flag: bool, amount: Decimal| if flag { amount } else { Decimal::ZERO };

        let mut b = CostBreakdown {
            base_price: price.base,
            weight_surcharge: price.surcharge,
            fragile_surcharge: surcharge_if(
                packages.iter().any(|p| p.is_fragile),
                rule.fragile_surcharge,
            ),
            oversize_surcharge: surcharge_if(
                packages.iter().any(Package::is_oversized),
                rule.oversized_surcharge,
            ),
            special_handling_surcharge: surcharge_if(
                options.special_handling,
                rule.special_handling_surcharge,
            ),
            remote_area_surcharge: surcharge_if(
                options.remote_area,
                provider.remote_area_surcharge,
            ),
            ..CostBreakdown::default()
        };

        if provider.supports_insurance {
            if let Some(value) = options.insured_value {
                b.insurance_fee = fraction_of(value, INSURANCE_RATE)?;
            }
        }
        if provider.supports_cod {
            if let Some(amount) = options.cod_amount {
                b.cod_fee = fraction_of(amount, COD_RATE)?.max(COD_MIN_FEE);
            }
        }
        b.fuel_surcharge = fraction_of(price.total()?, provider.fuel_surcharge_rate)?;

        let subtotal = b.pre_tax_subtotal()?;
        b.tax = fraction_of(subtotal, provider.tax_rate)?;
        b.discount = options.discount;

        let gross = subtotal.safe_add(b.tax)?.safe_sub(b.discount)?;
        let clamped = clamp_optional(gross, rule.min_price, rule.max_price);
        b.total = round_money(clamped.max(Decimal::ZERO));
        Ok(b)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{VolumeTier, WeightTier};
    use crate::domain::value_objects::{Dimensions, PackagingType, ProviderCode};

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn provider() -> Provider {
        Provider::new("post", ProviderCode::PostExpress, "Post Express")
    }

    fn package(weight: Decimal, sides: (i64, i64, i64)) -> Package {
        Package::new(
            PackagingType::Box,
            weight,
            Dimensions::new(d(sides.0), d(sides.1), d(sides.2)).unwrap(),
        )
    }

    fn small(weight: i64) -> Vec<Package> {
        vec![package(d(weight), (10, 10, 10))]
    }

    fn weight_rule(id: &str, from: i64, to: i64, base: i64, per_kg: i64) -> PricingRule {
        PricingRule::new(id, "post", PricingRuleType::WeightBased)
            .with_weight_tier(WeightTier::new(d(from), d(to), d(base), d(per_kg)))
    }

    fn evaluate(
        rules: &[PricingRule],
        packages: &[Package],
        options: &PricingOptions,
    ) -> PricingResult<PricedRule> {
        PricingEvaluator::new().evaluate(&provider(), rules, packages, ZoneType::Local, options)
    }

    fn price(rules: &[PricingRule], packages: &[Package]) -> PricingResult<PricedRule> {
        evaluate(rules, packages, &PricingOptions::default())
    }

    mod rule_matching {
        use super::*;

        #[test]
        fn flat_tier_prices_at_base() {
            let priced = price(&[weight_rule("r", 0, 5, 300, 0)], &small(3)).unwrap();
            assert_eq!(priced.breakdown.total, d(300));
            assert_eq!(priced.rule_id, RuleId::new("r"));
        }

        #[test]
        fn weight_surcharge_counts_from_tier_start() {
            let priced = price(&[weight_rule("r", 2, 10, 300, 40)], &small(5)).unwrap();
            assert_eq!(priced.breakdown.base_price, d(300));
            assert_eq!(priced.breakdown.weight_surcharge, d(120));
            assert_eq!(priced.breakdown.total, d(420));
        }

        #[test]
        fn volumetric_weight_drives_tier_choice() {
            // 50x50x40 cm = 100000 cm3 -> 20 kg volumetric at divisor 5000.
            let packages = vec![package(d(1), (50, 50, 40))];
            let rules = [
                weight_rule("light", 0, 5, 300, 0),
                weight_rule("heavy", 5, 30, 900, 0),
            ];
            let priced = price(&rules, &packages).unwrap();
            assert_eq!(priced.rule_id, RuleId::new("heavy"));
        }

        #[test]
        fn highest_priority_match_wins() {
            let rules = [
                weight_rule("low", 0, 5, 300, 0).with_priority(1),
                weight_rule("high", 0, 5, 250, 0).with_priority(10),
                weight_rule("no-match", 10, 20, 100, 0).with_priority(100),
            ];
            let priced = price(&rules, &small(3)).unwrap();
            assert_eq!(priced.rule_id, RuleId::new("high"));
            assert_eq!(priced.breakdown.total, d(250));
        }

        #[test]
        fn volume_rule_uses_total_volume() {
            // 100x100x50 cm = 0.5 m3.
            let rule = PricingRule::new("v", "post", PricingRuleType::VolumeBased).with_volume_tier(
                VolumeTier::new(Decimal::ZERO, d(1), d(500), d(1000)),
            );
            let priced = price(&[rule], &[package(d(1), (100, 100, 50))]).unwrap();
            assert_eq!(priced.breakdown.base_price, d(500));
            assert_eq!(priced.breakdown.weight_surcharge, d(500));
        }

        #[test]
        fn zone_rule_needs_multiplier_for_zone() {
            let rule = weight_rule("z", 0, 5, 200, 10)
                .with_zone_multiplier(ZoneType::National, Decimal::new(15, 1));
            let rule = PricingRule {
                rule_type: PricingRuleType::ZoneBased,
                ..rule
            };

            let local = price(std::slice::from_ref(&rule), &small(3));
            assert_eq!(local, Err(PricingError::NoMatchingRule));

            let options = PricingOptions::default();
            let national = PricingEvaluator::new()
                .evaluate(&provider(), &[rule], &small(3), ZoneType::National, &options)
                .unwrap();
            assert_eq!(national.breakdown.base_price, d(300));
            assert_eq!(national.breakdown.weight_surcharge, d(45));
        }

        #[test]
        fn combined_rule_takes_larger_tier_price() {
            let rule = PricingRule::new("c", "post", PricingRuleType::Combined)
                .with_weight_tier(WeightTier::new(d(0), d(10), d(200), d(0)))
                .with_volume_tier(VolumeTier::new(d(0), d(1), d(350), d(0)))
                .with_zone_multiplier(ZoneType::Local, d(2));
            let priced = price(&[rule], &small(3)).unwrap();
            assert_eq!(priced.breakdown.base_price, d(700));
        }

        #[test]
        fn combined_rule_without_multiplier_is_unscaled() {
            let rule = PricingRule::new("c", "post", PricingRuleType::Combined)
                .with_weight_tier(WeightTier::new(d(0), d(10), d(200), d(0)));
            let priced = price(&[rule], &small(3)).unwrap();
            assert_eq!(priced.breakdown.total, d(200));
        }

        #[test]
        fn no_active_rules() {
            let inactive = weight_rule("r", 0, 5, 300, 0).with_active(false);
            assert_eq!(price(&[inactive], &small(3)), Err(PricingError::NoRules));
            assert_eq!(price(&[], &small(3)), Err(PricingError::NoRules));
            assert_eq!(PricingError::NoRules.to_string(), "No pricing rules configured");
        }

        #[test]
        fn no_matching_rule() {
            let err = price(&[weight_rule("r", 0, 5, 300, 0)], &small(8)).unwrap_err();
            assert_eq!(err, PricingError::NoMatchingRule);
            assert_eq!(err.to_string(), "No matching pricing rule");
        }
    }

    mod fees {
        use super::*;

        fn rule() -> PricingRule {
            weight_rule("r", 0, 50, 300, 0).with_surcharges(d(100), d(200), d(150))
        }

        #[test]
        fn fragile_and_oversized_surcharges() {
            let packages = vec![package(d(3), (120, 10, 10)).with_fragile(true)];
            let b = price(&[rule()], &packages).unwrap().breakdown;
            assert_eq!(b.fragile_surcharge, d(100));
            assert_eq!(b.oversize_surcharge, d(200));
            assert_eq!(b.special_handling_surcharge, Decimal::ZERO);
            assert_eq!(b.total, d(600));
        }

        #[test]
        fn special_handling_when_requested() {
            let options = PricingOptions::default().with_special_handling();
            let b = evaluate(&[rule()], &small(3), &options).unwrap().breakdown;
            assert_eq!(b.special_handling_surcharge, d(150));
        }

        #[test]
        fn insurance_and_cod_need_provider_support() {
            let options = PricingOptions::default()
                .with_insurance(d(10_000))
                .with_cod(d(1_000));

            let b = evaluate(&[rule()], &small(3), &options).unwrap().breakdown;
            assert_eq!(b.insurance_fee, Decimal::ZERO);
            assert_eq!(b.cod_fee, Decimal::ZERO);

            let supporting = provider().with_capabilities(true, true);
            let b = PricingEvaluator::new()
                .evaluate(&supporting, &[rule()], &small(3), ZoneType::Local, &options)
                .unwrap()
                .breakdown;
            assert_eq!(b.insurance_fee, d(100));
            // 2 % of 1000 is 20, below the 50 minimum.
            assert_eq!(b.cod_fee, d(50));
        }

        #[test]
        fn cod_fee_above_minimum() {
            let supporting = provider().with_capabilities(true, false);
            let options = PricingOptions::default().with_cod(d(5_000));
            let b = PricingEvaluator::new()
                .evaluate(&supporting, &[rule()], &small(3), ZoneType::Local, &options)
                .unwrap()
                .breakdown;
            assert_eq!(b.cod_fee, d(100));
        }

        #[test]
        fn fuel_remote_tax_and_discount() {
            let p = provider().with_fees(Decimal::new(10, 2), d(40), Decimal::new(20, 2));
            let options = PricingOptions::default()
                .with_remote_area()
                .with_discount(d(10));
            let rules = [weight_rule("r", 0, 5, 300, 0)];
            let b = PricingEvaluator::new()
                .evaluate(&p, &rules, &small(3), ZoneType::Local, &options)
                .unwrap()
                .breakdown;
            assert_eq!(b.fuel_surcharge, d(30));
            assert_eq!(b.remote_area_surcharge, d(40));
            // (300 + 30 + 40) * 0.2
            assert_eq!(b.tax, d(74));
            assert_eq!(b.total, d(434));
        }

        #[test]
        fn total_clamped_to_bounds() {
            let floor = weight_rule("r", 0, 5, 100, 0).with_price_bounds(Some(d(250)), None);
            assert_eq!(price(&[floor], &small(3)).unwrap().breakdown.total, d(250));

            let cap = weight_rule("r", 0, 5, 900, 0).with_price_bounds(None, Some(d(500)));
            assert_eq!(price(&[cap], &small(3)).unwrap().breakdown.total, d(500));
        }

        #[test]
        fn total_never_negative() {
            let options = PricingOptions::default().with_discount(d(1_000));
            let b = evaluate(&[weight_rule("r", 0, 5, 300, 0)], &small(3), &options)
                .unwrap()
                .breakdown;
            assert_eq!(b.total, Decimal::ZERO);
        }
    }
}
