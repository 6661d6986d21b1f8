//! # Pricing Rule Entity
//!
//! Tiered pricing rules owned by a provider.
//!
//! A rule carries weight and/or volume tiers, per-zone multipliers, fixed
//! surcharges and optional price clamps. Rules are evaluated in descending
//! priority and the first one whose predicate matches wins; see
//! `application::services::pricing`.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{PricingRuleType, ProviderId, RuleId, ZoneType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive weight range `[from_kg, to_kg]` with its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTier {
    /// Lower bound in kg.
    pub from_kg: Decimal,
    /// Upper bound in kg.
    pub to_kg: Decimal,
    /// Flat price for the tier.
    pub base_price: Decimal,
    /// Price per kg above `from_kg`.
    #[serde(default)]
    pub price_per_kg: Decimal,
}

impl WeightTier {
    /// Creates a tier.
    #[must_use]
    pub fn new(
        from_kg: Decimal,
        to_kg: Decimal,
        base_price: Decimal,
        price_per_kg: Decimal,
    ) -> Self {
        Self {
            from_kg,
            to_kg,
            base_price,
            price_per_kg,
        }
    }

    /// Returns true if `weight` falls inside the tier.
    #[inline]
    #[must_use]
    pub fn contains(&self, weight: Decimal) -> bool {
        self.from_kg <= weight && weight <= self.to_kg
    }
}

/// Inclusive volume range `[from_m3, to_m3]` with its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTier {
    /// Lower bound in m3.
    pub from_m3: Decimal,
    /// Upper bound in m3.
    pub to_m3: Decimal,
    /// Flat price for the tier.
    pub base_price: Decimal,
    /// Price per m3 above `from_m3`.
    #[serde(default)]
    pub price_per_m3: Decimal,
}

impl VolumeTier {
    /// Creates a tier.
    #[must_use]
    pub fn new(
        from_m3: Decimal,
        to_m3: Decimal,
        base_price: Decimal,
        price_per_m3: Decimal,
    ) -> Self {
        Self {
            from_m3,
            to_m3,
            base_price,
            price_per_m3,
        }
    }

    /// Returns true if `volume` falls inside the tier.
    #[inline]
    #[must_use]
    pub fn contains(&self, volume: Decimal) -> bool {
        self.from_m3 <= volume && volume <= self.to_m3
    }
}

/// A provider pricing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    /// Rule id.
    pub id: RuleId,
    /// Owning provider.
    pub provider_id: ProviderId,
    /// Selection strategy.
    pub rule_type: PricingRuleType,
    /// Higher runs first.
    #[serde(default)]
    pub priority: i32,
    /// Weight tiers.
    #[serde(default)]
    pub weight_tiers: Vec<WeightTier>,
    /// Volume tiers.
    #[serde(default)]
    pub volume_tiers: Vec<VolumeTier>,
    /// Price multiplier per zone.
    #[serde(default)]
    pub zone_multipliers: BTreeMap<ZoneType, Decimal>,
    /// Added when any package is fragile.
    #[serde(default)]
    pub fragile_surcharge: Decimal,
    /// Added when any package is oversized.
    #[serde(default)]
    pub oversized_surcharge: Decimal,
    /// Added when special handling is requested.
    #[serde(default)]
    pub special_handling_surcharge: Decimal,
    /// Lower clamp for the total.
    #[serde(default)]
    pub min_price: Option<Decimal>,
    /// Upper clamp for the total.
    #[serde(default)]
    pub max_price: Option<Decimal>,
    /// Inactive rules are ignored.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl PricingRule {
    /// Creates an active rule with no tiers.
    #[must_use]
    pub fn new(
        id: impl Into<RuleId>,
        provider_id: impl Into<ProviderId>,
        rule_type: PricingRuleType,
    ) -> Self {
        Self {
            id: id.into(),
            provider_id: provider_id.into(),
            rule_type,
            priority: 0,
            weight_tiers: Vec::new(),
            volume_tiers: Vec::new(),
            zone_multipliers: BTreeMap::new(),
            fragile_surcharge: Decimal::ZERO,
            oversized_surcharge: Decimal::ZERO,
            special_handling_surcharge: Decimal::ZERO,
            min_price: None,
            max_price: None,
            is_active: true,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a weight tier.
    #[must_use]
    pub fn with_weight_tier(mut self, tier: WeightTier) -> Self {
        self.weight_tiers.push(tier);
        self
    }

    /// Adds a volume tier.
    #[must_use]
    pub fn with_volume_tier(mut self, tier: VolumeTier) -> Self {
        self.volume_tiers.push(tier);
        self
    }

    /// Sets a zone multiplier.
    #[must_use]
    pub fn with_zone_multiplier(mut self, zone: ZoneType, multiplier: Decimal) -> Self {
        self.zone_multipliers.insert(zone, multiplier);
        self
    }

    /// Sets fragile, oversized and special-handling surcharges.
    #[must_use]
    pub fn with_surcharges(
        mut self,
        fragile: Decimal,
        oversized: Decimal,
        special_handling: Decimal,
    ) -> Self {
        self.fragile_surcharge = fragile;
        self.oversized_surcharge = oversized;
        self.special_handling_surcharge = special_handling;
        self
    }

    /// Sets min/max clamps.
    #[must_use]
    pub fn with_price_bounds(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// First weight tier containing `weight`.
    #[must_use]
    pub fn weight_tier_for(&self, weight: Decimal) -> Option<&WeightTier> {
        self.weight_tiers.iter().find(|t| t.contains(weight))
    }

    /// First volume tier containing `volume`.
    #[must_use]
    pub fn volume_tier_for(&self, volume: Decimal) -> Option<&VolumeTier> {
        self.volume_tiers.iter().find(|t| t.contains(volume))
    }

    /// Multiplier configured for `zone`, if any.
    #[must_use]
    pub fn zone_multiplier(&self, zone: ZoneType) -> Option<Decimal> {
        self.zone_multipliers.get(&zone).copied()
    }

    /// Checks tier bounds, non-negative prices and clamp order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPricingRule` describing the first problem.
    pub fn validate(&self) -> DomainResult<()> {
        let invalid =
            |msg: String| Err(DomainError::InvalidPricingRule(format!("{}: {msg}", self.id)));

        for t in &self.weight_tiers {
            if t.from_kg > t.to_kg {
                return invalid(format!("weight tier {}..{} is inverted", t.from_kg, t.to_kg));
            }
            if t.from_kg.is_sign_negative()
                || t.base_price.is_sign_negative()
                || t.price_per_kg.is_sign_negative()
            {
                return invalid("weight tier has negative values".into());
            }
        }
        for t in &self.volume_tiers {
            if t.from_m3 > t.to_m3 {
                return invalid(format!("volume tier {}..{} is inverted", t.from_m3, t.to_m3));
            }
            if t.from_m3.is_sign_negative()
                || t.base_price.is_sign_negative()
                || t.price_per_m3.is_sign_negative()
            {
                return invalid("volume tier has negative values".into());
            }
        }
        if self.zone_multipliers.values().any(|m| m.is_sign_negative()) {
            return invalid("zone multiplier is negative".into());
        }
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min > max => {
                invalid(format!("min price {min} exceeds max price {max}"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn weight_tier_bounds_are_inclusive() {
        let tier = WeightTier::new(d(0), d(5), d(300), d(0));
        assert!(tier.contains(d(0)));
        assert!(tier.contains(d(5)));
        assert!(!tier.contains(Decimal::new(501, 2)));
    }

    #[test]
    fn first_matching_tier_wins() {
        let rule = PricingRule::new("r1", "p1", PricingRuleType::WeightBased)
            .with_weight_tier(WeightTier::new(d(0), d(5), d(300), d(0)))
            .with_weight_tier(WeightTier::new(d(5), d(10), d(500), d(0)));
        assert_eq!(rule.weight_tier_for(d(5)).unwrap().base_price, d(300));
        assert_eq!(rule.weight_tier_for(d(7)).unwrap().base_price, d(500));
        assert!(rule.weight_tier_for(d(11)).is_none());
    }

    #[test]
    fn validate_rejects_inverted_tier() {
        let rule = PricingRule::new("r1", "p1", PricingRuleType::WeightBased)
            .with_weight_tier(WeightTier::new(d(5), d(1), d(300), d(0)));
        assert!(matches!(
            rule.validate(),
            Err(DomainError::InvalidPricingRule(_))
        ));
    }

    #[test]
    fn validate_rejects_crossed_bounds() {
        let rule = PricingRule::new("r1", "p1", PricingRuleType::WeightBased)
            .with_price_bounds(Some(d(500)), Some(d(100)));
        assert!(rule.validate().is_err());
    }

    #[test]
    fn zone_multipliers_deserialize_from_json_map() {
        let json = r#"{
            "id": "r1",
            "provider_id": "p1",
            "rule_type": "zone_based",
            "zone_multipliers": {"local": "1.0", "international": "2.5"}
        }"#;
        let rule: PricingRule = serde_json::from_str(json).unwrap();
        assert!(rule.is_active);
        assert_eq!(rule.zone_multiplier(ZoneType::International), Some(Decimal::new(25, 1)));
        assert_eq!(rule.zone_multiplier(ZoneType::National), None);
    }
}
