//! # Quote Entities
//!
//! Per-provider quotes and the ranked quote set returned to callers.
//!
//! Quotes are ephemeral: they are computed per request and never stored.

use crate::domain::entities::package::Package;
use crate::domain::value_objects::arithmetic::{ArithmeticResult, checked_sum};
use crate::domain::value_objects::{
    ProviderCode, ProviderId, RuleId, ServiceLevel, Timestamp, ZoneType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Itemized price of a shipment with one provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Tier base price.
    pub base_price: Decimal,
    /// Per-kg (or per-m3) component above the tier floor.
    pub weight_surcharge: Decimal,
    /// Oversized package surcharge.
    pub oversize_surcharge: Decimal,
    /// Fragile handling surcharge.
    pub fragile_surcharge: Decimal,
    /// Special handling surcharge.
    pub special_handling_surcharge: Decimal,
    /// Declared-value insurance.
    pub insurance_fee: Decimal,
    /// Cash-on-delivery fee.
    pub cod_fee: Decimal,
    /// Fuel surcharge.
    pub fuel_surcharge: Decimal,
    /// Remote destination fee.
    pub remote_area_surcharge: Decimal,
    /// Tax on the pre-tax subtotal.
    pub tax: Decimal,
    /// Discount subtracted last.
    pub discount: Decimal,
    /// Final price after clamping.
    pub total: Decimal,
}

impl CostBreakdown {
    /// Sum of every component before tax and discount.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow.
    pub fn pre_tax_subtotal(&self) -> ArithmeticResult<Decimal> {
        checked_sum([
            self.base_price,
            self.weight_surcharge,
            self.oversize_surcharge,
            self.fragile_surcharge,
            self.special_handling_surcharge,
            self.insurance_fee,
            self.cod_fee,
            self.fuel_surcharge,
            self.remote_area_surcharge,
        ])
    }
}

/// A quote from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderQuote {
    /// Provider id.
    pub provider_id: ProviderId,
    /// Provider code.
    pub provider_code: ProviderCode,
    /// Provider display name.
    pub provider_name: String,
    /// Service level quoted.
    pub service_level: ServiceLevel,
    /// Itemized cost, present when available.
    pub cost_breakdown: Option<CostBreakdown>,
    /// Total price; zero when unavailable.
    pub total_price: Decimal,
    /// Estimated delivery days.
    pub estimated_days: u32,
    /// Rule that priced the quote.
    pub rule_id: Option<RuleId>,
    /// False when the provider cannot serve the request.
    pub is_available: bool,
    /// Why the provider is unavailable.
    pub unavailable_reason: Option<String>,
}

impl ProviderQuote {
    /// Creates an available quote.
    #[must_use]
    pub fn available(
        provider_id: ProviderId,
        provider_code: ProviderCode,
        provider_name: impl Into<String>,
        service_level: ServiceLevel,
        breakdown: CostBreakdown,
        estimated_days: u32,
        rule_id: RuleId,
    ) -> Self {
        Self {
            provider_id,
            provider_code,
            provider_name: provider_name.into(),
            service_level,
            total_price: breakdown.total,
            cost_breakdown: Some(breakdown),
            estimated_days,
            rule_id: Some(rule_id),
            is_available: true,
            unavailable_reason: None,
        }
    }

    /// Creates an unavailable quote.
    #[must_use]
    pub fn unavailable(
        provider_id: ProviderId,
        provider_code: ProviderCode,
        provider_name: impl Into<String>,
        service_level: ServiceLevel,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            provider_id,
            provider_code,
            provider_name: provider_name.into(),
            service_level,
            cost_breakdown: None,
            total_price: Decimal::ZERO,
            estimated_days: 0,
            rule_id: None,
            is_available: false,
            unavailable_reason: Some(reason.into()),
        }
    }
}

impl fmt::Display for ProviderQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_available {
            write!(
                f,
                "{}: {} ({} days)",
                self.provider_code, self.total_price, self.estimated_days
            )
        } else {
            write!(
                f,
                "{}: unavailable ({})",
                self.provider_code,
                self.unavailable_reason.as_deref().unwrap_or("unknown")
            )
        }
    }
}

/// Quotes across all providers plus the selected best options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSet {
    /// Every provider evaluated, in provider order.
    pub providers: Vec<ProviderQuote>,
    /// Lowest total price.
    pub cheapest: Option<ProviderQuote>,
    /// Fewest delivery days.
    pub fastest: Option<ProviderQuote>,
    /// Best price/speed trade-off.
    pub recommended: Option<ProviderQuote>,
    /// Zone the shipment falls in.
    pub zone: ZoneType,
    /// Consolidated packages that were priced.
    pub packages: Vec<Package>,
    /// When the quote was computed.
    pub calculated_at: Timestamp,
}

impl QuoteSet {
    /// Available quotes only.
    pub fn available(&self) -> impl Iterator<Item = &ProviderQuote> {
        self.providers.iter().filter(|q| q.is_available)
    }

    /// Returns true if at least one provider can deliver.
    #[must_use]
    pub fn has_available(&self) -> bool {
        self.available().next().is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pre_tax_subtotal_excludes_tax_and_discount() {
        let b = CostBreakdown {
            base_price: Decimal::from(300),
            weight_surcharge: Decimal::from(20),
            fuel_surcharge: Decimal::from(5),
            tax: Decimal::from(100),
            discount: Decimal::from(50),
            ..CostBreakdown::default()
        };
        assert_eq!(b.pre_tax_subtotal().unwrap(), Decimal::from(325));
    }

    #[test]
    fn available_quote_copies_total() {
        let b = CostBreakdown {
            total: Decimal::from(300),
            ..CostBreakdown::default()
        };
        let q = ProviderQuote::available(
            ProviderId::new("1"),
            ProviderCode::PostExpress,
            "Post Express",
            ServiceLevel::Standard,
            b,
            1,
            RuleId::new("r1"),
        );
        assert!(q.is_available);
        assert_eq!(q.total_price, Decimal::from(300));
        assert_eq!(q.to_string(), "post_express: 300 (1 days)");
    }

    #[test]
    fn unavailable_quote_display() {
        let q = ProviderQuote::unavailable(
            ProviderId::new("1"),
            ProviderCode::Dhl,
            "DHL",
            ServiceLevel::Standard,
            "No matching pricing rule",
        );
        assert!(!q.is_available);
        assert_eq!(q.to_string(), "dhl: unavailable (No matching pricing rule)");
    }
}
