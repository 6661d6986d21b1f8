//! # Domain Enums
//!
//! Enumeration types for delivery concepts.
//!
//! - [`ZoneType`] - Distance class between origin and destination
//! - [`PackagingType`] - Physical packaging tag used to group items
//! - [`ServiceLevel`] - Requested delivery speed
//! - [`ShipmentStatus`] - Remote shipment lifecycle
//! - [`ProviderCode`] - Supported courier providers
//! - [`PricingRuleType`] - How a pricing rule selects its price
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery zone between origin and destination.
///
/// Variants are ordered from nearest to farthest, so `Ord` gives the
/// precedence used when several zone records match.
///
/// # Examples
///
/// ```
/// use delivery_gateway::domain::value_objects::enums::ZoneType;
///
/// assert!(ZoneType::Local < ZoneType::International);
/// assert_eq!(ZoneType::Regional.default_delivery_days(), 2);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ZoneType {
    /// Same city.
    Local = 0,
    /// Nearby cities in the same region.
    Regional = 1,
    /// Same country.
    #[default]
    National = 2,
    /// Different countries.
    International = 3,
}

impl ZoneType {
    /// Returns the standard delivery estimate for this zone in days.
    #[inline]
    #[must_use]
    pub const fn default_delivery_days(self) -> u32 {
        match self {
            Self::Local => 1,
            Self::Regional => 2,
            Self::National => 3,
            Self::International => 7,
        }
    }

    /// Returns the lowercase tag used in storage and wire payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Regional => "regional",
            Self::National => "national",
            Self::International => "international",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "regional" => Ok(Self::Regional),
            "national" => Ok(Self::National),
            "international" => Ok(Self::International),
            _ => Err(ParseEnumError::InvalidValue("ZoneType", s.to_string())),
        }
    }
}

/// Packaging type tag.
///
/// Items sharing a packaging type are consolidated into one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PackagingType {
    /// Cardboard box.
    #[default]
    Box = 0,
    /// Flat envelope.
    Envelope = 1,
    /// Pallet freight.
    Pallet = 2,
    /// Seller-defined packaging.
    Custom = 3,
}

impl PackagingType {
    /// Returns the lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Envelope => "envelope",
            Self::Pallet => "pallet",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PackagingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackagingType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "envelope" => Ok(Self::Envelope),
            "pallet" => Ok(Self::Pallet),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseEnumError::InvalidValue("PackagingType", s.to_string())),
        }
    }
}

/// Requested delivery speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ServiceLevel {
    /// Regular delivery.
    #[default]
    Standard = 0,
    /// Next-tier faster delivery.
    Express = 1,
}

impl ServiceLevel {
    /// Applies this service level to a zone estimate.
    ///
    /// Express shortens the estimate by one day but never below one day.
    #[must_use]
    pub const fn adjust_days(self, days: u32) -> u32 {
        match self {
            Self::Standard => days,
            Self::Express => {
                if days > 1 {
                    days - 1
                } else {
                    1
                }
            }
        }
    }

    /// Returns the lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            _ => Err(ParseEnumError::InvalidValue("ServiceLevel", s.to_string())),
        }
    }
}

/// Remote shipment lifecycle status.
///
/// ```text
/// Pending -> Confirmed -> InTransit -> OutForDelivery -> Delivered
///    \___________\____________\______________\________-> Failed | Cancelled | Returned
/// ```
///
/// Terminal states accept no further transitions.
///
/// # Examples
///
/// ```
/// use delivery_gateway::domain::value_objects::enums::ShipmentStatus;
///
/// assert!(ShipmentStatus::Pending.can_transition_to(ShipmentStatus::InTransit));
/// assert!(!ShipmentStatus::Delivered.can_transition_to(ShipmentStatus::Cancelled));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ShipmentStatus {
    /// Created, not yet confirmed by the courier.
    #[default]
    Pending = 0,
    /// Accepted by the courier.
    Confirmed = 1,
    /// Moving through the courier network.
    InTransit = 2,
    /// On the last-mile vehicle.
    OutForDelivery = 3,
    /// Handed to the recipient.
    Delivered = 4,
    /// Delivery failed permanently.
    Failed = 5,
    /// Cancelled before delivery.
    Cancelled = 6,
    /// Sent back to the sender.
    Returned = 7,
}

impl ShipmentStatus {
    /// Returns true if no further transitions are possible.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::Failed | Self::Cancelled | Self::Returned
        )
    }

    /// Returns true if the lifecycle allows moving from `self` to `next`.
    ///
    /// Non-terminal states may move forward along the happy path (skipping
    /// steps is allowed, since couriers report coarsely) or into any
    /// terminal state. Staying in the same state is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        next.is_terminal() || next > self
    }

    /// Returns true if the shipment can still be cancelled.
    #[inline]
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        !self.is_terminal()
    }

    /// Returns the lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_transit" => Ok(Self::InTransit),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "returned" => Ok(Self::Returned),
            _ => Err(ParseEnumError::InvalidValue("ShipmentStatus", s.to_string())),
        }
    }
}

/// Courier provider served by the delivery microservice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ProviderCode {
    /// Post Express.
    PostExpress = 1,
    /// BEX Express.
    BexExpress = 2,
    /// AKS Express.
    AksExpress = 3,
    /// D Express.
    DExpress = 4,
    /// City Express.
    CityExpress = 5,
    /// DHL.
    Dhl = 6,
}

impl ProviderCode {
    /// All providers in wire order.
    pub const ALL: [Self; 6] = [
        Self::PostExpress,
        Self::BexExpress,
        Self::AksExpress,
        Self::DExpress,
        Self::CityExpress,
        Self::Dhl,
    ];

    /// Returns the snake-case code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostExpress => "post_express",
            Self::BexExpress => "bex_express",
            Self::AksExpress => "aks_express",
            Self::DExpress => "d_express",
            Self::CityExpress => "city_express",
            Self::Dhl => "dhl",
        }
    }

    /// Returns the protobuf enum value.
    #[inline]
    #[must_use]
    pub const fn as_wire(self) -> i32 {
        self as i32
    }

    /// Maps a protobuf enum value back; `0` (unspecified) and unknown values
    /// return `None`.
    #[must_use]
    pub fn from_wire(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_wire() == value)
    }
}

impl fmt::Display for ProviderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderCode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::InvalidValue("ProviderCode", s.to_string()))
    }
}

/// Pricing rule selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PricingRuleType {
    /// Priced by billable weight tier.
    WeightBased = 0,
    /// Priced by total volume tier.
    VolumeBased = 1,
    /// Weight tier scaled by a zone multiplier.
    ZoneBased = 2,
    /// Larger of weight and volume tier, scaled by zone.
    Combined = 3,
}

impl PricingRuleType {
    /// Returns the snake-case tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightBased => "weight_based",
            Self::VolumeBased => "volume_based",
            Self::ZoneBased => "zone_based",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for PricingRuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingRuleType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight_based" => Ok(Self::WeightBased),
            "volume_based" => Ok(Self::VolumeBased),
            "zone_based" => Ok(Self::ZoneBased),
            "combined" => Ok(Self::Combined),
            _ => Err(ParseEnumError::InvalidValue(
                "PricingRuleType",
                s.to_string(),
            )),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod zone_type {
        use super::*;

        #[test]
        fn ordering_is_nearest_first() {
            let mut zones = vec![
                ZoneType::International,
                ZoneType::Local,
                ZoneType::National,
                ZoneType::Regional,
            ];
            zones.sort();
            assert_eq!(
                zones,
                vec![
                    ZoneType::Local,
                    ZoneType::Regional,
                    ZoneType::National,
                    ZoneType::International
                ]
            );
        }

        #[test]
        fn default_days() {
            assert_eq!(ZoneType::Local.default_delivery_days(), 1);
            assert_eq!(ZoneType::National.default_delivery_days(), 3);
            assert_eq!(ZoneType::International.default_delivery_days(), 7);
        }

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!("LOCAL".parse::<ZoneType>().unwrap(), ZoneType::Local);
            assert!("galactic".parse::<ZoneType>().is_err());
        }

        #[test]
        fn serde_snake_case() {
            let json = serde_json::to_string(&ZoneType::International).unwrap();
            assert_eq!(json, "\"international\"");
        }
    }

    mod packaging_type {
        use super::*;

        #[test]
        fn default_is_box() {
            assert_eq!(PackagingType::default(), PackagingType::Box);
        }

        #[test]
        fn rejects_unknown() {
            let err = "crate".parse::<PackagingType>().unwrap_err();
            assert_eq!(err.to_string(), "invalid PackagingType value: 'crate'");
        }
    }

    mod service_level {
        use super::*;

        #[test]
        fn express_never_below_one_day() {
            assert_eq!(ServiceLevel::Express.adjust_days(3), 2);
            assert_eq!(ServiceLevel::Express.adjust_days(1), 1);
            assert_eq!(ServiceLevel::Standard.adjust_days(3), 3);
        }
    }

    mod shipment_status {
        use super::*;

        #[test]
        fn terminal_states() {
            assert!(ShipmentStatus::Delivered.is_terminal());
            assert!(ShipmentStatus::Returned.is_terminal());
            assert!(!ShipmentStatus::OutForDelivery.is_terminal());
        }

        #[test]
        fn forward_transitions_allowed() {
            assert!(ShipmentStatus::Pending.can_transition_to(ShipmentStatus::Confirmed));
            assert!(ShipmentStatus::Confirmed.can_transition_to(ShipmentStatus::Delivered));
            assert!(ShipmentStatus::InTransit.can_transition_to(ShipmentStatus::Cancelled));
        }

        #[test]
        fn backward_and_terminal_transitions_rejected() {
            assert!(!ShipmentStatus::InTransit.can_transition_to(ShipmentStatus::Pending));
            assert!(!ShipmentStatus::Cancelled.can_transition_to(ShipmentStatus::InTransit));
            assert!(ShipmentStatus::Delivered.can_transition_to(ShipmentStatus::Delivered));
        }

        #[test]
        fn accepts_american_spelling() {
            assert_eq!(
                "canceled".parse::<ShipmentStatus>().unwrap(),
                ShipmentStatus::Cancelled
            );
        }
    }

    mod provider_code {
        use super::*;

        #[test]
        fn wire_roundtrip() {
            for code in ProviderCode::ALL {
                assert_eq!(ProviderCode::from_wire(code.as_wire()), Some(code));
            }
            assert_eq!(ProviderCode::from_wire(0), None);
        }

        #[test]
        fn parse_code() {
            assert_eq!(
                "post_express".parse::<ProviderCode>().unwrap(),
                ProviderCode::PostExpress
            );
            assert!("fedex".parse::<ProviderCode>().is_err());
        }
    }
}
