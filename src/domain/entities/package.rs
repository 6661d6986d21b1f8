//! # Package Entities
//!
//! Product delivery attributes, category defaults, quote line items and the
//! consolidated [`Package`] produced by the packaging optimizer.
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::domain::entities::package::DeliveryAttributes;
//! use rust_decimal::Decimal;
//!
//! let attrs = DeliveryAttributes::global_default();
//! assert_eq!(attrs.weight_kg, Decimal::ONE);
//! assert!(attrs.validate().is_ok());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use crate::domain::value_objects::dimensions::billable_weight;
use crate::domain::value_objects::{CategoryId, Dimensions, PackagingType, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Heaviest single product accepted, in kg.
pub const MAX_WEIGHT_KG: i64 = 1000;

/// Delivery-relevant attributes of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttributes {
    /// Unit weight in kg.
    pub weight_kg: Decimal,
    /// Unit dimensions, if known.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Packaging tag.
    #[serde(default)]
    pub packaging_type: PackagingType,
    /// Requires careful handling.
    #[serde(default)]
    pub is_fragile: bool,
    /// Can be stacked with other items.
    #[serde(default = "default_stackable")]
    pub is_stackable: bool,
}

fn default_stackable() -> bool {
    true
}

impl DeliveryAttributes {
    /// Creates attributes with the given weight and dimensions.
    #[must_use]
    pub fn new(weight_kg: Decimal, dimensions: Option<Dimensions>) -> Self {
        Self {
            weight_kg,
            dimensions,
            packaging_type: PackagingType::default(),
            is_fragile: false,
            is_stackable: true,
        }
    }

    /// Attributes used when neither product nor category declares any:
    /// 1 kg, 30x20x10 cm box.
    #[must_use]
    pub fn global_default() -> Self {
        let dimensions = Dimensions::new(Decimal::from(30), Decimal::from(20), Decimal::from(10))
            .ok();
        Self::new(Decimal::ONE, dimensions)
    }

    /// Sets the packaging type.
    #[must_use]
    pub fn with_packaging(mut self, packaging_type: PackagingType) -> Self {
        self.packaging_type = packaging_type;
        self
    }

    /// Sets the fragile flag.
    #[must_use]
    pub fn with_fragile(mut self, is_fragile: bool) -> Self {
        self.is_fragile = is_fragile;
        self
    }

    /// Validates weight and dimensions.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidWeight` if weight is negative or above
    ///   [`MAX_WEIGHT_KG`]
    /// - `DomainError::InvalidDimensions` if any side is negative
    pub fn validate(&self) -> DomainResult<()> {
        if self.weight_kg.is_sign_negative() {
            return Err(DomainError::invalid_weight("weight cannot be negative"));
        }
        if self.weight_kg > Decimal::from(MAX_WEIGHT_KG) {
            return Err(DomainError::invalid_weight(format!(
                "weight cannot exceed {MAX_WEIGHT_KG} kg"
            )));
        }
        if let Some(d) = &self.dimensions {
            // Deserialized values bypass the constructor.
            Dimensions::new(d.length(), d.width(), d.height())?;
        }
        Ok(())
    }
}

/// Per-category fallback attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryDefaults {
    /// Category these defaults belong to.
    pub category_id: CategoryId,
    /// Default unit weight in kg.
    #[serde(default)]
    pub default_weight_kg: Option<Decimal>,
    /// Default unit dimensions.
    #[serde(default)]
    pub default_dimensions: Option<Dimensions>,
    /// Default packaging type.
    #[serde(default)]
    pub default_packaging_type: Option<PackagingType>,
    /// Products in this category are usually fragile.
    #[serde(default)]
    pub is_typically_fragile: bool,
}

impl CategoryDefaults {
    /// Materializes attributes, filling gaps from the global default.
    #[must_use]
    pub fn to_attributes(&self) -> DeliveryAttributes {
        let global = DeliveryAttributes::global_default();
        DeliveryAttributes {
            weight_kg: self.default_weight_kg.unwrap_or(global.weight_kg),
            dimensions: self.default_dimensions.or(global.dimensions),
            packaging_type: self
                .default_packaging_type
                .unwrap_or(global.packaging_type),
            is_fragile: self.is_typically_fragile,
            is_stackable: global.is_stackable,
        }
    }
}

/// A line of a quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    /// Product being shipped.
    pub product_id: ProductId,
    /// Product category, used for fallback attributes.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Number of units.
    pub quantity: u32,
    /// Attributes supplied inline; they take precedence over stored ones.
    #[serde(default)]
    pub attributes: Option<DeliveryAttributes>,
}

impl QuoteItem {
    /// Creates an item with no inline attributes.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            category_id: None,
            quantity,
            attributes: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Sets inline attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: DeliveryAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// An item whose attributes have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    /// Effective attributes.
    pub attributes: DeliveryAttributes,
    /// Number of units.
    pub quantity: u32,
}

impl ResolvedItem {
    /// Creates a resolved item.
    #[must_use]
    pub fn new(attributes: DeliveryAttributes, quantity: u32) -> Self {
        Self {
            attributes,
            quantity,
        }
    }
}

/// A physical package as priced by couriers.
///
/// Produced by consolidating items with the same packaging type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Packaging tag shared by all contained items.
    pub packaging_type: PackagingType,
    /// Actual weight in kg.
    pub weight_kg: Decimal,
    /// Outer dimensions.
    pub dimensions: Dimensions,
    /// Contains at least one fragile item.
    pub is_fragile: bool,
    /// Number of units packed.
    pub item_count: u32,
}

impl Package {
    /// Creates a package.
    #[must_use]
    pub fn new(packaging_type: PackagingType, weight_kg: Decimal, dimensions: Dimensions) -> Self {
        Self {
            packaging_type,
            weight_kg,
            dimensions,
            is_fragile: false,
            item_count: 1,
        }
    }

    /// Sets the fragile flag.
    #[must_use]
    pub fn with_fragile(mut self, is_fragile: bool) -> Self {
        self.is_fragile = is_fragile;
        self
    }

    /// Volume in cubic metres.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow.
    pub fn volume_m3(&self) -> ArithmeticResult<Decimal> {
        self.dimensions.volume_m3()
    }

    /// Billable weight for a provider divisor.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow or a zero divisor.
    pub fn billable_weight(&self, volumetric_divisor: Decimal) -> ArithmeticResult<Decimal> {
        let volumetric = self.dimensions.volumetric_weight(volumetric_divisor)?;
        Ok(billable_weight(self.weight_kg, volumetric))
    }

    /// Returns true if any side exceeds the oversize threshold.
    #[must_use]
    pub fn is_oversized(&self) -> bool {
        self.dimensions.is_oversized()
    }
}

/// Total billable weight of a set of packages.
///
/// # Errors
///
/// Returns an arithmetic error on overflow or a zero divisor.
pub fn total_billable_weight(
    packages: &[Package],
    volumetric_divisor: Decimal,
) -> ArithmeticResult<Decimal> {
    packages.iter().try_fold(Decimal::ZERO, |acc, p| {
        acc.safe_add(p.billable_weight(volumetric_divisor)?)
    })
}

/// Total volume of a set of packages in cubic metres.
///
/// # Errors
///
/// Returns an arithmetic error on overflow.
pub fn total_volume_m3(packages: &[Package]) -> ArithmeticResult<Decimal> {
    packages
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.safe_add(p.volume_m3()?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dims(l: i64, w: i64, h: i64) -> Dimensions {
        Dimensions::new(Decimal::from(l), Decimal::from(w), Decimal::from(h)).unwrap()
    }

    #[test]
    fn validate_rejects_heavy_product() {
        let attrs = DeliveryAttributes::new(Decimal::from(1001), None);
        assert!(matches!(
            attrs.validate(),
            Err(DomainError::InvalidWeight(_))
        ));
    }

    #[test]
    fn validate_accepts_boundaries() {
        assert!(DeliveryAttributes::new(Decimal::ZERO, None).validate().is_ok());
        assert!(
            DeliveryAttributes::new(Decimal::from(MAX_WEIGHT_KG), None)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn validate_rejects_negative_deserialized_dimensions() {
        let json = r#"{"weight_kg":"1","dimensions":{"length":"-5","width":"1","height":"1"}}"#;
        let attrs: DeliveryAttributes = serde_json::from_str(json).unwrap();
        assert!(matches!(
            attrs.validate(),
            Err(DomainError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn category_defaults_fill_gaps_from_global() {
        let defaults = CategoryDefaults {
            category_id: CategoryId::new("electronics"),
            default_weight_kg: Some(Decimal::from(2)),
            is_typically_fragile: true,
            ..CategoryDefaults::default()
        };
        let attrs = defaults.to_attributes();
        assert_eq!(attrs.weight_kg, Decimal::from(2));
        assert_eq!(attrs.dimensions, Some(dims(30, 20, 10)));
        assert_eq!(attrs.packaging_type, PackagingType::Box);
        assert!(attrs.is_fragile);
    }

    #[test]
    fn package_billable_weight_uses_volumetric_when_larger() {
        // 50*40*30 / 5000 = 12 kg
        let pkg = Package::new(PackagingType::Box, Decimal::from(3), dims(50, 40, 30));
        assert_eq!(
            pkg.billable_weight(Decimal::from(5000)).unwrap(),
            Decimal::from(12)
        );
    }

    #[test]
    fn totals_over_packages() {
        let packages = vec![
            Package::new(PackagingType::Box, Decimal::from(2), dims(10, 10, 10)),
            Package::new(PackagingType::Envelope, Decimal::ONE, dims(30, 20, 1)),
        ];
        assert_eq!(
            total_billable_weight(&packages, Decimal::from(5000)).unwrap(),
            Decimal::from(3)
        );
        assert_eq!(total_volume_m3(&packages).unwrap(), Decimal::new(16, 4));
    }
}
