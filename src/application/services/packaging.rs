//! # Packaging Optimizer
//!
//! Consolidates resolved quote items into packages.
//!
//! Items sharing a packaging type go into one package:
//!
//! - weight is the sum of unit weight × quantity,
//! - the package is fragile if any item is,
//! - items are stacked: length and width are the largest of the group,
//!   height is the sum of unit height × quantity.
//!
//! Groups are emitted in the order their packaging type first appears.
//! Adding an item never makes a package lighter or smaller.

use crate::domain::entities::{Package, ResolvedItem};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{CheckedArithmetic, Dimensions, PackagingType};
use rust_decimal::Decimal;

/// Running totals for one packaging type.
#[derive(Debug, Clone, Copy)]
struct PackageGroup {
    packaging_type: PackagingType,
    weight_kg: Decimal,
    max_length: Decimal,
    max_width: Decimal,
    stacked_height: Decimal,
    is_fragile: bool,
    item_count: u32,
}

impl PackageGroup {
    fn empty(packaging_type: PackagingType) -> Self {
        Self {
            packaging_type,
            weight_kg: Decimal::ZERO,
            max_length: Decimal::ZERO,
            max_width: Decimal::ZERO,
            stacked_height: Decimal::ZERO,
            is_fragile: false,
            item_count: 0,
        }
    }

    fn add(mut self, item: &ResolvedItem) -> DomainResult<Self> {
        let quantity = Decimal::from(item.quantity);
        let attrs = &item.attributes;

        self.weight_kg = self.weight_kg.safe_add(attrs.weight_kg.safe_mul(quantity)?)?;
        self.is_fragile |= attrs.is_fragile;
        self.item_count = self.item_count.saturating_add(item.quantity);

        // Items without dimensions add weight only.
        if let Some(d) = attrs.dimensions {
            self.max_length = self.max_length.max(d.length());
            self.max_width = self.max_width.max(d.width());
            self.stacked_height = self.stacked_height.safe_add(d.height().safe_mul(quantity)?)?;
        }
        Ok(self)
    }

    fn into_package(self) -> DomainResult<Package> {
        let dimensions = Dimensions::new(self.max_length, self.max_width, self.stacked_height)?;
        let mut package = Package::new(self.packaging_type, self.weight_kg, dimensions)
            .with_fragile(self.is_fragile);
        package.item_count = self.item_count;
        Ok(package)
    }
}

/// Groups items into packages by packaging type.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackagingOptimizer;

impl PackagingOptimizer {
    /// Creates a new optimizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Packs `items` into one package per packaging type.
    ///
    /// Returns no packages for no items. Zero-quantity items still claim
    /// their packaging group but add nothing to it.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if attributes are invalid or totals overflow.
    pub fn optimize(&self, items: &[ResolvedItem]) -> DomainResult<Vec<Package>> {
        let groups = items.iter().try_fold(
            Vec::<PackageGroup>::new(),
            |mut groups, item| -> DomainResult<Vec<PackageGroup>> {
                item.attributes.validate()?;
                let packaging_type = item.attributes.packaging_type;
                match groups
                    .iter_mut()
                    .find(|g| g.packaging_type == packaging_type)
                {
                    Some(group) => *group = group.add(item)?,
                    None => groups.push(PackageGroup::empty(packaging_type).add(item)?),
                }
                Ok(groups)
            },
        )?;

        groups.into_iter().map(PackageGroup::into_package).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::DeliveryAttributes;
    use proptest::prelude::*;

    fn item(weight: Decimal, dims: (i64, i64, i64), qty: u32) -> ResolvedItem {
        let d = Dimensions::new(
            Decimal::from(dims.0),
            Decimal::from(dims.1),
            Decimal::from(dims.2),
        )
        .unwrap();
        ResolvedItem::new(DeliveryAttributes::new(weight, Some(d)), qty)
    }

    #[test]
    fn empty_input_yields_no_packages() {
        assert!(PackagingOptimizer::new().optimize(&[]).unwrap().is_empty());
    }

    #[test]
    fn same_packaging_merges_weight() {
        let items = [
            item(Decimal::new(10, 1), (30, 20, 10), 1),
            item(Decimal::new(15, 1), (20, 25, 5), 1),
        ];
        let packages = PackagingOptimizer::new().optimize(&items).unwrap();

        assert_eq!(packages.len(), 1);
        let p = &packages[0];
        assert_eq!(p.weight_kg, Decimal::new(25, 1));
        assert_eq!(p.dimensions.length(), Decimal::from(30));
        assert_eq!(p.dimensions.width(), Decimal::from(25));
        assert_eq!(p.dimensions.height(), Decimal::from(15));
        assert_eq!(p.item_count, 2);
    }

    #[test]
    fn quantity_multiplies_weight_and_height() {
        let packages = PackagingOptimizer::new()
            .optimize(&[item(Decimal::TWO, (10, 10, 4), 3)])
            .unwrap();
        assert_eq!(packages[0].weight_kg, Decimal::from(6));
        assert_eq!(packages[0].dimensions.height(), Decimal::from(12));
    }

    #[test]
    fn groups_by_packaging_in_first_seen_order() {
        let mut envelope = item(Decimal::new(2, 1), (30, 20, 1), 1);
        envelope.attributes = envelope.attributes.with_packaging(PackagingType::Envelope);
        let mut fragile_box = item(Decimal::ONE, (10, 10, 10), 1);
        fragile_box.attributes = fragile_box.attributes.with_fragile(true);

        let packages = PackagingOptimizer::new()
            .optimize(&[envelope, item(Decimal::ONE, (10, 10, 10), 1), fragile_box])
            .unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].packaging_type, PackagingType::Envelope);
        assert!(!packages[0].is_fragile);
        assert_eq!(packages[1].packaging_type, PackagingType::Box);
        assert!(packages[1].is_fragile);
        assert_eq!(packages[1].weight_kg, Decimal::TWO);
    }

    #[test]
    fn items_without_dimensions_add_weight_only() {
        let items = [
            item(Decimal::ONE, (10, 10, 10), 1),
            ResolvedItem::new(DeliveryAttributes::new(Decimal::ONE, None), 1),
        ];
        let packages = PackagingOptimizer::new().optimize(&items).unwrap();
        assert_eq!(packages[0].weight_kg, Decimal::TWO);
        assert_eq!(packages[0].dimensions.height(), Decimal::from(10));
    }

    #[test]
    fn rejects_invalid_attributes() {
        let items = [ResolvedItem::new(
            DeliveryAttributes::new(Decimal::from(-1), None),
            1,
        )];
        assert!(PackagingOptimizer::new().optimize(&items).is_err());
    }

    type ItemSpec = (i64, i64, i64, i64, u32);

    fn item_spec() -> impl Strategy<Value = ItemSpec> {
        (0i64..50, 1i64..100, 1i64..100, 1i64..100, 1u32..5)
    }

    fn to_item((w, l, wd, h, q): ItemSpec) -> ResolvedItem {
        item(Decimal::from(w), (l, wd, h), q)
    }

    proptest! {
        #[test]
        fn adding_an_item_never_shrinks_the_package(
            base in prop::collection::vec(item_spec(), 1..6),
            extra in item_spec(),
        ) {
            let items: Vec<ResolvedItem> = base.into_iter().map(to_item).collect();
            let before = PackagingOptimizer::new().optimize(&items).unwrap();

            let mut more = items.clone();
            more.push(to_item(extra));
            let after = PackagingOptimizer::new().optimize(&more).unwrap();

            prop_assert_eq!(before.len(), 1);
            prop_assert_eq!(after.len(), 1);
            prop_assert!(after[0].weight_kg >= before[0].weight_kg);
            prop_assert!(after[0].volume_m3().unwrap() >= before[0].volume_m3().unwrap());
        }
    }
}
