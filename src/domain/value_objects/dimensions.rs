//! # Dimensions
//!
//! Package dimensions in centimetres and the volume/volumetric-weight math
//! derived from them.
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::domain::value_objects::dimensions::{Dimensions, billable_weight};
//! use rust_decimal::Decimal;
//!
//! let dims = Dimensions::new(Decimal::from(50), Decimal::from(40), Decimal::from(30)).unwrap();
//! // 60 000 cm3 / 5000 = 12 kg volumetric
//! let volumetric = dims.volumetric_weight(Decimal::from(5000)).unwrap();
//! assert_eq!(volumetric, Decimal::from(12));
//! assert_eq!(billable_weight(Decimal::from(3), volumetric), Decimal::from(12));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cubic centimetres per cubic metre.
pub const CM3_PER_M3: i64 = 1_000_000;

/// Default volumetric divisor (cm3 per kg).
pub const DEFAULT_VOLUMETRIC_DIVISOR: i64 = 5000;

/// Any side above this many centimetres makes a package oversized.
pub const OVERSIZE_THRESHOLD_CM: i64 = 100;

/// Length, width and height in centimetres.
///
/// # Invariants
///
/// - All sides are non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    length: Decimal,
    width: Decimal,
    height: Decimal,
}

impl Dimensions {
    /// Creates validated dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDimensions` if any side is negative.
    pub fn new(length: Decimal, width: Decimal, height: Decimal) -> DomainResult<Self> {
        if length.is_sign_negative() || width.is_sign_negative() || height.is_sign_negative() {
            return Err(DomainError::invalid_dimensions(
                "dimensions cannot be negative",
            ));
        }
        Ok(Self {
            length,
            width,
            height,
        })
    }

    /// Length in cm.
    #[inline]
    #[must_use]
    pub const fn length(&self) -> Decimal {
        self.length
    }

    /// Width in cm.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> Decimal {
        self.width
    }

    /// Height in cm.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> Decimal {
        self.height
    }

    /// Volume in cubic centimetres.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow.
    pub fn volume_cm3(&self) -> ArithmeticResult<Decimal> {
        self.length.safe_mul(self.width)?.safe_mul(self.height)
    }

    /// Volume in cubic metres (`L*W*H / 1e6`).
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow.
    pub fn volume_m3(&self) -> ArithmeticResult<Decimal> {
        self.volume_cm3()?.safe_div(Decimal::from(CM3_PER_M3))
    }

    /// Volumetric weight in kg (`L*W*H / divisor`).
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` for a zero divisor.
    pub fn volumetric_weight(&self, divisor: Decimal) -> ArithmeticResult<Decimal> {
        self.volume_cm3()?.safe_div(divisor)
    }

    /// Longest side in cm.
    #[must_use]
    pub fn max_side(&self) -> Decimal {
        self.length.max(self.width).max(self.height)
    }

    /// Returns true if any side exceeds [`OVERSIZE_THRESHOLD_CM`].
    #[must_use]
    pub fn is_oversized(&self) -> bool {
        self.max_side() > Decimal::from(OVERSIZE_THRESHOLD_CM)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{} cm", self.length, self.width, self.height)
    }
}

/// Weight a courier bills for: the larger of actual and volumetric weight.
#[inline]
#[must_use]
pub fn billable_weight(actual: Decimal, volumetric: Decimal) -> Decimal {
    actual.max(volumetric)
}
