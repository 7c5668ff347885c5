//! # Measurements
//!
//! Measurement units and the carrier's rectangular parcel geometry.
//!
//! The carrier always labels the largest side as the length, the middle
//! side as the width and the smallest side as the height.
//! [`Dimensions::canonical`] enforces that ordering whatever the labels of
//! the input bounding box were.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::Dimensions;
//! use rust_decimal::Decimal;
//!
//! let dims = Dimensions::canonical(
//!     Decimal::new(60, 0),
//!     Decimal::new(120, 0),
//!     Decimal::new(50, 0),
//! );
//! assert_eq!(dims.length(), Decimal::new(120, 0));
//! assert_eq!(dims.width(), Decimal::new(60, 0));
//! assert_eq!(dims.height(), Decimal::new(50, 0));
//! assert_eq!(dims.girth().unwrap(), Decimal::new(340, 0));
//! ```

use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// System keyword of a measurement unit (`kg`, `lb`, `meters`, `inches`...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasureUnit(String);

impl MeasureUnit {
    /// Keyword of the kilogram, the carrier's weight unit.
    pub const KILOGRAM: &'static str = "kg";
    /// Keyword of the meter, the basis for the carrier's centimeters.
    pub const METER: &'static str = "meters";

    /// Creates a unit from its system keyword, lowercased.
    #[must_use]
    pub fn new(keyword: impl AsRef<str>) -> Self {
        Self(keyword.as_ref().trim().to_ascii_lowercase())
    }

    /// The kilogram.
    #[must_use]
    pub fn kilogram() -> Self {
        Self::new(Self::KILOGRAM)
    }

    /// The meter.
    #[must_use]
    pub fn meter() -> Self {
        Self::new(Self::METER)
    }

    /// Returns the system keyword.
    #[inline]
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rectangular parcel dimensions ordered `length >= width >= height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    length: Decimal,
    width: Decimal,
    height: Decimal,
}

impl Dimensions {
    /// Orders three side measurements into the carrier convention.
    ///
    /// Idempotent: an already ordered triple comes back unchanged.
    #[must_use]
    pub fn canonical(a: Decimal, b: Decimal, c: Decimal) -> Self {
        let mut sides = [a, b, c];
        sides.sort();
        let [height, width, length] = sides;
        Self {
            length,
            width,
            height,
        }
    }

    /// Length, the largest side.
    #[inline]
    #[must_use]
    pub fn length(&self) -> Decimal {
        self.length
    }

    /// Width, the middle side.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Decimal {
        self.width
    }

    /// Height, the smallest side.
    #[inline]
    #[must_use]
    pub fn height(&self) -> Decimal {
        self.height
    }

    /// `2 × (width + height) + length`.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the sum overflows.
    pub fn girth(&self) -> ArithmeticResult<Decimal> {
        let sides = self.width.safe_add(self.height)?;
        Decimal::TWO.safe_mul(sides)?.safe_add(self.length)
    }

    /// `length + width + height`.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the sum overflows.
    pub fn dimension_sum(&self) -> ArithmeticResult<Decimal> {
        self.length.safe_add(self.width)?.safe_add(self.height)
    }

    /// Returns true if any side is negative.
    #[must_use]
    pub fn has_negative_side(&self) -> bool {
        self.height < Decimal::ZERO
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.length, self.width, self.height)
    }
}
