//! # Parcels
//!
//! The order as one physical parcel in carrier units, and the plan that
//! splits it into identical parcels for a given service.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::Constraint;
use crate::domain::value_objects::Dimensions;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Decimal places kept on weights, in kilograms.
pub const WEIGHT_DECIMALS: u32 = 3;

/// Decimal places kept on dimensions, in centimeters.
pub const DIMENSION_DECIMALS: u32 = 1;

/// The whole order as a single parcel: kilograms and ordered centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedParcel {
    weight_kg: Decimal,
    dimensions: Dimensions,
}

impl NormalizedParcel {
    /// Creates a parcel from a weight in kilograms and canonical dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeasurement` if the weight or a side is
    /// negative.
    pub fn new(weight_kg: Decimal, dimensions: Dimensions) -> DomainResult<Self> {
        if weight_kg < Decimal::ZERO {
            return Err(DomainError::invalid_measurement(format!(
                "parcel weight must not be negative, got {weight_kg} kg"
            )));
        }
        if dimensions.has_negative_side() {
            return Err(DomainError::invalid_measurement(format!(
                "parcel sides must not be negative, got {dimensions} cm"
            )));
        }
        Ok(Self {
            weight_kg,
            dimensions,
        })
    }

    /// Weight in kilograms.
    #[inline]
    #[must_use]
    pub fn weight_kg(&self) -> Decimal {
        self.weight_kg
    }

    /// Dimensions in centimeters.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl fmt::Display for NormalizedParcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg, {} cm", self.weight_kg, self.dimensions)
    }
}

/// How many identical parcels a service needs, and what each one measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParcelPlan {
    parcel_count: u32,
    weight_kg: Decimal,
    dimensions: Dimensions,
    binding_constraint: Option<Constraint>,
}

impl ParcelPlan {
    /// Builds a plan from already divided per-parcel values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeasurement` if `parcel_count` is zero.
    pub fn new(
        parcel_count: u32,
        weight_kg: Decimal,
        dimensions: Dimensions,
        binding_constraint: Option<Constraint>,
    ) -> DomainResult<Self> {
        if parcel_count == 0 {
            return Err(DomainError::invalid_measurement(
                "a plan needs at least one parcel",
            ));
        }
        Ok(Self {
            parcel_count,
            weight_kg,
            dimensions,
            binding_constraint,
        })
    }

    /// Number of parcels, at least one.
    #[inline]
    #[must_use]
    pub fn parcel_count(&self) -> u32 {
        self.parcel_count
    }

    /// Weight of each parcel in kilograms.
    #[inline]
    #[must_use]
    pub fn weight_kg(&self) -> Decimal {
        self.weight_kg
    }

    /// Dimensions of each parcel in centimeters.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Constraint that forced the count, `None` when one parcel fits.
    #[inline]
    #[must_use]
    pub fn binding_constraint(&self) -> Option<Constraint> {
        self.binding_constraint
    }

    /// Returns true if the order ships as more than one parcel.
    #[inline]
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.parcel_count > 1
    }
}

impl fmt::Display for ParcelPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x ({} kg, {} cm)",
            self.parcel_count, self.weight_kg, self.dimensions
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions::canonical(Decimal::new(120, 0), Decimal::new(60, 0), Decimal::new(50, 0))
    }

    #[test]
    fn parcel_rejects_negative_weight() {
        assert!(NormalizedParcel::new(Decimal::new(-1, 0), dims()).is_err());
    }

    #[test]
    fn parcel_accepts_zero_weight() {
        let parcel = NormalizedParcel::new(Decimal::ZERO, dims()).unwrap();
        assert_eq!(parcel.weight_kg(), Decimal::ZERO);
    }

    #[test]
    fn parcel_rejects_negative_side() {
        let bad = Dimensions::canonical(Decimal::new(-5, 0), Decimal::ONE, Decimal::ONE);
        assert!(NormalizedParcel::new(Decimal::ONE, bad).is_err());
    }

    #[test]
    fn plan_requires_a_parcel() {
        assert!(ParcelPlan::new(0, Decimal::ONE, dims(), None).is_err());
    }

    #[test]
    fn plan_display() {
        let plan = ParcelPlan::new(2, Decimal::new(125, 1), dims(), Some(Constraint::Weight)).unwrap();
        assert_eq!(plan.to_string(), "2 x (12.5 kg, 120x60x50 cm)");
        assert!(plan.is_split());
    }
}
