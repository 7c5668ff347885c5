//! # Parcel Planner
//!
//! Splits a normalized parcel into as many identical parcels as a service's
//! restrictions require.
//!
//! Six constraints are evaluated independently. Each contributes
//! `ceil(measure / bound)` parcels (one when unbounded) and the tightest
//! constraint wins. Weight and sides are then divided evenly by that count.
//!
//! Even division is a simplification, not a packing solver: when constraints
//! are not simultaneously tight the count (and so the quoted price) can be
//! higher than an optimal packing would give. Changing this changes quoted
//! prices, so it stays as is.
//!
//! The count is chosen on the unrounded totals. Per-parcel sides are then
//! rounded to one decimal, so a derived measure (girth, dimension sum) of
//! the rounded parcel can exceed its bound by a rounding step.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::entities::{NormalizedParcel, RestrictionSet};
//! use parcel_quote::domain::services::ParcelPlanner;
//! use parcel_quote::domain::value_objects::Dimensions;
//! use rust_decimal::Decimal;
//!
//! let parcel = NormalizedParcel::new(
//!     Decimal::new(25, 0),
//!     Dimensions::canonical(Decimal::new(120, 0), Decimal::new(60, 0), Decimal::new(50, 0)),
//! ).unwrap();
//! let limits = RestrictionSet::unbounded().with_max_weight_grams(Decimal::new(20000, 0));
//!
//! let plan = ParcelPlanner::new().plan(&parcel, &limits).unwrap();
//! assert_eq!(plan.parcel_count(), 2);
//! assert_eq!(plan.weight_kg(), Decimal::new(125, 1));
//! ```

use crate::domain::entities::{
    DIMENSION_DECIMALS, NormalizedParcel, ParcelPlan, RestrictionSet, WEIGHT_DECIMALS,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::Constraint;
use crate::domain::value_objects::{CheckedArithmetic, Dimensions, ceil_count};
use rust_decimal::Decimal;

/// Parcels required by a single constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintCount {
    /// The constraint evaluated.
    pub constraint: Constraint,
    /// Parcels it requires, one when unbounded.
    pub count: u32,
}

/// Computes parcel plans from restriction sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParcelPlanner;

impl ParcelPlanner {
    /// Creates a planner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Plans the parcels for one service.
    ///
    /// The count is the smallest integer `n >= 1` such that every measure
    /// divided by `n` fits its bound. Per-parcel weight is then rounded to
    /// three decimals and sides to one; the rounded values are not checked
    /// against the bounds again.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if a measure overflows and
    /// `DomainError::ParcelCountOverflow` if the count exceeds `u32::MAX`.
    pub fn plan(
        &self,
        parcel: &NormalizedParcel,
        restrictions: &RestrictionSet,
    ) -> DomainResult<ParcelPlan> {
        let counts = self.constraint_counts(parcel, restrictions)?;

        let mut parcel_count = 1;
        let mut binding = None;
        for entry in &counts {
            if entry.count > parcel_count {
                parcel_count = entry.count;
                binding = Some(entry.constraint);
            }
        }

        let divisor = Decimal::from(parcel_count);
        let dims = parcel.dimensions();
        let weight_kg = parcel
            .weight_kg()
            .safe_div(divisor)?
            .round_dp(WEIGHT_DECIMALS);
        let length = dims.length().safe_div(divisor)?.round_dp(DIMENSION_DECIMALS);
        let width = dims.width().safe_div(divisor)?.round_dp(DIMENSION_DECIMALS);
        let height = dims.height().safe_div(divisor)?.round_dp(DIMENSION_DECIMALS);

        ParcelPlan::new(
            parcel_count,
            weight_kg,
            Dimensions::canonical(length, width, height),
            binding,
        )
    }

    /// Evaluates every constraint, in [`Constraint::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if a measure overflows and
    /// `DomainError::ParcelCountOverflow` if a count exceeds `u32::MAX`.
    pub fn constraint_counts(
        &self,
        parcel: &NormalizedParcel,
        restrictions: &RestrictionSet,
    ) -> DomainResult<Vec<ConstraintCount>> {
        Constraint::ALL
            .iter()
            .map(|&constraint| {
                let count = match restrictions.bound(constraint) {
                    None => 1,
                    Some(bound) => {
                        let measure = measure(parcel, constraint)?;
                        ceil_count(measure, bound).map_err(|e| {
                            DomainError::ParcelCountOverflow(format!(
                                "{constraint} needs too many parcels: {e}"
                            ))
                        })?
                    }
                };
                Ok(ConstraintCount { constraint, count })
            })
            .collect()
    }
}

/// The parcel's value for a constraint, in the bound's unit.
fn measure(parcel: &NormalizedParcel, constraint: Constraint) -> DomainResult<Decimal> {
    let dims = parcel.dimensions();
    let value = match constraint {
        Constraint::Weight => parcel.weight_kg().safe_mul(Decimal::ONE_THOUSAND)?,
        Constraint::Length => dims.length(),
        Constraint::Width => dims.width(),
        Constraint::Height => dims.height(),
        Constraint::Girth => dims.girth()?,
        Constraint::DimensionSum => dims.dimension_sum()?,
    };
    Ok(value)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn parcel(grams: i64, sides_mm: (i64, i64, i64)) -> NormalizedParcel {
        NormalizedParcel::new(
            Decimal::new(grams, 3),
            Dimensions::canonical(
                Decimal::new(sides_mm.0, 1),
                Decimal::new(sides_mm.1, 1),
                Decimal::new(sides_mm.2, 1),
            ),
        )
        .unwrap()
    }

    fn sides() -> impl Strategy<Value = (i64, i64, i64)> {
        (0i64..20_000, 0i64..20_000, 0i64..20_000)
    }

    proptest! {
        #[test]
        fn prop_unbounded_plan_is_identity(grams in 0i64..1_000_000, sides in sides()) {
            let parcel = parcel(grams, sides);
            let plan = ParcelPlanner::new().plan(&parcel, &RestrictionSet::unbounded()).unwrap();
            prop_assert_eq!(plan.parcel_count(), 1);
            prop_assert_eq!(plan.weight_kg(), parcel.weight_kg());
            prop_assert_eq!(plan.dimensions(), parcel.dimensions());
            prop_assert!(plan.binding_constraint().is_none());
        }

        #[test]
        fn prop_weight_count_is_minimal(grams in 1i64..1_000_000, limit in 1i64..50_000) {
            let parcel = parcel(grams, (100, 100, 100));
            let restrictions = RestrictionSet::unbounded().with_max_weight_grams(Decimal::new(limit, 0));
            let n = ParcelPlanner::new().plan(&parcel, &restrictions).unwrap().parcel_count();
            let total = Decimal::new(grams, 0);
            let bound = Decimal::new(limit, 0);
            prop_assert!(total / Decimal::from(n) <= bound);
            if n > 1 {
                prop_assert!(total / Decimal::from(n - 1) > bound);
            }
        }

        #[test]
        fn prop_count_is_max_of_constraint_counts(
            grams in 0i64..200_000,
            sides in sides(),
            weight_limit in 1i64..40_000,
            girth_limit in 1i64..600,
            sum_limit in 1i64..600,
        ) {
            let parcel = parcel(grams, sides);
            let restrictions = RestrictionSet::unbounded()
                .with_max_weight_grams(Decimal::new(weight_limit, 0))
                .with_max_girth_cm(Decimal::new(girth_limit, 0))
                .with_max_dimension_sum_cm(Decimal::new(sum_limit, 0));
            let planner = ParcelPlanner::new();
            let plan = planner.plan(&parcel, &restrictions).unwrap();
            let counts = planner.constraint_counts(&parcel, &restrictions).unwrap();
            let max = counts.iter().map(|c| c.count).max().unwrap_or(1);
            prop_assert_eq!(plan.parcel_count(), max.max(1));
        }

        #[test]
        fn prop_per_parcel_values_keep_precision(
            grams in 0i64..1_000_000,
            sides in sides(),
            limit in 1i64..10_000,
        ) {
            let parcel = parcel(grams, sides);
            let restrictions = RestrictionSet::unbounded().with_max_weight_grams(Decimal::new(limit, 0));
            let plan = ParcelPlanner::new().plan(&parcel, &restrictions).unwrap();
            let dims = plan.dimensions();
            prop_assert!(plan.weight_kg().scale() <= WEIGHT_DECIMALS);
            for side in [dims.length(), dims.width(), dims.height()] {
                prop_assert!(side.scale() <= DIMENSION_DECIMALS);
            }
            prop_assert!(dims.length() >= dims.width() && dims.width() >= dims.height());
        }
    }
}
