//! # Restriction Set
//!
//! Per-service physical limits published by the carrier.
//!
//! Every bound is optional. A missing bound means "no limit", and so does a
//! zero or negative bound: carriers leave fields at zero when a limit does
//! not apply, and reading them as a real limit would make every parcel
//! infeasible.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::entities::RestrictionSet;
//! use parcel_quote::domain::value_objects::enums::Constraint;
//! use rust_decimal::Decimal;
//!
//! let limits = RestrictionSet::unbounded().with_max_weight_grams(Decimal::new(30000, 0));
//! assert_eq!(limits.bound(Constraint::Weight), Some(Decimal::new(30000, 0)));
//! assert_eq!(limits.bound(Constraint::Girth), None);
//! ```

use crate::domain::value_objects::enums::Constraint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional maxima a parcel must respect for one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictionSet {
    /// Maximum weight in grams.
    pub max_weight_grams: Option<Decimal>,
    /// Maximum length in centimeters.
    pub max_length_cm: Option<Decimal>,
    /// Maximum width in centimeters.
    pub max_width_cm: Option<Decimal>,
    /// Maximum height in centimeters.
    pub max_height_cm: Option<Decimal>,
    /// Maximum `2 × (width + height) + length` in centimeters.
    pub max_girth_cm: Option<Decimal>,
    /// Maximum `length + width + height` in centimeters.
    pub max_dimension_sum_cm: Option<Decimal>,
}

impl RestrictionSet {
    /// A set with no limits at all.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Sets the maximum weight in grams.
    #[must_use]
    pub fn with_max_weight_grams(mut self, grams: Decimal) -> Self {
        self.max_weight_grams = Some(grams);
        self
    }

    /// Sets the maximum length, width and height in centimeters.
    #[must_use]
    pub fn with_max_sides_cm(mut self, length: Decimal, width: Decimal, height: Decimal) -> Self {
        self.max_length_cm = Some(length);
        self.max_width_cm = Some(width);
        self.max_height_cm = Some(height);
        self
    }

    /// Sets the maximum girth in centimeters.
    #[must_use]
    pub fn with_max_girth_cm(mut self, girth: Decimal) -> Self {
        self.max_girth_cm = Some(girth);
        self
    }

    /// Sets the maximum dimension sum in centimeters.
    #[must_use]
    pub fn with_max_dimension_sum_cm(mut self, sum: Decimal) -> Self {
        self.max_dimension_sum_cm = Some(sum);
        self
    }

    /// Returns the effective bound for a constraint, `None` when unlimited.
    #[must_use]
    pub fn bound(&self, constraint: Constraint) -> Option<Decimal> {
        let raw = match constraint {
            Constraint::Weight => self.max_weight_grams,
            Constraint::Length => self.max_length_cm,
            Constraint::Width => self.max_width_cm,
            Constraint::Height => self.max_height_cm,
            Constraint::Girth => self.max_girth_cm,
            Constraint::DimensionSum => self.max_dimension_sum_cm,
        };
        raw.filter(|bound| *bound > Decimal::ZERO)
    }

    /// Returns true if no constraint carries an effective bound.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        Constraint::ALL.iter().all(|c| self.bound(*c).is_none())
    }
}
