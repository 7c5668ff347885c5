//! # Unit Normalizer
//!
//! Turns the store's order measurements into one [`NormalizedParcel`] in
//! kilograms and centimeters.
//!
//! Weight is rounded to three decimals and every side to one decimal
//! (banker's rounding), then the sides are ordered so that the largest is
//! the length. A parcel already in kilograms and meters-derived
//! centimeters at that precision comes back unchanged.

use crate::application::error::{QuoteError, QuotingResult};
use crate::application::services::retry::with_deadline;
use crate::domain::entities::{DIMENSION_DECIMALS, NormalizedParcel, WEIGHT_DECIMALS};
use crate::domain::value_objects::{CheckedArithmetic, Dimensions, MeasureUnit};
use crate::infrastructure::config::CallPolicy;
use crate::infrastructure::conversion::{ConversionError, MeasureConverter};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Raw order measurements in the store's units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMeasurements {
    /// Total rated weight.
    pub weight: Decimal,
    /// Unit of `weight`.
    pub weight_unit: MeasureUnit,
    /// Bounding box as `(width, length, height)`.
    pub sides: (Decimal, Decimal, Decimal),
    /// Unit of `sides`.
    pub dimension_unit: MeasureUnit,
}

/// Converts store measurements into the carrier's units.
#[derive(Debug, Clone)]
pub struct UnitNormalizer {
    converter: Arc<dyn MeasureConverter>,
    policy: CallPolicy,
}

impl UnitNormalizer {
    /// Creates a normalizer over a measure converter.
    #[must_use]
    pub fn new(converter: Arc<dyn MeasureConverter>, policy: CallPolicy) -> Self {
        Self { converter, policy }
    }

    /// Normalizes one order.
    ///
    /// # Errors
    ///
    /// - `QuoteError::Conversion` - a unit is not registered or the
    ///   conversion timed out
    /// - `QuoteError::InvalidParcel` - a converted measurement is negative
    pub async fn normalize(&self, measurements: &StoreMeasurements) -> QuotingResult<NormalizedParcel> {
        let weight_kg = with_deadline(
            &self.policy,
            "weight conversion",
            self.converter
                .to_kilograms(measurements.weight, &measurements.weight_unit),
        )
        .await?
        .round_dp(WEIGHT_DECIMALS);

        let (width, length, height) = measurements.sides;
        let width = self.to_centimeters(width, &measurements.dimension_unit).await?;
        let length = self.to_centimeters(length, &measurements.dimension_unit).await?;
        let height = self.to_centimeters(height, &measurements.dimension_unit).await?;

        NormalizedParcel::new(weight_kg, Dimensions::canonical(length, width, height))
            .map_err(QuoteError::InvalidParcel)
    }

    async fn to_centimeters(&self, value: Decimal, unit: &MeasureUnit) -> QuotingResult<Decimal> {
        let meters = with_deadline(
            &self.policy,
            "dimension conversion",
            self.converter.to_meters(value, unit),
        )
        .await?;
        let centimeters = meters
            .safe_mul(Decimal::ONE_HUNDRED)
            .map_err(ConversionError::from)?;
        Ok(centimeters.round_dp(DIMENSION_DECIMALS))
    }
}
