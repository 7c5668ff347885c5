//! # Static Conversion Tables
//!
//! Table-driven implementations of the conversion ports.
//!
//! Units and currencies are registered with a ratio against a base: a unit
//! ratio is how many of that unit make one base unit, a currency rate is
//! how many of that currency buy one base-currency unit. Converting from
//! `a` to `b` is `value / ratio(a) * ratio(b)`.

use crate::domain::entities::OrderItem;
use crate::domain::value_objects::{CheckedArithmetic, CurrencyCode, MeasureUnit, Money};
use crate::infrastructure::conversion::error::{ConversionError, ConversionResult};
use crate::infrastructure::conversion::traits::{
    CurrencyConverter, MeasureConverter, ShipmentMeasurer,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Unit converter over registered weight and dimension ratios.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::MeasureUnit;
/// use parcel_quote::infrastructure::conversion::{MeasureConverter, StaticMeasureConverter};
/// use rust_decimal::Decimal;
///
/// # tokio_test::block_on(async {
/// let converter = StaticMeasureConverter::standard();
/// let kg = converter
///     .to_kilograms(Decimal::new(2500, 0), &MeasureUnit::new("grams"))
///     .await
///     .unwrap();
/// assert_eq!(kg, Decimal::new(25, 1));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMeasureConverter {
    weights: HashMap<MeasureUnit, Decimal>,
    dimensions: HashMap<MeasureUnit, Decimal>,
}

impl StaticMeasureConverter {
    /// Creates a converter with no registered units.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with the usual store units registered against
    /// the kilogram and the meter.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_weight_unit(MeasureUnit::kilogram(), Decimal::ONE)
            .with_weight_unit(MeasureUnit::new("grams"), Decimal::ONE_THOUSAND)
            .with_weight_unit(MeasureUnit::new("lb"), Decimal::new(220_462_262, 8))
            .with_weight_unit(MeasureUnit::new("ozs"), Decimal::new(352_739_619, 7))
            .with_dimension_unit(MeasureUnit::meter(), Decimal::ONE)
            .with_dimension_unit(MeasureUnit::new("centimeters"), Decimal::ONE_HUNDRED)
            .with_dimension_unit(MeasureUnit::new("millimetres"), Decimal::ONE_THOUSAND)
            .with_dimension_unit(MeasureUnit::new("inches"), Decimal::new(393_700_787, 7))
            .with_dimension_unit(MeasureUnit::new("feet"), Decimal::new(328_083_990, 8))
    }

    /// Registers a weight unit.
    #[must_use]
    pub fn with_weight_unit(mut self, unit: MeasureUnit, ratio: Decimal) -> Self {
        self.weights.insert(unit, ratio);
        self
    }

    /// Registers a dimension unit.
    #[must_use]
    pub fn with_dimension_unit(mut self, unit: MeasureUnit, ratio: Decimal) -> Self {
        self.dimensions.insert(unit, ratio);
        self
    }
}

fn ratio(table: &HashMap<MeasureUnit, Decimal>, unit: &MeasureUnit) -> ConversionResult<Decimal> {
    table
        .get(unit)
        .copied()
        .filter(|ratio| *ratio > Decimal::ZERO)
        .ok_or_else(|| ConversionError::unit_unavailable(unit.keyword()))
}

fn convert(
    table: &HashMap<MeasureUnit, Decimal>,
    value: Decimal,
    from: &MeasureUnit,
    to: &MeasureUnit,
) -> ConversionResult<Decimal> {
    let target = ratio(table, to)?;
    let source = ratio(table, from)?;
    if from == to {
        return Ok(value);
    }
    Ok(value.safe_div(source)?.safe_mul(target)?)
}

#[async_trait]
impl MeasureConverter for StaticMeasureConverter {
    async fn to_kilograms(&self, value: Decimal, from: &MeasureUnit) -> ConversionResult<Decimal> {
        convert(&self.weights, value, from, &MeasureUnit::kilogram())
    }

    async fn to_meters(&self, value: Decimal, from: &MeasureUnit) -> ConversionResult<Decimal> {
        convert(&self.dimensions, value, from, &MeasureUnit::meter())
    }
}

/// Currency converter over registered exchange rates.
#[derive(Debug, Clone)]
pub struct StaticCurrencyConverter {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, Decimal>,
}

impl StaticCurrencyConverter {
    /// Creates a converter whose base currency is `base`.
    #[must_use]
    pub fn new(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: HashMap::new(),
        }
    }

    /// Registers how many units of `currency` buy one base-currency unit.
    #[must_use]
    pub fn with_rate(mut self, currency: CurrencyCode, rate: Decimal) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    /// Returns the base currency.
    #[must_use]
    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }
}

#[async_trait]
impl CurrencyConverter for StaticCurrencyConverter {
    async fn to_base_currency(&self, amount: &Money) -> ConversionResult<Money> {
        if amount.currency() == &self.base {
            return Ok(amount.clone());
        }
        let rate = self
            .rates
            .get(amount.currency())
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
            .ok_or_else(|| ConversionError::currency_unavailable(amount.currency().as_str()))?;
        Ok(Money::new(amount.amount().safe_div(rate)?, self.base.clone()))
    }
}

/// Measures orders by summing item weights and stacking items vertically.
///
/// The bounding box takes the widest and the longest item and stacks
/// every unit's height.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemSumMeasurer;

impl ItemSumMeasurer {
    /// Creates a measurer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ShipmentMeasurer for ItemSumMeasurer {
    fn total_weight(&self, items: &[OrderItem], exclude_free_shipping: bool) -> Decimal {
        items
            .iter()
            .filter(|item| !(exclude_free_shipping && item.free_shipping))
            .fold(Decimal::ZERO, |total, item| {
                total.saturating_add(item.weight.saturating_mul(Decimal::from(item.quantity)))
            })
    }

    fn bounding_dimensions(&self, items: &[OrderItem]) -> (Decimal, Decimal, Decimal) {
        items.iter().fold(
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            |(width, length, height), item| {
                (
                    width.max(item.width),
                    length.max(item.length),
                    height.saturating_add(item.height.saturating_mul(Decimal::from(item.quantity))),
                )
            },
        )
    }
}
