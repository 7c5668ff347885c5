//! # Domain Enums
//!
//! Enumeration types for parcel planning and quoting.
//!
//! - [`Constraint`] - Carrier restriction that can force a parcel split
//! - [`QuoteKind`] - Counter (retail) or commercial (contract) pricing
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Carrier restriction evaluated by the parcel planner.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::enums::Constraint;
///
/// assert_eq!(Constraint::Girth.to_string(), "GIRTH");
/// assert_eq!("dimension_sum".parse::<Constraint>().unwrap(), Constraint::DimensionSum);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Constraint {
    /// Maximum weight in grams.
    Weight,
    /// Maximum length (largest side).
    Length,
    /// Maximum width (middle side).
    Width,
    /// Maximum height (smallest side).
    Height,
    /// Maximum `2 × (width + height) + length`.
    Girth,
    /// Maximum `length + width + height`.
    DimensionSum,
}

impl Constraint {
    /// All constraints in evaluation order.
    pub const ALL: [Self; 6] = [
        Self::Weight,
        Self::Length,
        Self::Width,
        Self::Height,
        Self::Girth,
        Self::DimensionSum,
    ];

    /// Returns true if the constraint bounds a single side.
    #[inline]
    #[must_use]
    pub const fn is_single_side(self) -> bool {
        matches!(self, Self::Length | Self::Width | Self::Height)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight => write!(f, "WEIGHT"),
            Self::Length => write!(f, "LENGTH"),
            Self::Width => write!(f, "WIDTH"),
            Self::Height => write!(f, "HEIGHT"),
            Self::Girth => write!(f, "GIRTH"),
            Self::DimensionSum => write!(f, "DIMENSION_SUM"),
        }
    }
}

impl FromStr for Constraint {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "WEIGHT" => Ok(Self::Weight),
            "LENGTH" => Ok(Self::Length),
            "WIDTH" => Ok(Self::Width),
            "HEIGHT" => Ok(Self::Height),
            "GIRTH" => Ok(Self::Girth),
            "DIMENSION_SUM" | "DIMENSIONSUM" => Ok(Self::DimensionSum),
            _ => Err(ParseEnumError::InvalidValue("Constraint", s.to_string())),
        }
    }
}

/// Pricing mode of a rate request.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::enums::QuoteKind;
///
/// assert_eq!(QuoteKind::Counter.to_string(), "COUNTER");
/// assert!(QuoteKind::Commercial.requires_account());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteKind {
    /// Public counter (retail) rates.
    Counter,
    /// Contract rates for a merchant account.
    Commercial,
}

impl QuoteKind {
    /// Returns true if the mode needs a merchant account number.
    #[inline]
    #[must_use]
    pub const fn requires_account(self) -> bool {
        matches!(self, Self::Commercial)
    }
}

impl fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter => write!(f, "COUNTER"),
            Self::Commercial => write!(f, "COMMERCIAL"),
        }
    }
}

impl FromStr for QuoteKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COUNTER" => Ok(Self::Counter),
            "COMMERCIAL" => Ok(Self::Commercial),
            _ => Err(ParseEnumError::InvalidValue("QuoteKind", s.to_string())),
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
