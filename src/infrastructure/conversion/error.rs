//! # Conversion Errors

use crate::domain::value_objects::ArithmeticError;
use thiserror::Error;

/// Failure of a store-side unit or currency conversion.
///
/// Every variant stops the whole quote: without the conversion no parcel
/// or price can be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A measurement unit is not registered with the store.
    #[error("measurement unit '{unit}' is not available")]
    UnitUnavailable {
        /// The unit keyword that was looked up.
        unit: String,
    },

    /// A currency is not registered or has no usable rate.
    #[error("currency '{code}' is not available")]
    CurrencyUnavailable {
        /// The currency code that was looked up.
        code: String,
    },

    /// The converted value does not fit a decimal.
    #[error("conversion failed: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// The conversion did not answer in time.
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        /// The conversion that was running.
        operation: String,
        /// The deadline in milliseconds.
        timeout_ms: u64,
    },
}

impl ConversionError {
    /// Creates a unit unavailable error.
    #[must_use]
    pub fn unit_unavailable(unit: impl Into<String>) -> Self {
        Self::UnitUnavailable { unit: unit.into() }
    }

    /// Creates a currency unavailable error.
    #[must_use]
    pub fn currency_unavailable(code: impl Into<String>) -> Self {
        Self::CurrencyUnavailable { code: code.into() }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }
}

/// Result type for conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;
