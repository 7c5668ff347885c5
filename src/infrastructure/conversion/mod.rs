//! # Store Conversions
//!
//! Ports for the store services quoting relies on, with table-driven
//! implementations.

pub mod error;
pub mod static_tables;
pub mod traits;

pub use error::{ConversionError, ConversionResult};
pub use static_tables::{ItemSumMeasurer, StaticCurrencyConverter, StaticMeasureConverter};
pub use traits::{CurrencyConverter, MeasureConverter, ShipmentMeasurer};
