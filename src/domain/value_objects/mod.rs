//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Codes
//!
//! - [`ServiceCode`]: carrier service code
//! - [`CountryCode`], [`CurrencyCode`]: validated ISO codes
//! - [`PostalCode`]: postal/ZIP code with carrier normalization
//!
//! ## Measurements
//!
//! - [`MeasureUnit`]: unit system keyword
//! - [`Dimensions`]: sides ordered `length >= width >= height`
//! - [`Money`]: amount with currency
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: why a checked computation failed
//! - [`CheckedArithmetic`]: checked `Decimal` operations
//! - [`ceil_count`]: parts needed to stay under a bound

pub mod arithmetic;
pub mod codes;
pub mod enums;
pub mod measure;
pub mod money;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic, ceil_count};
pub use codes::{CountryCode, CurrencyCode, PostalCode, ServiceCode};
pub use enums::{Constraint, ParseEnumError, QuoteKind};
pub use measure::{Dimensions, MeasureUnit};
pub use money::Money;
