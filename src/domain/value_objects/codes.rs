//! # Codes
//!
//! String-based identifiers exchanged with the carrier.
//!
//! - [`ServiceCode`]: carrier service code (e.g. `DOM.EP`)
//! - [`CountryCode`]: ISO 3166-1 alpha-2 country code
//! - [`CurrencyCode`]: ISO 4217 currency code
//! - [`PostalCode`]: destination/origin postal or ZIP code

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Carrier service code.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::ServiceCode;
///
/// let code = ServiceCode::new("DOM.EP");
/// assert_eq!(code.as_str(), "DOM.EP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCode(String);

impl ServiceCode {
    /// Creates a service code, trimming surrounding whitespace.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Two-letter country code, stored uppercase.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::CountryCode;
///
/// let ca: CountryCode = "ca".parse().unwrap();
/// assert_eq!(ca, CountryCode::CANADA_CODE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Canada, the default domestic country.
    pub const CANADA_CODE: &'static str = "CA";
    /// United States, the default cross-border country.
    pub const UNITED_STATES_CODE: &'static str = "US";

    /// Parses a country code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCode` unless the input is two ASCII letters.
    pub fn parse(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_code(format!(
                "country code must be two letters, got '{code}'"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Canada.
    #[must_use]
    pub fn canada() -> Self {
        Self(Self::CANADA_CODE.to_string())
    }

    /// The United States.
    #[must_use]
    pub fn united_states() -> Self {
        Self(Self::UNITED_STATES_CODE.to_string())
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CountryCode {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

/// Three-letter currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Canadian dollar, the carrier's settlement currency.
    pub const CAD: &'static str = "CAD";

    /// Parses a currency code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCode` unless the input is three ASCII letters.
    pub fn parse(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_code(format!(
                "currency code must be three letters, got '{code}'"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Canadian dollar.
    #[must_use]
    pub fn cad() -> Self {
        Self(Self::CAD.to_string())
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Postal or ZIP code as entered by the customer.
///
/// The raw text is kept; [`PostalCode::normalized`] gives the carrier's
/// domestic form.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::PostalCode;
///
/// let code = PostalCode::new(" k1a 0b1 ");
/// assert_eq!(code.normalized(), "K1A0B1");
/// assert_eq!(code.verbatim(), " k1a 0b1 ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Wraps a raw postal code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code with all whitespace removed, uppercased.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    /// Returns the code exactly as entered.
    #[inline]
    #[must_use]
    pub fn verbatim(&self) -> &str {
        &self.0
    }

    /// Returns true if the code holds no visible characters.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
