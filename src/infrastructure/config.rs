//! # Configuration
//!
//! Carrier settings loaded from an optional TOML file layered under
//! environment variables.
//!
//! Environment variables use the `PARCEL_QUOTE__` prefix and `__` between
//! nested keys, e.g. `PARCEL_QUOTE__API_KEY` or
//! `PARCEL_QUOTE__CALL_POLICY__TIMEOUT_MS`. `selected_services` also accepts
//! a comma separated string. A `.env` file is read first when present.

use crate::domain::value_objects::{CountryCode, MeasureUnit, ServiceCode};
use crate::infrastructure::carrier::CarrierCredentials;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Prefix of the environment variables read by [`CarrierSettings::load`].
pub const ENV_PREFIX: &str = "PARCEL_QUOTE";

/// Errors loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Timeout, retry and concurrency limits for carrier and conversion calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallPolicy {
    /// Deadline of a single call attempt, in milliseconds.
    pub timeout_ms: u64,
    /// Extra attempts after a transient carrier failure.
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each further retry.
    pub backoff_base_ms: u64,
    /// Services quoted at the same time.
    pub max_concurrent_services: usize,
}

impl CallPolicy {
    /// Per-attempt deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Sets the per-attempt deadline.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the retry count.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff base.
    #[must_use]
    pub fn with_backoff_base_ms(mut self, backoff_base_ms: u64) -> Self {
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Sets the per-request service concurrency.
    #[must_use]
    pub fn with_max_concurrent_services(mut self, max_concurrent_services: usize) -> Self {
        self.max_concurrent_services = max_concurrent_services;
        self
    }
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_retries: 2,
            backoff_base_ms: 250,
            max_concurrent_services: 1,
        }
    }
}

fn default_weight_unit() -> MeasureUnit {
    MeasureUnit::kilogram()
}

fn default_dimension_unit() -> MeasureUnit {
    MeasureUnit::meter()
}

/// Everything the quoting flow needs to know about the merchant's carrier
/// account and the store's units.
#[derive(Clone, Deserialize)]
pub struct CarrierSettings {
    /// API key sent with every carrier call.
    #[serde(default)]
    pub api_key: String,
    /// Merchant customer number; enables commercial rates.
    #[serde(default)]
    pub customer_number: Option<String>,
    /// Contract identifier, only used with a customer number.
    #[serde(default)]
    pub contract_id: Option<String>,
    /// Route calls to the carrier's sandbox.
    #[serde(default)]
    pub use_sandbox: bool,
    /// Services the merchant offers; others are skipped.
    #[serde(default, deserialize_with = "service_list")]
    pub selected_services: Vec<ServiceCode>,
    /// Country whose postal codes are normalized.
    #[serde(default = "CountryCode::canada")]
    pub domestic_country: CountryCode,
    /// Country whose ZIP codes are passed verbatim.
    #[serde(default = "CountryCode::united_states")]
    pub cross_border_country: CountryCode,
    /// Unit of the store's item weights.
    #[serde(default = "default_weight_unit")]
    pub weight_unit: MeasureUnit,
    /// Unit of the store's item dimensions.
    #[serde(default = "default_dimension_unit")]
    pub dimension_unit: MeasureUnit,
    /// Call limits.
    #[serde(default)]
    pub call_policy: CallPolicy,
}

impl CarrierSettings {
    /// Creates settings with defaults for everything but the API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            customer_number: None,
            contract_id: None,
            use_sandbox: false,
            selected_services: Vec::new(),
            domestic_country: CountryCode::canada(),
            cross_border_country: CountryCode::united_states(),
            weight_unit: default_weight_unit(),
            dimension_unit: default_dimension_unit(),
            call_policy: CallPolicy::default(),
        }
    }

    /// Loads `.env`, then the optional file, then `PARCEL_QUOTE__*` variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the file is missing or malformed and
    /// `ConfigError::Invalid` if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from_env(path)
    }

    /// Like [`load`](Self::load) but without reading `.env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the file is missing or malformed and
    /// `ConfigError::Invalid` if validation fails.
    pub fn load_from_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from TOML text only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the text is malformed and
    /// `ConfigError::Invalid` if validation fails.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from_str(input, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.call_policy.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "call_policy.timeout_ms must be positive".to_string(),
            ));
        }
        if self.call_policy.max_concurrent_services == 0 {
            return Err(ConfigError::Invalid(
                "call_policy.max_concurrent_services must be at least 1".to_string(),
            ));
        }
        if self.domestic_country == self.cross_border_country {
            return Err(ConfigError::Invalid(format!(
                "domestic and cross-border country are both {}",
                self.domestic_country
            )));
        }
        Ok(())
    }

    /// Credentials for carrier calls.
    #[must_use]
    pub fn credentials(&self) -> CarrierCredentials {
        CarrierCredentials::new(self.api_key.clone())
    }

    /// Returns true if the merchant offers the service.
    #[must_use]
    pub fn is_selected(&self, code: &ServiceCode) -> bool {
        self.selected_services.contains(code)
    }
}

impl fmt::Debug for CarrierSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierSettings")
            .field("api_key", &"<redacted>")
            .field("customer_number", &self.customer_number)
            .field("contract_id", &self.contract_id)
            .field("use_sandbox", &self.use_sandbox)
            .field("selected_services", &self.selected_services)
            .field("domestic_country", &self.domestic_country)
            .field("cross_border_country", &self.cross_border_country)
            .field("weight_unit", &self.weight_unit)
            .field("dimension_unit", &self.dimension_unit)
            .field("call_policy", &self.call_policy)
            .finish()
    }
}

/// Accepts a list of codes or one comma separated string.
fn service_list<'de, D>(deserializer: D) -> Result<Vec<ServiceCode>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
    }

    let raw = match Raw::deserialize(deserializer)? {
        Raw::List(codes) => codes,
        Raw::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };
    Ok(raw
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(ServiceCode::new)
        .collect())
}
