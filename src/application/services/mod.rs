//! # Application Services
//!
//! Services that turn a shipping request into shipping options.
//!
//! - [`UnitNormalizer`]: store measurements into kilograms and centimeters
//! - [`QuoteRequestBuilder`]: one rate request per service and plan
//! - [`QuoteAggregator`]: the full quoting run
//! - [`call_carrier`]: deadlines and retries around carrier calls

pub mod quote_aggregation;
pub mod request_builder;
pub mod retry;
pub mod unit_normalizer;

pub use quote_aggregation::{AggregationOutcome, QuoteAggregator};
pub use request_builder::{AccountContext, QuoteRequestBuilder};
pub use retry::{call_carrier, with_deadline};
pub use unit_normalizer::{StoreMeasurements, UnitNormalizer};
