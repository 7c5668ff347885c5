//! # Carrier Integration
//!
//! - [`CarrierGateway`]: port to the carrier's catalog, detail and rating
//!   endpoints
//! - [`CarrierError`]: transport and carrier faults, with retry
//!   classification
//! - [`FixtureCarrier`]: in-memory gateway for tests and offline runs

pub mod error;
pub mod fixture;
pub mod traits;

pub use error::{CarrierError, CarrierResult};
pub use fixture::{CallCounts, CarrierFixture, FixtureCarrier, FixtureEntry, FixtureError};
pub use traits::{CarrierCredentials, CarrierGateway};
