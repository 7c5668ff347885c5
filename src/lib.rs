//! # parcel-quote
//!
//! Shipping rate quotes from a parcel carrier, with restriction-driven
//! parcel planning.
//!
//! An order's items are measured, normalized into the carrier's units
//! (kilograms and centimeters), split into as many identical parcels as
//! each service's restrictions demand, and quoted one service at a time.
//! The resulting quotes are converted into the store's currency and folded
//! into a single [`RateResponse`](domain::entities::RateResponse).
//!
//! ## Layers
//!
//! - [`domain`]: value objects, entities and the pure
//!   [`ParcelPlanner`](domain::services::ParcelPlanner)
//! - [`application`]: unit normalization
//!   ([`UnitNormalizer`](application::services::UnitNormalizer)), request
//!   building and the
//!   [`QuoteAggregator`](application::services::QuoteAggregator)
//! - [`infrastructure`]: collaborator ports (carrier, conversions),
//!   in-memory implementations, configuration and telemetry

pub mod application;
pub mod domain;
pub mod infrastructure;
