//! # Infrastructure Layer
//!
//! Adapters for the outside world.
//!
//! - [`carrier`]: carrier web services port and the fixture gateway
//! - [`conversion`]: store unit and currency conversion
//! - [`config`]: settings loading
//! - [`telemetry`]: log subscriber setup

pub mod carrier;
pub mod config;
pub mod conversion;
pub mod telemetry;
