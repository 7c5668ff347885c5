//! # Domain Services
//!
//! Parcel logic that belongs to no single entity.
//!
//! ## Services
//!
//! - [`ParcelPlanner`]: restriction-driven parcel count and even split

pub mod parcel_planner;

pub use parcel_planner::{ConstraintCount, ParcelPlanner};
