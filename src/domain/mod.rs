//! # Domain Layer
//!
//! Parcel modeling independent of any carrier transport.
//!
//! - [`value_objects`]: codes, measurements, money and checked arithmetic
//! - [`entities`]: shipping requests, restrictions, plans, quotes, responses
//! - [`services`]: parcel planning
//! - [`errors`]: domain error type

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
