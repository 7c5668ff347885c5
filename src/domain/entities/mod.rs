//! # Domain Entities
//!
//! ## Inputs
//!
//! - [`ShippingRequest`]: origin, destination and order items
//! - [`ServiceDescriptor`], [`ServiceDetail`]: catalog entries and their limits
//! - [`RestrictionSet`]: optional per-service maxima
//!
//! ## Planning
//!
//! - [`NormalizedParcel`]: the order as one parcel in kg/cm
//! - [`ParcelPlan`]: parcel count and per-parcel measurements
//!
//! ## Carrier exchange and output
//!
//! - [`RateRequest`]: one service, one planned parcel
//! - [`QuoteResult`]: carrier price for one parcel
//! - [`RateResponse`]: shipping options or errors

pub mod parcel;
pub mod quote;
pub mod rate_request;
pub mod rate_response;
pub mod restrictions;
pub mod service;
pub mod shipping_request;

pub use parcel::{DIMENSION_DECIMALS, NormalizedParcel, ParcelPlan, WEIGHT_DECIMALS};
pub use quote::QuoteResult;
pub use rate_request::{Destination, QuoteType, RateRequest};
pub use rate_response::{RateResponse, ShippingOption};
pub use restrictions::RestrictionSet;
pub use service::{ServiceDescriptor, ServiceDetail};
pub use shipping_request::{
    OrderItem, RequestValidationError, ShippingAddress, ShippingRequest, ValidatedRequest,
};
