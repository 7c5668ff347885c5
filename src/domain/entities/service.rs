//! # Carrier Services
//!
//! Catalog entries and the detail record that carries a service's limits.

use crate::domain::entities::restrictions::RestrictionSet;
use crate::domain::value_objects::ServiceCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the carrier's service catalog for a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Service code, e.g. `DOM.EP`.
    pub code: ServiceCode,
    /// Display name, e.g. `Expedited Parcel`.
    pub name: String,
    /// Reference the carrier uses to look up the service detail.
    pub detail_ref: String,
}

impl ServiceDescriptor {
    /// Creates a catalog entry.
    #[must_use]
    pub fn new(code: ServiceCode, name: impl Into<String>, detail_ref: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            detail_ref: detail_ref.into(),
        }
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Detail of a single service, carrying its restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetail {
    /// Service code.
    pub code: ServiceCode,
    /// Display name.
    pub name: String,
    /// Physical limits of the service.
    #[serde(default)]
    pub restrictions: RestrictionSet,
}

impl ServiceDetail {
    /// Creates a service detail.
    #[must_use]
    pub fn new(code: ServiceCode, name: impl Into<String>, restrictions: RestrictionSet) -> Self {
        Self {
            code,
            name: name.into(),
            restrictions,
        }
    }
}
