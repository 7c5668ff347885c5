//! # Application Layer
//!
//! Orchestration of a quoting run over the domain and its ports.

pub mod error;
pub mod services;

pub use error::{QuoteError, QuotingResult};
