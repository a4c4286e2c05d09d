//! Provider core for managing DNS entries through a remote DNSMasq API.

pub mod client;
pub mod config;
pub mod diag;
pub mod error;
pub mod provider;
pub mod validation;

pub use error::{Error, Result};
