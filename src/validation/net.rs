use std::net::IpAddr;

use crate::error::{Error, Result};

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Field validator for DNS entry inputs.
///
/// Owned by the resources that need it rather than shared as global state.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check a hostname against RFC 1123.
    pub fn validate_hostname(&self, hostname: &str) -> Result<()> {
        if hostname.is_empty() {
            return Err(Error::validation("hostname is required"));
        }

        if hostname.len() > MAX_HOSTNAME_LEN {
            return Err(Error::validation(format!(
                "hostname is longer than {} characters",
                MAX_HOSTNAME_LEN
            )));
        }

        for label in hostname.split('.') {
            if !is_valid_label(label) {
                return Err(Error::validation(format!(
                    "{:?} is not a valid RFC 1123 hostname",
                    hostname
                )));
            }
        }

        Ok(())
    }

    /// Check that the value is an IPv4 or IPv6 literal.
    pub fn validate_ip(&self, ip: &str) -> Result<IpAddr> {
        if ip.is_empty() {
            return Err(Error::validation("ip address is required"));
        }

        ip.parse()
            .map_err(|_| Error::validation(format!("{:?} is not a valid IP address", ip)))
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
