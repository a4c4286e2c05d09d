use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One hostname to IP binding as known by the DNSMasq API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub hostname: String,
    pub ip: String,
}

impl DnsRecord {
    pub fn new(hostname: &str, ip: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            ip: ip.to_string(),
        }
    }
}

/// Request body for setting the addresses of a hostname.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDnsRecordRequest {
    pub ips: Vec<String>,
}

#[async_trait]
pub trait DnsEntryApi: Send + Sync {
    /// List every DNS record known to the API
    async fn list_all(&self) -> Result<Vec<DnsRecord>>;

    /// Get all records for a hostname
    async fn get(&self, hostname: &str) -> Result<Vec<DnsRecord>>;

    /// Set the IP for a hostname, replacing existing records unless `append` is set.
    /// Returns the full resulting set of records for the hostname.
    async fn set(&self, hostname: &str, ip: &str, append: bool) -> Result<Vec<DnsRecord>>;

    /// Delete all records for a hostname
    async fn delete(&self, hostname: &str) -> Result<()>;
}
