use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{DataSource, Resource};
use crate::client::DnsEntryApi;
use crate::diag::Diagnostics;
use crate::error::{Error, Result};
use crate::validation::Validator;

const ID_DELIMITER: char = '|';

/// Managed state of a `dnsmasqapi_dnsentry` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsEntryData {
    /// `hostname|ip`, `None` while the entry is absent
    pub id: Option<String>,
    pub hostname: String,
    pub ip_address: Option<String>,
    #[serde(default)]
    pub append: bool,
}

impl DnsEntryData {
    pub fn new(hostname: &str, ip_address: &str, append: bool) -> Self {
        Self {
            id: None,
            hostname: hostname.to_string(),
            ip_address: Some(ip_address.to_string()),
            append,
        }
    }
}

/// State of a `dnsmasqapi_dnsentry` data source lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsEntryLookup {
    pub id: Option<String>,
    pub hostname: String,
    pub ip_address: Option<String>,
}

impl DnsEntryLookup {
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            ..Default::default()
        }
    }
}

/// Resolve the identity and observed IP of a hostname.
///
/// Only the first record is considered, even when the hostname has several.
async fn lookup(api: &dyn DnsEntryApi, hostname: &str) -> Result<(String, String)> {
    let records = api.get(hostname).await?;

    let first = records
        .first()
        .ok_or_else(|| Error::not_found(format!("no DNS records for {}", hostname)))?;

    if records.len() > 1 {
        warn!(
            "{} has {} records, tracking only {}",
            hostname,
            records.len(),
            first.ip
        );
    }

    let id = format!("{}{}{}", hostname, ID_DELIMITER, first.ip);
    Ok((id, first.ip.clone()))
}

fn check_hostname(validator: &Validator, hostname: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    if let Err(e) = validator.validate_hostname(hostname) {
        diags.error("Invalid hostname", e.to_string());
    }
    diags
}

pub struct DnsEntryResource {
    api: Arc<dyn DnsEntryApi>,
    validator: Validator,
}

impl DnsEntryResource {
    pub fn new(api: Arc<dyn DnsEntryApi>, validator: Validator) -> Self {
        Self { api, validator }
    }

    fn validate(&self, data: &DnsEntryData) -> Diagnostics {
        let mut diags = check_hostname(&self.validator, &data.hostname);

        match data.ip_address.as_deref() {
            Some(ip) => {
                if let Err(e) = self.validator.validate_ip(ip) {
                    diags.error("Invalid IP address", e.to_string());
                }
            }
            None => diags.error("Invalid IP address", "ip_address is required"),
        }

        diags
    }

    async fn write(&self, data: &mut DnsEntryData) -> Diagnostics {
        let diags = self.validate(data);
        if diags.has_error() {
            return diags;
        }

        let ip = data.ip_address.clone().unwrap_or_default();
        if let Err(e) = self.api.set(&data.hostname, &ip, data.append).await {
            return e.into();
        }

        info!(
            "Set {} to {}{}",
            data.hostname,
            ip,
            if data.append { " (append)" } else { "" }
        );

        self.read(data).await
    }
}

#[async_trait]
impl Resource for DnsEntryResource {
    type State = DnsEntryData;

    async fn create(&self, data: &mut DnsEntryData) -> Diagnostics {
        self.write(data).await
    }

    async fn read(&self, data: &mut DnsEntryData) -> Diagnostics {
        let diags = check_hostname(&self.validator, &data.hostname);
        if diags.has_error() {
            return diags;
        }

        match lookup(self.api.as_ref(), &data.hostname).await {
            Ok((id, ip)) => {
                data.id = Some(id);
                data.ip_address = Some(ip);
                Diagnostics::new()
            }
            Err(e) => e.into(),
        }
    }

    async fn update(&self, data: &mut DnsEntryData) -> Diagnostics {
        self.write(data).await
    }

    async fn delete(&self, data: &mut DnsEntryData) -> Diagnostics {
        let diags = check_hostname(&self.validator, &data.hostname);
        if diags.has_error() {
            return diags;
        }

        if let Err(e) = self.api.delete(&data.hostname).await {
            return e.into();
        }

        info!("Deleted {}", data.hostname);
        data.id = None;
        Diagnostics::new()
    }
}

pub struct DnsEntryDataSource {
    api: Arc<dyn DnsEntryApi>,
    validator: Validator,
}

impl DnsEntryDataSource {
    pub fn new(api: Arc<dyn DnsEntryApi>, validator: Validator) -> Self {
        Self { api, validator }
    }
}

#[async_trait]
impl DataSource for DnsEntryDataSource {
    type State = DnsEntryLookup;

    async fn read(&self, data: &mut DnsEntryLookup) -> Diagnostics {
        let diags = check_hostname(&self.validator, &data.hostname);
        if diags.has_error() {
            return diags;
        }

        match lookup(self.api.as_ref(), &data.hostname).await {
            Ok((id, ip)) => {
                data.id = Some(id);
                data.ip_address = Some(ip);
                Diagnostics::new()
            }
            Err(e) => e.into(),
        }
    }
}
