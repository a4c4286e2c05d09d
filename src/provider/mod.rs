//! Lifecycle glue between the hosting framework and the DNSMasq API client.

mod dnsentry;
pub mod schema;

pub use dnsentry::{DnsEntryData, DnsEntryDataSource, DnsEntryLookup, DnsEntryResource};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::client::{Client, ClientConfig, DnsEntryApi};
use crate::config::ProviderConfig;
use crate::diag::Diagnostics;
use crate::error::Result;
use crate::validation::Validator;

/// The four lifecycle phases a managed resource exposes to the framework.
#[async_trait]
pub trait Resource: Send + Sync {
    type State: Send;

    async fn create(&self, state: &mut Self::State) -> Diagnostics;
    async fn read(&self, state: &mut Self::State) -> Diagnostics;
    async fn update(&self, state: &mut Self::State) -> Diagnostics;
    async fn delete(&self, state: &mut Self::State) -> Diagnostics;
}

#[async_trait]
pub trait DataSource: Send + Sync {
    type State: Send;

    async fn read(&self, state: &mut Self::State) -> Diagnostics;
}

/// A configured provider. Hands out resources bound to one API client.
pub struct Provider {
    api: Arc<dyn DnsEntryApi>,
    validator: Validator,
}

impl Provider {
    /// Build the API client from resolved configuration.
    ///
    /// Warnings (e.g. a missing URL scheme) are returned alongside the provider.
    pub fn configure(config: &ProviderConfig) -> Result<(Self, Diagnostics)> {
        let (client_config, diags) =
            ClientConfig::new(&config.api_url, config.api_port, config.ssl_verify)?;
        let client = Client::from_config(client_config.with_timeout(config.timeout))?;

        info!(
            "Configured DNSMasq API at {} (tls verify: {})",
            client.config().base_address(),
            config.ssl_verify
        );

        Ok((Self::with_api(Arc::new(client)), diags))
    }

    pub fn with_api(api: Arc<dyn DnsEntryApi>) -> Self {
        Self {
            api,
            validator: Validator::new(),
        }
    }

    pub fn api(&self) -> &Arc<dyn DnsEntryApi> {
        &self.api
    }

    pub fn dns_entry_resource(&self) -> DnsEntryResource {
        DnsEntryResource::new(self.api.clone(), self.validator.clone())
    }

    pub fn dns_entry_data_source(&self) -> DnsEntryDataSource {
        DnsEntryDataSource::new(self.api.clone(), self.validator.clone())
    }
}
