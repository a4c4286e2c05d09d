use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use tracing::debug;
use url::Url;

use super::address;
use super::api::{DnsEntryApi, DnsRecord, SetDnsRecordRequest};
use crate::diag::Diagnostics;
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const JSON_CONTENT_TYPE: &str = "application/json";

/// Connection settings for a [`Client`]. Immutable once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_address: String,
    tls_verify: bool,
    timeout: Duration,
}

impl ClientConfig {
    /// Build a config from an API URL and an optional separate port (`0` = unset).
    ///
    /// Returned diagnostics only ever contain warnings.
    pub fn new(api_url: &str, port: u16, tls_verify: bool) -> Result<(Self, Diagnostics)> {
        let (base_address, diags) = address::normalize(api_url, port)?;

        Ok((
            Self {
                base_address,
                tls_verify,
                timeout: REQUEST_TIMEOUT,
            },
            diags,
        ))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// HTTP client for the DNSMasq API `/dns` collection.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base: Url,
    config: ClientConfig,
}

impl Client {
    pub fn new(api_url: &str, port: u16, tls_verify: bool) -> Result<(Self, Diagnostics)> {
        let (config, diags) = ClientConfig::new(api_url, port, tls_verify)?;
        Ok((Self::from_config(config)?, diags))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_address)
            .map_err(|e| Error::config(format!("invalid API URL: {}", e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "invalid API URL: {} cannot hold a path",
                config.base_address
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.tls_verify)
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base}/dns` or `{base}/dns/{hostname}`, the hostname kept as one
    /// percent-encoded path segment.
    fn endpoint(&self, hostname: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("dns");
            if let Some(hostname) = hostname {
                segments.push(hostname);
            }
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&SetDnsRecordRequest>,
    ) -> Result<Response> {
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status, body));
        }

        Ok(response)
    }

    async fn decode_records(response: Response) -> Result<Vec<DnsRecord>> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type != JSON_CONTENT_TYPE {
            return Err(Error::decode(format!(
                "unexpected response content-type: {:?}",
                content_type
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::decode(format!("failed to parse response body: {}", e)))
    }
}

fn require_hostname(hostname: &str) -> Result<()> {
    if hostname.is_empty() {
        return Err(Error::validation("hostname must be provided"));
    }
    // Dot segments would be dropped from the path and hit a different route
    if hostname == "." || hostname == ".." {
        return Err(Error::validation(format!(
            "{:?} is not a valid hostname",
            hostname
        )));
    }
    Ok(())
}

#[async_trait]
impl DnsEntryApi for Client {
    async fn list_all(&self) -> Result<Vec<DnsRecord>> {
        let response = self.send(Method::GET, self.endpoint(None), None).await?;
        Self::decode_records(response).await
    }

    async fn get(&self, hostname: &str) -> Result<Vec<DnsRecord>> {
        require_hostname(hostname)?;

        let url = self.endpoint(Some(hostname));
        let response = self.send(Method::GET, url, None).await?;
        Self::decode_records(response).await
    }

    async fn set(&self, hostname: &str, ip: &str, append: bool) -> Result<Vec<DnsRecord>> {
        if hostname.is_empty() || ip.is_empty() {
            return Err(Error::validation("hostname and ip must be provided"));
        }
        require_hostname(hostname)?;

        let mut url = self.endpoint(Some(hostname));
        if append {
            url.query_pairs_mut().append_pair("append", "true");
        }

        let body = SetDnsRecordRequest {
            ips: vec![ip.to_string()],
        };

        let response = self.send(Method::POST, url, Some(&body)).await?;
        Self::decode_records(response).await
    }

    async fn delete(&self, hostname: &str) -> Result<()> {
        require_hostname(hostname)?;

        // Only the status matters, the body is a plain message
        let url = self.endpoint(Some(hostname));
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}
