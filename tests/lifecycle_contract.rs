//! Lifecycle behaviour of the DNS entry resource against a DNSMasq API fake.

mod common;

use std::sync::Arc;

use dnsmasqapi::client::{DnsEntryApi, DnsRecord};
use dnsmasqapi::provider::{DataSource, DnsEntryData, DnsEntryLookup, Provider, Resource};
use dnsmasqapi::Error;
use serde_json::json;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn set_without_append_replaces_existing_records() {
    let api = common::start().await;

    api.client.set("host.example.com", "10.0.0.1", false).await.unwrap();
    api.client.set("host.example.com", "10.0.0.2", false).await.unwrap();

    let records = api.client.get("host.example.com").await.unwrap();
    assert_eq!(records, vec![DnsRecord::new("host.example.com", "10.0.0.2")]);
}

#[tokio::test]
async fn set_with_append_keeps_existing_records() {
    let api = common::start().await;

    api.client.set("host.example.com", "10.0.0.1", false).await.unwrap();
    let returned = api.client.set("host.example.com", "10.0.0.2", true).await.unwrap();

    let records = api.client.get("host.example.com").await.unwrap();
    assert_eq!(returned, records);
    assert_eq!(
        records,
        vec![
            DnsRecord::new("host.example.com", "10.0.0.1"),
            DnsRecord::new("host.example.com", "10.0.0.2"),
        ]
    );
}

#[tokio::test]
async fn list_all_spans_hostnames() {
    let api = common::start().await;

    api.client.set("a.example.com", "10.0.0.1", false).await.unwrap();
    api.client.set("b.example.com", "10.0.0.2", false).await.unwrap();

    let records = api.client.list_all().await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn resource_create_read_update_delete() {
    let api = common::start().await;
    let provider = Provider::with_api(Arc::new(api.client.clone()));
    let resource = provider.dns_entry_resource();

    let mut entry = DnsEntryData::new("host.example.com", "10.0.0.1", false);
    let diags = resource.create(&mut entry).await;
    assert!(diags.is_empty(), "{:?}", diags);
    assert_eq!(entry.id.as_deref(), Some("host.example.com|10.0.0.1"));

    entry.ip_address = Some("10.0.0.9".to_string());
    let diags = resource.update(&mut entry).await;
    assert!(diags.is_empty(), "{:?}", diags);
    assert_eq!(entry.id.as_deref(), Some("host.example.com|10.0.0.9"));
    assert_eq!(api.fake.ips("host.example.com"), vec!["10.0.0.9"]);

    let diags = resource.read(&mut entry).await;
    assert!(diags.is_empty());
    assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.9"));

    let diags = resource.delete(&mut entry).await;
    assert!(diags.is_empty());
    assert!(entry.id.is_none());
    assert!(api.fake.ips("host.example.com").is_empty());
}

#[tokio::test]
async fn read_after_delete_is_not_found_not_a_crash() {
    let api = common::start().await;
    let provider = Provider::with_api(Arc::new(api.client.clone()));

    api.client.set("host.example.com", "10.0.0.1", false).await.unwrap();
    api.client.delete("host.example.com").await.unwrap();
    assert!(api.client.get("host.example.com").await.unwrap().is_empty());

    let mut entry = DnsEntryData::new("host.example.com", "10.0.0.1", false);
    let diags = provider.dns_entry_resource().read(&mut entry).await;
    assert!(diags.has_error());
    assert!(entry.id.is_none());

    let mut lookup = DnsEntryLookup::new("host.example.com");
    assert!(provider.dns_entry_data_source().read(&mut lookup).await.has_error());
}

#[tokio::test]
async fn server_errors_surface_as_error_diagnostics() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let (client, _) = dnsmasqapi::client::Client::new(&server.uri(), 0, true).unwrap();
    assert!(matches!(
        client.get("host.example.com").await,
        Err(Error::Api { status: 500, .. })
    ));

    let provider = Provider::with_api(Arc::new(client));
    let resource = provider.dns_entry_resource();

    let mut entry = DnsEntryData::new("host.example.com", "10.0.0.1", false);
    entry.id = Some("host.example.com|10.0.0.1".to_string());

    let diags = resource.create(&mut entry).await;
    assert!(diags.has_error());
    assert!(diags.iter().any(|d| d.summary.contains("500")));

    let diags = resource.delete(&mut entry).await;
    assert!(diags.has_error());
    assert_eq!(entry.id.as_deref(), Some("host.example.com|10.0.0.1"));

    // one request each for get, create and delete; no retries
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}
