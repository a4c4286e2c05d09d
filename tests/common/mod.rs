//! Shared test fixtures: a stateful fake of the DNSMasq API on top of wiremock.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use dnsmasqapi::client::Client;
use serde_json::{json, Value};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

type Entries = Arc<Mutex<BTreeMap<String, Vec<String>>>>;

/// Answers `/dns` routes the way the DNSMasq API does: POST replaces the
/// hostname's IPs unless `?append=true`, DELETE drops the hostname.
#[derive(Clone, Default)]
pub struct FakeDnsmasqApi {
    entries: Entries,
}

impl FakeDnsmasqApi {
    pub fn ips(&self, hostname: &str) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .get(hostname)
            .cloned()
            .unwrap_or_default()
    }

    fn records(entries: &BTreeMap<String, Vec<String>>, hostname: Option<&str>) -> Value {
        let records: Vec<Value> = entries
            .iter()
            .filter(|(h, _)| hostname.map_or(true, |wanted| wanted == h.as_str()))
            .flat_map(|(h, ips)| ips.iter().map(move |ip| json!({"hostname": h, "ip": ip})))
            .collect();
        Value::Array(records)
    }
}

impl Respond for FakeDnsmasqApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut entries = self.entries.lock().unwrap();
        let path = request.url.path().trim_start_matches('/').to_string();
        let hostname = path.strip_prefix("dns/").map(str::to_string);
        let append = request
            .url
            .query_pairs()
            .any(|(k, v)| k == "append" && v == "true");

        match (request.method.as_str(), path.as_str(), hostname) {
            ("GET", "dns", _) => {
                ResponseTemplate::new(200).set_body_json(Self::records(&entries, None))
            }
            ("GET", _, Some(hostname)) => {
                ResponseTemplate::new(200).set_body_json(Self::records(&entries, Some(&hostname)))
            }
            ("POST", _, Some(hostname)) => {
                let body: Value = match serde_json::from_slice(&request.body) {
                    Ok(body) => body,
                    Err(_) => {
                        return ResponseTemplate::new(400)
                            .set_body_json(json!({"error": "invalid body"}))
                    }
                };
                let new_ips: Vec<String> = body["ips"]
                    .as_array()
                    .map(|ips| {
                        ips.iter()
                            .filter_map(|ip| ip.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();

                let ips = entries.entry(hostname.clone()).or_default();
                if !append {
                    ips.clear();
                }
                for ip in new_ips {
                    if !ips.contains(&ip) {
                        ips.push(ip);
                    }
                }
                ResponseTemplate::new(200).set_body_json(Self::records(&entries, Some(&hostname)))
            }
            ("DELETE", _, Some(hostname)) => {
                entries.remove(&hostname);
                ResponseTemplate::new(200).set_body_string("deleted")
            }
            _ => ResponseTemplate::new(404).set_body_json(json!({"error": "no such route"})),
        }
    }
}

pub struct TestApi {
    pub server: MockServer,
    pub fake: FakeDnsmasqApi,
    pub client: Client,
}

pub async fn start() -> TestApi {
    let server = MockServer::start().await;
    let fake = FakeDnsmasqApi::default();

    Mock::given(wiremock::matchers::any())
        .respond_with(fake.clone())
        .mount(&server)
        .await;

    let (client, _) = Client::new(&server.uri(), 0, true).unwrap();

    TestApi {
        server,
        fake,
        client,
    }
}
