mod address;
mod api;
mod dnsmasq;

pub use api::{DnsEntryApi, DnsRecord, SetDnsRecordRequest};
pub use dnsmasq::{Client, ClientConfig};
