//! Field descriptions for the provider, its resource and its data source.

use serde::Serialize;

pub const FIELD_PROVIDER_API_URL: &str = "api_url";
pub const FIELD_PROVIDER_API_PORT: &str = "api_port";
pub const FIELD_PROVIDER_SSL_VERIFY: &str = "ssl_verify";

pub const RESOURCE_TYPE_DNS_ENTRY: &str = "dnsmasqapi_dnsentry";

pub const FIELD_DNS_ENTRY_HOSTNAME: &str = "hostname";
pub const FIELD_DNS_ENTRY_IP_ADDRESS: &str = "ip_address";
pub const FIELD_DNS_ENTRY_APPEND: &str = "append";

const DESC_HOSTNAME: &str =
    "The hostname of the DNS entry. Should be a Fully Qualified Domain Name (FQDN).";
const DESC_IP_ADDRESS: &str = "The IP Address of the DNS entry.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub presence: Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<&'static str>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub provider: Vec<Field>,
    pub resources: Vec<(&'static str, Vec<Field>)>,
    pub data_sources: Vec<(&'static str, Vec<Field>)>,
}

pub fn provider_schema() -> Vec<Field> {
    vec![
        Field {
            name: FIELD_PROVIDER_API_URL,
            field_type: FieldType::String,
            presence: Presence::Required,
            default: None,
            env: Some(crate::config::API_URL_ENV),
            description: "The API Endpoint of the DNSMasq API that will service this provider.",
        },
        Field {
            name: FIELD_PROVIDER_API_PORT,
            field_type: FieldType::Int,
            presence: Presence::Optional,
            default: None,
            env: Some(crate::config::API_PORT_ENV),
            description: "The port on which the DNSMasq API listens.",
        },
        Field {
            name: FIELD_PROVIDER_SSL_VERIFY,
            field_type: FieldType::Bool,
            presence: Presence::Optional,
            default: Some("true"),
            env: None,
            description: "Whether or not to enforce SSL validation. Set to false if using self-signed certificates.",
        },
    ]
}

pub fn dns_entry_resource_schema() -> Vec<Field> {
    vec![
        Field {
            name: FIELD_DNS_ENTRY_HOSTNAME,
            field_type: FieldType::String,
            presence: Presence::Required,
            default: None,
            env: None,
            description: DESC_HOSTNAME,
        },
        Field {
            name: FIELD_DNS_ENTRY_IP_ADDRESS,
            field_type: FieldType::String,
            presence: Presence::Required,
            default: None,
            env: None,
            description: DESC_IP_ADDRESS,
        },
        Field {
            name: FIELD_DNS_ENTRY_APPEND,
            field_type: FieldType::Bool,
            presence: Presence::Optional,
            default: Some("false"),
            env: None,
            description: "Add this IP Address to this hostname instead of overriding the current value.",
        },
    ]
}

pub fn dns_entry_data_source_schema() -> Vec<Field> {
    vec![
        Field {
            name: FIELD_DNS_ENTRY_HOSTNAME,
            field_type: FieldType::String,
            presence: Presence::Required,
            default: None,
            env: None,
            description: DESC_HOSTNAME,
        },
        Field {
            name: FIELD_DNS_ENTRY_IP_ADDRESS,
            field_type: FieldType::String,
            presence: Presence::Computed,
            default: None,
            env: None,
            description: DESC_IP_ADDRESS,
        },
    ]
}

pub fn schema() -> Schema {
    Schema {
        provider: provider_schema(),
        resources: vec![(RESOURCE_TYPE_DNS_ENTRY, dns_entry_resource_schema())],
        data_sources: vec![(RESOURCE_TYPE_DNS_ENTRY, dns_entry_data_source_schema())],
    }
}
