use tracing::warn;
use url::Url;

use crate::diag::Diagnostics;
use crate::error::{Error, Result};

/// Normalise a user supplied API URL into `scheme://host[:port][/path]`.
///
/// A missing scheme defaults to `https://` with a warning. A port may come
/// from the URL or from `port`, never both. `port == 0` means unset.
pub(crate) fn normalize(api_url: &str, port: u16) -> Result<(String, Diagnostics)> {
    let mut diags = Diagnostics::new();
    let mut api_url = api_url.trim().to_string();

    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        warn!("API URL {} lacks a scheme, defaulting to https", api_url);
        diags.warning(
            "URL Lacks Protocol",
            "API URL lacks 'http://' or 'https://'. Defaulting to 'https://'.",
        );
        api_url = format!("https://{}", api_url);
    }

    let parsed =
        Url::parse(&api_url).map_err(|e| Error::config(format!("invalid API URL: {}", e)))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| Error::config(format!("invalid API URL: {} has no host", api_url)))?;

    let embedded_port = if has_explicit_port(&api_url) {
        parsed.port_or_known_default()
    } else {
        None
    };

    if embedded_port.is_some() && port != 0 {
        return Err(Error::config(
            "API URL should not contain a port. Use the separate field api_port",
        ));
    }

    let mut address = format!("{}://{}", parsed.scheme(), host);
    match (port, embedded_port) {
        (0, Some(p)) => address.push_str(&format!(":{}", p)),
        (0, None) => {}
        (p, _) => address.push_str(&format!(":{}", p)),
    }
    address.push_str(parsed.path().trim_end_matches('/'));

    Ok((address, diags))
}

// `Url::port` hides default ports, so look at the raw authority instead.
fn has_explicit_port(url: &str) -> bool {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let authority = rest.split(&['/', '?', '#'][..]).next().unwrap_or("");
    let host_port = authority.rsplit('@').next().unwrap_or("");

    match host_port.rfind(']') {
        Some(end) => host_port[end..].contains(':'),
        None => host_port.contains(':'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scheme_defaults_to_https_with_one_warning() {
        let (address, diags) = normalize("api.example.com", 0).unwrap();
        assert_eq!(address, "https://api.example.com");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.warnings().count(), 1);
        assert!(!diags.has_error());
    }

    #[test]
    fn test_explicit_port_with_port_argument_is_rejected() {
        let err = normalize("https://api.example.com:443", 8443).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = normalize("http://[::1]:8080", 8080).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_port_argument_is_appended() {
        let (address, diags) = normalize("http://10.0.0.1", 8080).unwrap();
        assert_eq!(address, "http://10.0.0.1:8080");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_embedded_port_kept_when_argument_unset() {
        let (address, _) = normalize("https://dns.example.com:9000", 0).unwrap();
        assert_eq!(address, "https://dns.example.com:9000");

        let (address, _) = normalize("https://dns.example.com:443", 0).unwrap();
        assert_eq!(address, "https://dns.example.com:443");
    }

    #[test]
    fn test_path_prefix_is_kept_without_trailing_slash() {
        let (address, _) = normalize("https://dns.example.com/api/", 0).unwrap();
        assert_eq!(address, "https://dns.example.com/api");

        let (address, _) = normalize("https://dns.example.com/", 0).unwrap();
        assert_eq!(address, "https://dns.example.com");
    }

    #[test]
    fn test_unparseable_url_is_config_error() {
        assert!(matches!(normalize("http://", 0), Err(Error::Config(_))));
        assert!(matches!(normalize("https://exa mple.com", 0), Err(Error::Config(_))));
    }

    #[test]
    fn test_has_explicit_port() {
        assert!(has_explicit_port("https://user:pw@host:1/x"));
        assert!(!has_explicit_port("https://user:pw@host/x"));
        assert!(!has_explicit_port("https://[2001:db8::1]/dns"));
        assert!(has_explicit_port("https://[2001:db8::1]:8080"));
    }
}
