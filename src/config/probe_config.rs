use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{MonitorError, Result};

/// An endpoint to be probed once per cycle.
/// Loaded once at startup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoint {
    /// Human readable name, used in the cycle report.
    pub name: String,

    /// The URL of the endpoint. Its host segment is the availability domain.
    pub url: String,

    /// The HTTP method to use.
    /// Defaults to GET if not specified.
    #[serde(default = "default_method")]
    pub method: String,

    /// Extra request headers.
    #[serde(default, deserialize_with = "empty_if_null")]
    pub headers: HashMap<String, String>,

    /// Optional request body, sent verbatim.
    #[serde(default)]
    pub body: Option<String>,
}

impl Endpoint {
    /// Shorthand for a bare GET endpoint.
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: default_method(),
            headers: HashMap::new(),
            body: None,
        }
    }
}

fn default_method() -> String {
    "GET".to_string()
}

// `headers:` with no value is YAML null, treat it like an absent key
fn empty_if_null<'de, D>(deserializer: D) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse and validate an endpoint list.
/// The document is a YAML sequence; JSON arrays are accepted as well.
pub fn parse_endpoints(source: &str) -> Result<Vec<Endpoint>> {
    let mut endpoints: Vec<Endpoint> = serde_yaml::from_str(source)?;

    if endpoints.is_empty() {
        return Err(MonitorError::Config(
            "at least one endpoint must be configured".to_string(),
        ));
    }

    for (index, endpoint) in endpoints.iter_mut().enumerate() {
        if endpoint.name.trim().is_empty() {
            return Err(MonitorError::Config(format!(
                "endpoint #{} has an empty name",
                index + 1
            )));
        }
        if endpoint.url.trim().is_empty() {
            return Err(MonitorError::Config(format!(
                "endpoint '{}' has an empty url",
                endpoint.name
            )));
        }

        endpoint.method = endpoint.method.trim().to_ascii_uppercase();
        if reqwest::Method::from_bytes(endpoint.method.as_bytes()).is_err() {
            return Err(MonitorError::Config(format!(
                "endpoint '{}' has an invalid method '{}'",
                endpoint.name, endpoint.method
            )));
        }
    }

    Ok(endpoints)
}

/// Read an endpoint file from disk, see [`parse_endpoints`].
pub fn load_endpoints(path: &Path) -> Result<Vec<Endpoint>> {
    let source = std::fs::read_to_string(path)?;
    parse_endpoints(&source)
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_default_method() {
        assert_eq!(default_method(), "GET");
    }

    #[test]
    fn test_endpoint_deserialization() {
        let yaml = r#"
                    - name: fetch index page
                      url: https://fetch.com/
                    - name: fetch careers page
                      url: https://fetch.com/careers
                      method: post
                      headers:
                          user-agent: fetch-synthetic-monitor
                      body: '{"foo":"bar"}'
                    - name: fetch rewards
                      url: https://www.fetchrewards.com/
                      headers:
                                    "#;

        let endpoints = parse_endpoints(yaml).expect("Invalid YAML");
        assert_eq!(endpoints.len(), 3);

        assert_eq!(endpoints[0].name, "fetch index page");
        assert_eq!(endpoints[0].method, "GET");
        assert!(endpoints[0].headers.is_empty());
        assert_eq!(endpoints[0].body, None);

        assert_eq!(endpoints[1].method, "POST");
        assert_eq!(
            endpoints[1].headers.get("user-agent").map(String::as_str),
            Some("fetch-synthetic-monitor")
        );
        assert_eq!(endpoints[1].body.as_deref(), Some(r#"{"foo":"bar"}"#));

        assert!(endpoints[2].headers.is_empty());
    }

    #[test]
    fn test_json_is_accepted() {
        let json = r#"[{"name": "api", "url": "http://api.example.com/health", "method": "HEAD"}]"#;
        let endpoints = parse_endpoints(json).expect("Invalid JSON");
        assert_eq!(endpoints, vec![Endpoint {
            method: "HEAD".to_string(),
            ..Endpoint::get("api", "http://api.example.com/health")
        }]);
    }

    #[test]
    fn test_rejects_empty_list() {
        assert!(matches!(parse_endpoints("[]"), Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_rejects_missing_url() {
        let yaml = "- name: no url\n  url: ''\n";
        assert!(matches!(parse_endpoints(yaml), Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_rejects_invalid_method() {
        let yaml = "- name: bad\n  url: http://example.com\n  method: 'GE T'\n";
        assert!(matches!(parse_endpoints(yaml), Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_document() {
        assert!(matches!(parse_endpoints("name: [unterminated"), Err(MonitorError::Yaml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("endpoints.yml");
        std::fs::write(&path, "- name: täst\n  url: https://example.com/ü\n").expect("write");

        let endpoints = load_endpoints(&path).expect("load");
        assert_eq!(endpoints[0].name, "täst");

        let missing = load_endpoints(&dir.path().join("missing.yml"));
        assert!(matches!(missing, Err(MonitorError::Io(_))));
    }
}
