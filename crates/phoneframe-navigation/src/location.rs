//! Navigable locations

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Absolute `http(s)` URL
    pub url: String,
    /// Short display name derived from the host
    pub label: String,
}

impl Location {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }

    /// Display label for a host: `www.example.com` → `example.com`
    pub fn label_for_host(host: &str) -> String {
        let host = host.trim().trim_end_matches('.');
        match host.strip_prefix("www.") {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => host.to_string(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.url)
    }
}
