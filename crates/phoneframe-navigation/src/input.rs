//! Input resolution for the address bar
//!
//! 1. `http://` / `https://` input → validated as typed
//! 2. No scheme → `https://` prepended
//! 3. Empty input, other schemes, or no host → `InvalidUrl`
//!
//! The stored URL is the normalized input string. `Url` is only used to
//! validate it and to extract the host, so `example.com` stays
//! `https://example.com` without a trailing slash.

use std::net::IpAddr;
use url::Url;

use crate::error::NavigationError;
use crate::location::Location;
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct InputResolver;

impl InputResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve user input into an absolute location
    pub fn resolve(&self, input: &str) -> Result<Location> {
        let input = input.trim();

        if input.is_empty() {
            return Err(NavigationError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let candidate = match self.explicit_scheme(input) {
            Some(scheme)
                if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
            {
                if !input[scheme.len() + 1..].starts_with("//") {
                    return Err(NavigationError::InvalidUrl(input.to_string()));
                }
                input.to_string()
            }
            Some(scheme) => {
                return Err(NavigationError::InvalidUrl(format!(
                    "unsupported scheme '{}' in {}",
                    scheme, input
                )));
            }
            None => self.with_default_scheme(input),
        };

        // `https:///path` parses, but only by promoting the path to a host
        let authority = candidate.split_once("://").map_or("", |(_, rest)| rest);
        if authority.is_empty() || authority.starts_with(['/', '?', '#']) {
            return Err(NavigationError::InvalidUrl(format!(
                "{}: missing host",
                candidate
            )));
        }

        let parsed = Url::parse(&candidate)
            .map_err(|e| NavigationError::InvalidUrl(format!("{}: {}", candidate, e)))?;

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| NavigationError::InvalidUrl(format!("{}: missing host", candidate)))?;

        let label = Location::label_for_host(host);
        Ok(Location::new(candidate, label))
    }

    fn with_default_scheme(&self, input: &str) -> String {
        let (host, rest) = Self::split_host_and_rest(input);
        if self.is_ipv6_host(host) && !host.starts_with('[') {
            format!("https://[{}]{}", host, rest)
        } else {
            format!("https://{}{}", host, rest)
        }
    }

    /// Scheme the user typed, if any. `host:port`, `host:` and bare IPv6
    /// addresses are not schemes.
    fn explicit_scheme<'a>(&self, input: &'a str) -> Option<&'a str> {
        let (scheme, rest) = input.split_once(':')?;

        if self.is_ipv6_host(Self::split_host_and_rest(input).0) {
            return None;
        }

        let mut chars = scheme.chars();
        let first = chars.next()?;
        if !first.is_ascii_alphabetic()
            || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return None;
        }

        // Dotted names are hosts: no supported scheme contains a dot
        if rest.is_empty() && scheme.contains('.') {
            return None;
        }

        let port_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        let after_port = &rest[port_len..];
        if port_len > 0 && (after_port.is_empty() || after_port.starts_with(['/', '?', '#'])) {
            return None;
        }

        Some(scheme)
    }

    fn is_ipv6_host(&self, host: &str) -> bool {
        matches!(self.parse_ip_host(host), Some(IpAddr::V6(_)))
    }

    fn parse_ip_host(&self, host: &str) -> Option<IpAddr> {
        let host = host.trim();
        if host.is_empty() {
            return None;
        }

        let host = if host.starts_with('[') {
            host.strip_prefix('[')
                .and_then(|s| s.split(']').next())
                .unwrap_or(host)
        } else if host.matches(':').count() == 1 {
            host.split(':').next().unwrap_or(host)
        } else {
            host
        };

        host.parse().ok()
    }

    fn split_host_and_rest(input: &str) -> (&str, &str) {
        let mut cut = input.len();
        for ch in ['/', '?', '#'] {
            if let Some(idx) = input.find(ch) {
                if idx < cut {
                    cut = idx;
                }
            }
        }

        input.split_at(cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_of(input: &str) -> String {
        InputResolver::new().resolve(input).unwrap().url
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(url_of("https://example.com"), "https://example.com");
        assert_eq!(url_of("http://example.com/a?b=c"), "http://example.com/a?b=c");
        assert_eq!(url_of("  example.com  "), "https://example.com");
        assert_eq!(url_of("localhost:8080"), "https://localhost:8080");
        assert_eq!(url_of("localhost:8080/path"), "https://localhost:8080/path");
        assert_eq!(url_of("HTTPS://Example.com"), "HTTPS://Example.com");
        assert_eq!(url_of("example.com:"), "https://example.com:");
    }

    #[test]
    fn test_label_from_host() {
        let resolver = InputResolver::new();
        let location = resolver.resolve("www.wikipedia.org/wiki/Rust").unwrap();
        assert_eq!(location.label, "wikipedia.org");

        let location = resolver.resolve("https://news.ycombinator.com").unwrap();
        assert_eq!(location.label, "news.ycombinator.com");
    }

    #[test]
    fn test_resolve_ipv6() {
        assert_eq!(url_of("::1"), "https://[::1]");
        assert_eq!(url_of("[::1]:8080"), "https://[::1]:8080");
        assert_eq!(url_of("2001:db8::1/path"), "https://[2001:db8::1]/path");
        assert_eq!(url_of("fe80::1"), "https://[fe80::1]");
        assert_eq!(url_of("abcd::1/path"), "https://[abcd::1]/path");
    }

    #[test]
    fn test_rejects_invalid_input() {
        let resolver = InputResolver::new();

        for input in [
            "",
            "   ",
            "rust programming",
            "ftp://example.com",
            "javascript:alert(1)",
            "about:blank",
            "http:example.com",
            "https://",
            "https:///foo",
            "/foo",
            "?q=rust",
            "javascript:",
        ] {
            match resolver.resolve(input) {
                Err(NavigationError::InvalidUrl(_)) => {}
                other => panic!("expected InvalidUrl for {:?}, got {:?}", input, other),
            }
        }
    }
}
