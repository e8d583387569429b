//! Host name to subdomain derivation and classification.

use std::fmt;
use std::net::IpAddr;

use crate::config::TenantResolverConfig;

/// What a request host resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKind {
    /// Reserved login portal subdomain.
    AuthPortal(String),
    /// Reserved hub subdomain, including the bare base domain.
    HubPortal(String),
    /// Anything else: looked up as an organization.
    Tenant(String),
}

impl HostKind {
    #[must_use]
    pub fn classify(subdomain: &str, cfg: &TenantResolverConfig) -> Self {
        if cfg.auth_portal_subdomains.contains(subdomain) {
            Self::AuthPortal(subdomain.to_owned())
        } else if subdomain.is_empty() || cfg.hub_subdomains.contains(subdomain) {
            Self::HubPortal(subdomain.to_owned())
        } else {
            Self::Tenant(subdomain.to_owned())
        }
    }

    #[must_use]
    pub fn subdomain(&self) -> &str {
        match self {
            Self::AuthPortal(s) | Self::HubPortal(s) | Self::Tenant(s) => s,
        }
    }

    /// Cache key: the category plus the subdomain.
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthPortal(s) => write!(f, "auth:{s}"),
            Self::HubPortal(s) => write!(f, "hub:{s}"),
            Self::Tenant(s) => write!(f, "tenant:{s}"),
        }
    }
}

/// Derive the candidate subdomain from a request host.
///
/// Lowercases, drops the port and trailing dot, then strips the longest
/// configured base domain and keeps the leading label of what remains.
/// `localhost` and IP literals yield the configured development subdomain.
#[must_use]
pub fn derive_subdomain(host: &str, cfg: &TenantResolverConfig) -> String {
    let Some(host) = normalize_host(host) else {
        return cfg.dev_subdomain.clone().unwrap_or_default();
    };

    if host == "localhost" || host.parse::<IpAddr>().is_ok() {
        return cfg.dev_subdomain.clone().unwrap_or_default();
    }

    let mut bases: Vec<&str> = cfg
        .base_domains
        .iter()
        .map(|b| b.trim_end_matches('.'))
        .filter(|b| !b.is_empty())
        .collect();
    bases.sort_by_key(|b| std::cmp::Reverse(b.len()));

    for base in bases {
        if host.eq_ignore_ascii_case(base) {
            return String::new();
        }
        if let Some(prefix) = strip_domain_suffix(&host, base) {
            return leading_label(prefix);
        }
    }

    // Unknown domain: `acme.example.com` -> `acme`, `example.com` -> "".
    if host.split('.').count() >= 3 {
        leading_label(&host)
    } else {
        String::new()
    }
}

/// Lowercased host without port or trailing dot; `None` for IPv6 literals.
fn normalize_host(raw: &str) -> Option<String> {
    let host = raw.trim().to_ascii_lowercase();
    if host.starts_with('[') {
        return None;
    }
    let host = match host.matches(':').count() {
        0 => host,
        1 => host.split(':').next().unwrap_or_default().to_owned(),
        // bare IPv6
        _ => return None,
    };
    Some(host.trim_end_matches('.').to_owned())
}

fn strip_domain_suffix<'a>(host: &'a str, base: &str) -> Option<&'a str> {
    let base = base.to_ascii_lowercase();
    host.strip_suffix(base.as_str())?.strip_suffix('.')
}

fn leading_label(s: &str) -> String {
    s.split('.').next().unwrap_or_default().to_owned()
}
