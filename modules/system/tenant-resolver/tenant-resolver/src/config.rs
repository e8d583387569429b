//! Configuration for the tenant resolver module.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Module configuration (`modules.tenant_resolver.config`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenantResolverConfig {
    /// Domains stripped from the request host before taking the leading label.
    ///
    /// The longest matching suffix wins, so `eu.example.com` can coexist with
    /// `example.com`.
    pub base_domains: Vec<String>,

    /// Time-to-live for resolved configurations.
    #[serde(with = "shellkit::humantime_serde")]
    pub cache_ttl: Duration,

    /// Maximum number of cached host categories.
    pub cache_max_entries: u64,

    /// Reserved subdomains served by the login portal.
    pub auth_portal_subdomains: BTreeSet<String>,

    /// Reserved subdomains served by the hub portal. The empty subdomain
    /// always belongs here.
    pub hub_subdomains: BTreeSet<String>,

    /// Subdomain assumed for `localhost` and bare IP hosts.
    pub dev_subdomain: Option<String>,

    pub auth_portal: PortalProfile,
    pub hub_portal: PortalProfile,
}

fn reserved(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for TenantResolverConfig {
    fn default() -> Self {
        Self {
            base_domains: vec!["localhost".to_owned()],
            cache_ttl: Duration::from_secs(5 * 60),
            cache_max_entries: 1_000,
            auth_portal_subdomains: reserved(&["login", "auth", "sso", "signin"]),
            hub_subdomains: reserved(&["app", "www", "hub"]),
            dev_subdomain: None,
            auth_portal: PortalProfile::named("Sign in"),
            hub_portal: PortalProfile::named("Hub"),
        }
    }
}

/// How a reserved portal host is presented.
///
/// Portals are not backed by an organization record; their configuration is
/// the system defaults adjusted by this profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalProfile {
    /// Display name used as `organization_name`.
    pub name: String,
    /// Modules to activate; `None` keeps the system defaults' set.
    pub enabled_modules: Option<BTreeSet<String>>,
    /// Theme JSON merged over the system theme.
    pub theme: Option<serde_json::Value>,
}

impl PortalProfile {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reserved_lists() {
        let cfg = TenantResolverConfig::default();
        assert_eq!(cfg.cache_ttl, Duration::from_secs(300));
        assert!(cfg.auth_portal_subdomains.contains("signin"));
        assert!(cfg.hub_subdomains.contains("www"));
        assert_eq!(cfg.base_domains, vec!["localhost"]);
    }

    #[test]
    fn yaml_overrides_and_defaults() {
        let yaml = r"
base_domains: [example.com, eu.example.com]
cache_ttl: 30s
hub_portal:
  name: Acme Hub
  enabled_modules: [core]
";
        let cfg: TenantResolverConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(cfg.base_domains.len(), 2);
        assert_eq!(cfg.cache_ttl, Duration::from_secs(30));
        assert_eq!(cfg.cache_max_entries, 1_000);
        assert_eq!(cfg.hub_portal.name, "Acme Hub");
        assert_eq!(cfg.hub_portal.enabled_modules, Some(reserved(&["core"])));
        // Untouched sections keep the module defaults.
        assert_eq!(cfg.auth_portal.name, "Sign in");
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<TenantResolverConfig, _> = serde_saphyr::from_str("cache_tll: 5m\n");
        assert!(result.is_err());
    }
}
