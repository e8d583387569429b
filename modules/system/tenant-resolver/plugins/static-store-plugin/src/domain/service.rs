//! Indexed in-memory organization store.

use std::collections::HashMap;

use tenant_resolver_sdk::{OrganizationRecord, SystemDefaults};

use crate::config::StaticStorePluginConfig;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StoreConfigError {
    #[error("organization '{name}' has an empty subdomain")]
    EmptySubdomain { name: String },
    #[error("subdomain '{subdomain}' is used by more than one organization")]
    DuplicateSubdomain { subdomain: String },
}

/// Static store service.
///
/// Subdomains are matched case-insensitively.
#[derive(Debug)]
pub struct Service {
    system: SystemDefaults,
    organizations: HashMap<String, OrganizationRecord>,
}

impl Service {
    /// Index the configured organizations by subdomain.
    ///
    /// # Errors
    /// Returns `StoreConfigError` for an empty or duplicated subdomain.
    pub fn new(cfg: StaticStorePluginConfig) -> Result<Self, StoreConfigError> {
        let mut organizations = HashMap::with_capacity(cfg.organizations.len());
        for org in cfg.organizations {
            let key = org.subdomain.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(StoreConfigError::EmptySubdomain { name: org.name });
            }
            if organizations.contains_key(&key) {
                return Err(StoreConfigError::DuplicateSubdomain { subdomain: key });
            }
            organizations.insert(key, org);
        }

        Ok(Self {
            system: cfg.system,
            organizations,
        })
    }

    #[must_use]
    pub fn find(&self, subdomain: &str) -> Option<&OrganizationRecord> {
        self.organizations.get(&subdomain.to_ascii_lowercase())
    }

    #[must_use]
    pub fn system(&self) -> &SystemDefaults {
        &self.system
    }

    /// Configured organizations, sorted by subdomain.
    #[must_use]
    pub fn organizations(&self) -> Vec<&OrganizationRecord> {
        let mut all: Vec<_> = self.organizations.values().collect();
        all.sort_by(|a, b| a.subdomain.cmp(&b.subdomain));
        all
    }
}
