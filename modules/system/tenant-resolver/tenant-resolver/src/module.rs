//! Tenant resolver module wiring.

use std::sync::Arc;

use shellkit::config::{ConfigProvider, module_config_or_default};
use tenant_resolver_sdk::{TenantResolverClient, TenantStorePluginClient};
use tracing::info;

use crate::config::TenantResolverConfig;
use crate::domain::{Service, TenantResolverLocalClient};

pub const MODULE_NAME: &str = "tenant_resolver";

/// Tenant resolver module.
///
/// Reads `modules.tenant_resolver.config`, builds the cached service over the
/// given store plugin and exposes it as a `TenantResolverClient`.
pub struct TenantResolverModule {
    service: Arc<Service>,
}

impl TenantResolverModule {
    /// # Errors
    /// Returns an error if the module's config section is present but invalid.
    #[tracing::instrument(skip_all)]
    pub fn init(
        config: &dyn ConfigProvider,
        store: Arc<dyn TenantStorePluginClient>,
    ) -> anyhow::Result<Self> {
        let cfg: TenantResolverConfig = module_config_or_default(config, MODULE_NAME)?;
        info!(
            base_domains = ?cfg.base_domains,
            cache_ttl = ?cfg.cache_ttl,
            cache_max_entries = cfg.cache_max_entries,
            "Initializing tenant_resolver"
        );

        Ok(Self {
            service: Arc::new(Service::new(store, cfg)),
        })
    }

    #[must_use]
    pub fn service(&self) -> &Arc<Service> {
        &self.service
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn TenantResolverClient> {
        Arc::new(TenantResolverLocalClient::new(Arc::clone(&self.service)))
    }
}
