//! Static tenant store plugin module wiring.

use std::sync::Arc;

use shellkit::config::{ConfigProvider, module_config_or_default};
use tenant_resolver_sdk::TenantStorePluginClient;
use tracing::info;

use crate::config::StaticStorePluginConfig;
use crate::domain::{Service, StaticStoreClient};

pub const MODULE_NAME: &str = "static_store_plugin";

/// Static store plugin module.
pub struct StaticStorePlugin {
    service: Arc<Service>,
}

impl StaticStorePlugin {
    /// # Errors
    /// Returns an error if the config section is invalid or organizations
    /// have empty or clashing subdomains.
    #[tracing::instrument(skip_all)]
    pub fn init(config: &dyn ConfigProvider) -> anyhow::Result<Self> {
        let cfg: StaticStorePluginConfig = module_config_or_default(config, MODULE_NAME)?;
        let count = cfg.organizations.len();
        let service = Service::new(cfg)?;
        info!(organizations = count, "Initializing static_store_plugin");

        Ok(Self {
            service: Arc::new(service),
        })
    }

    #[must_use]
    pub fn service(&self) -> &Arc<Service> {
        &self.service
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn TenantStorePluginClient> {
        Arc::new(StaticStoreClient::new(Arc::clone(&self.service)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    struct Single(serde_json::Value);

    impl ConfigProvider for Single {
        fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
            (module_name == MODULE_NAME).then_some(&self.0)
        }
    }

    #[test]
    fn init_reads_organizations() {
        let provider = Single(json!({
            "config": {
                "organizations": [
                    {"id": "550e8400-e29b-41d4-a716-446655440001", "name": "Acme", "subdomain": "acme"}
                ]
            }
        }));
        let plugin = StaticStorePlugin::init(&provider).unwrap();
        assert!(plugin.service().find("acme").is_some());
    }

    #[test]
    fn init_fails_on_clashing_subdomains() {
        let provider = Single(json!({
            "config": {
                "organizations": [
                    {"name": "Acme", "subdomain": "acme"},
                    {"name": "Acme 2", "subdomain": "acme"}
                ]
            }
        }));
        let err = StaticStorePlugin::init(&provider).err().unwrap();
        assert!(err.to_string().contains("more than one organization"));
    }
}
