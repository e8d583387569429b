//! `TenantStorePluginClient` implementation over the static service.

use std::sync::Arc;

use async_trait::async_trait;
use tenant_resolver_sdk::{
    OrganizationRecord, SystemDefaults, TenantStoreError, TenantStorePluginClient,
};

use super::Service;

pub struct StaticStoreClient {
    svc: Arc<Service>,
}

impl StaticStoreClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl TenantStorePluginClient for StaticStoreClient {
    async fn find_organization(
        &self,
        subdomain: &str,
    ) -> Result<Option<OrganizationRecord>, TenantStoreError> {
        let found = self.svc.find(subdomain).cloned();
        tracing::debug!(subdomain, found = found.is_some(), "static store lookup");
        Ok(found)
    }

    async fn system_defaults(&self) -> Result<SystemDefaults, TenantStoreError> {
        Ok(self.svc.system().clone())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::StaticStorePluginConfig;

    #[tokio::test]
    async fn serves_records_and_defaults() {
        let svc = Service::new(StaticStorePluginConfig {
            system: SystemDefaults {
                languages: vec!["en".to_owned()],
                ..SystemDefaults::default()
            },
            organizations: vec![OrganizationRecord {
                name: "Acme".to_owned(),
                subdomain: "acme".to_owned(),
                ..OrganizationRecord::default()
            }],
        })
        .unwrap();
        let client = StaticStoreClient::new(Arc::new(svc));

        assert!(client.find_organization("acme").await.unwrap().is_some());
        assert!(client.find_organization("ghost").await.unwrap().is_none());
        assert_eq!(client.system_defaults().await.unwrap().languages, vec!["en"]);
    }
}
