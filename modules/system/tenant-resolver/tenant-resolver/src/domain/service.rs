//! Resolver service: host classification, store fetch, merge and TTL cache.

use std::sync::Arc;

use moka::future::Cache;
use tenant_resolver_sdk::{TenantConfig, TenantStorePluginClient};

use super::error::DomainError;
use super::host::{HostKind, derive_subdomain};
use super::merge;
use crate::config::TenantResolverConfig;

/// Tenant resolver service.
///
/// Entries live for `cache_ttl` and are never served after expiry.
/// Concurrent misses for the same key share one store fetch; failures are
/// not cached.
pub struct Service {
    store: Arc<dyn TenantStorePluginClient>,
    cfg: TenantResolverConfig,
    cache: Cache<String, Arc<TenantConfig>>,
}

impl Service {
    #[must_use]
    pub fn new(store: Arc<dyn TenantStorePluginClient>, cfg: TenantResolverConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(cfg.cache_max_entries)
            .time_to_live(cfg.cache_ttl)
            .build();

        Self { store, cfg, cache }
    }

    #[must_use]
    pub fn config(&self) -> &TenantResolverConfig {
        &self.cfg
    }

    /// Classify a host without touching the store.
    #[must_use]
    pub fn classify(&self, hostname: &str) -> HostKind {
        let subdomain = derive_subdomain(hostname, &self.cfg);
        HostKind::classify(&subdomain, &self.cfg)
    }

    /// Resolve a host, serving from cache while the entry is fresh.
    ///
    /// # Errors
    /// `TenantNotFound` for an unknown tenant subdomain, `Store` or
    /// `InvalidRecord` when fetching or merging fails.
    pub async fn resolve(&self, hostname: &str) -> Result<Arc<TenantConfig>, DomainError> {
        let subdomain = derive_subdomain(hostname, &self.cfg);
        tracing::debug!(host = hostname, subdomain = %subdomain, "Derived subdomain");
        self.resolve_subdomain(&subdomain).await
    }

    /// Resolve an already derived subdomain; same caching as [`Self::resolve`].
    ///
    /// # Errors
    /// As [`Self::resolve`].
    pub async fn resolve_subdomain(&self, subdomain: &str) -> Result<Arc<TenantConfig>, DomainError> {
        let kind = HostKind::classify(subdomain, &self.cfg);
        let key = kind.cache_key();

        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(key = %key, "Tenant config cache hit");
            return Ok(hit);
        }

        self.cache
            .try_get_with(key, self.fetch(&kind))
            .await
            .map_err(|e: Arc<DomainError>| (*e).clone())
    }

    /// Drop the cache entry the host maps to.
    pub async fn invalidate(&self, hostname: &str) {
        let key = self.classify(hostname).cache_key();
        tracing::debug!(host = hostname, key = %key, "Invalidating tenant config");
        self.cache.invalidate(&key).await;
    }

    pub fn invalidate_all(&self) {
        tracing::debug!("Invalidating all tenant configs");
        self.cache.invalidate_all();
    }

    async fn fetch(&self, kind: &HostKind) -> Result<Arc<TenantConfig>, DomainError> {
        tracing::debug!(kind = %kind, "Tenant config cache miss, fetching");

        let system = self.store.system_defaults().await?;
        let config = match kind {
            HostKind::AuthPortal(_) => merge::portal_config(kind, &self.cfg.auth_portal, &system)?,
            HostKind::HubPortal(_) => merge::portal_config(kind, &self.cfg.hub_portal, &system)?,
            HostKind::Tenant(subdomain) => {
                let org = self
                    .store
                    .find_organization(subdomain)
                    .await?
                    .ok_or_else(|| DomainError::TenantNotFound {
                        subdomain: subdomain.clone(),
                    })?;
                merge::tenant_config(subdomain, &org, &system)?
            }
        };

        tracing::info!(
            kind = %kind,
            organization = %config.organization_name,
            modules = config.enabled_modules.len(),
            "Resolved tenant configuration"
        );
        Ok(Arc::new(config))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tenant_resolver_sdk::{OrganizationRecord, SystemDefaults, TenantStoreError};
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingStore {
        org_fetches: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    #[async_trait]
    impl TenantStorePluginClient for CountingStore {
        async fn find_organization(
            &self,
            subdomain: &str,
        ) -> Result<Option<OrganizationRecord>, TenantStoreError> {
            self.org_fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(TenantStoreError::Unavailable("connection refused".to_owned()));
            }
            Ok((subdomain == "acme").then(|| OrganizationRecord {
                id: Uuid::new_v4(),
                name: "Acme".to_owned(),
                subdomain: subdomain.to_owned(),
                modules: BTreeMap::from([("tickets".to_owned(), true)]),
                ..OrganizationRecord::default()
            }))
        }

        async fn system_defaults(&self) -> Result<SystemDefaults, TenantStoreError> {
            Ok(SystemDefaults {
                modules: BTreeMap::from([("core".to_owned(), true)]),
                ..SystemDefaults::default()
            })
        }
    }

    fn service(store: Arc<CountingStore>, ttl: Duration) -> Service {
        let cfg = TenantResolverConfig {
            base_domains: vec!["example.com".to_owned()],
            cache_ttl: ttl,
            ..TenantResolverConfig::default()
        };
        Service::new(store, cfg)
    }

    #[tokio::test]
    async fn resolves_within_ttl_from_cache() {
        let store = Arc::new(CountingStore::default());
        let svc = service(store.clone(), Duration::from_secs(60));

        let first = svc.resolve("acme.example.com").await.unwrap();
        let second = svc.resolve("ACME.example.com:443").await.unwrap();

        assert_eq!(store.org_fetches.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            first.enabled_modules.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["core", "tickets"]
        );
    }

    #[tokio::test]
    async fn refetches_after_ttl_expiry() {
        let store = Arc::new(CountingStore::default());
        let svc = service(store.clone(), Duration::from_millis(300));

        let first = svc.resolve("acme.example.com").await.unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        let second = svc.resolve("acme.example.com").await.unwrap();

        assert_eq!(store.org_fetches.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&first, &second), "expired entry is replaced");
        assert_ne!(first.organization_id, second.organization_id);
    }

    #[tokio::test]
    async fn concurrent_misses_share_one_fetch() {
        let store = Arc::new(CountingStore {
            delay: Duration::from_millis(100),
            ..CountingStore::default()
        });
        let svc = service(store.clone(), Duration::from_secs(60));

        let (a, b, c) = tokio::join!(
            svc.resolve("acme.example.com"),
            svc.resolve("acme.example.com"),
            svc.resolve("acme.example.com"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(store.org_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_tenant_is_not_found_and_not_cached() {
        let store = Arc::new(CountingStore::default());
        let svc = service(store.clone(), Duration::from_secs(60));

        for _ in 0..2 {
            let err = svc.resolve("ghost.example.com").await.unwrap_err();
            assert!(matches!(err, DomainError::TenantNotFound { subdomain } if subdomain == "ghost"));
        }
        assert_eq!(store.org_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn store_failure_is_a_store_error() {
        let store = Arc::new(CountingStore {
            fail: true,
            ..CountingStore::default()
        });
        let svc = service(store, Duration::from_secs(60));
        let err = svc.resolve("acme.example.com").await.unwrap_err();
        assert!(matches!(err, DomainError::Store(TenantStoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn portals_never_query_organizations() {
        let store = Arc::new(CountingStore::default());
        let svc = service(store.clone(), Duration::from_secs(60));

        let login = svc.resolve("login.example.com").await.unwrap();
        let hub = svc.resolve("example.com").await.unwrap();
        let app = svc.resolve("app.example.com").await.unwrap();

        assert!(login.is_login_portal && !login.is_hub);
        assert!(hub.is_hub && app.is_hub);
        assert_eq!(hub.subdomain, "");
        assert_eq!(app.subdomain, "app");
        assert_eq!(store.org_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let store = Arc::new(CountingStore::default());
        let svc = service(store.clone(), Duration::from_secs(60));

        svc.resolve("acme.example.com").await.unwrap();
        svc.invalidate("acme.example.com").await;
        svc.resolve("acme.example.com").await.unwrap();
        svc.invalidate_all();
        svc.resolve("acme.example.com").await.unwrap();

        assert_eq!(store.org_fetches.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn subdomain_and_host_share_the_cache() {
        let store = Arc::new(CountingStore::default());
        let svc = service(store.clone(), Duration::from_secs(60));

        let by_host = svc.resolve("acme.example.com").await.unwrap();
        let by_subdomain = svc.resolve_subdomain("acme").await.unwrap();

        assert!(Arc::ptr_eq(&by_host, &by_subdomain));
        assert_eq!(store.org_fetches.load(Ordering::SeqCst), 1);
    }
}
