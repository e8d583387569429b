//! Local (in-process) client for the tenant resolver module.

use std::sync::Arc;

use async_trait::async_trait;
use tenant_resolver_sdk::{TenantConfig, TenantResolverClient, TenantResolverError};

use super::{DomainError, Service};

/// Local client wrapping the resolver service.
///
/// Handed to the bootstrap orchestrator as `Arc<dyn TenantResolverClient>`.
pub struct TenantResolverLocalClient {
    svc: Arc<Service>,
}

impl TenantResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, hostname: &str, e: DomainError) -> TenantResolverError {
    match &e {
        DomainError::TenantNotFound { .. } => {
            tracing::warn!(operation = op, host = hostname, error = %e, "tenant-resolver call failed");
        }
        DomainError::Store(_) | DomainError::InvalidRecord { .. } => {
            tracing::error!(operation = op, host = hostname, error = ?e, "tenant-resolver call failed");
        }
    }
    e.into()
}

#[async_trait]
impl TenantResolverClient for TenantResolverLocalClient {
    async fn resolve(&self, hostname: &str) -> Result<Arc<TenantConfig>, TenantResolverError> {
        self.svc
            .resolve(hostname)
            .await
            .map_err(|e| log_and_convert("resolve", hostname, e))
    }

    async fn invalidate(&self, hostname: &str) {
        self.svc.invalidate(hostname).await;
    }
}
