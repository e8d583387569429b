//! Public API trait for the tenant resolver.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TenantResolverError;
use crate::models::TenantConfig;

/// Public API trait for the tenant resolver.
///
/// Implemented by the resolver's local client and consumed by the bootstrap
/// orchestrator:
///
/// ```ignore
/// let config = resolver.resolve("acme.example.com").await?;
/// assert_eq!(config.subdomain, "acme");
/// ```
#[async_trait]
pub trait TenantResolverClient: Send + Sync {
    /// Resolve a request host name into a fully hydrated tenant configuration.
    ///
    /// Results are cached per host category for the configured TTL; the
    /// returned `Arc` is shared with the cache and never mutated.
    ///
    /// # Errors
    ///
    /// - `TenantNotFound` if the subdomain is not reserved and matches no organization
    /// - `Resolution` on any store transport or parsing failure
    async fn resolve(&self, hostname: &str) -> Result<Arc<TenantConfig>, TenantResolverError>;

    /// Drop the cached configuration for the host, if any.
    ///
    /// The next `resolve` for the same host fetches from the store again.
    async fn invalidate(&self, hostname: &str);
}
