//! Backing-store API implemented by tenant store plugins.

use async_trait::async_trait;

use crate::error::TenantStoreError;
use crate::models::{OrganizationRecord, SystemDefaults};

/// Backing store consulted by the resolver on cache misses.
///
/// Plugins only fetch raw records; merging and caching happen in the
/// resolver.
#[async_trait]
pub trait TenantStorePluginClient: Send + Sync {
    /// Fetch the organization registered under `subdomain`.
    ///
    /// Returns `Ok(None)` when no organization matches.
    ///
    /// # Errors
    ///
    /// Returns `TenantStoreError` on transport or decoding failures.
    async fn find_organization(
        &self,
        subdomain: &str,
    ) -> Result<Option<OrganizationRecord>, TenantStoreError>;

    /// Fetch the system-wide defaults every tenant inherits from.
    ///
    /// # Errors
    ///
    /// Returns `TenantStoreError` on transport or decoding failures.
    async fn system_defaults(&self) -> Result<SystemDefaults, TenantStoreError>;
}
