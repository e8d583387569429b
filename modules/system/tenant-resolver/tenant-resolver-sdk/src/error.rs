//! Error types for the tenant resolver module.

use thiserror::Error;

/// Errors that can occur when resolving a tenant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenantResolverError {
    /// The subdomain is not reserved and no organization matches it.
    #[error("tenant not found for subdomain '{subdomain}'")]
    TenantNotFound {
        /// The subdomain derived from the request host.
        subdomain: String,
    },

    /// Fetching or parsing tenant/system configuration failed.
    #[error("tenant resolution failed: {0}")]
    Resolution(String),
}

/// Errors reported by a backing-store plugin.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenantStoreError {
    /// The store could not be reached.
    #[error("tenant store unavailable: {0}")]
    Unavailable(String),

    /// The store returned a record that cannot be interpreted.
    #[error("malformed tenant record: {0}")]
    Malformed(String),
}

impl From<TenantStoreError> for TenantResolverError {
    fn from(err: TenantStoreError) -> Self {
        TenantResolverError::Resolution(err.to_string())
    }
}
