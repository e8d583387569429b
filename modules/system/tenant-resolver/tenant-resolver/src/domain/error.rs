//! Domain errors for the tenant resolver.

use tenant_resolver_sdk::{TenantResolverError, TenantStoreError};

/// Internal domain errors.
///
/// `Clone` because concurrent misses for one host share a single fetch and
/// each waiter receives the outcome.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    #[error("no organization for subdomain '{subdomain}'")]
    TenantNotFound { subdomain: String },

    #[error("store error: {0}")]
    Store(#[from] TenantStoreError),

    #[error("invalid configuration for '{subdomain}': {reason}")]
    InvalidRecord { subdomain: String, reason: String },
}

impl From<DomainError> for TenantResolverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::TenantNotFound { subdomain } => Self::TenantNotFound { subdomain },
            DomainError::Store(err) => err.into(),
            DomainError::InvalidRecord { .. } => Self::Resolution(e.to_string()),
        }
    }
}
