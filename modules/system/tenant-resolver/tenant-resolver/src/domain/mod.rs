//! Domain layer for the tenant resolver.

pub mod error;
pub mod host;
pub mod local_client;
pub mod merge;
pub mod service;

pub use error::DomainError;
pub use host::{HostKind, derive_subdomain};
pub use local_client::TenantResolverLocalClient;
pub use service::Service;
