//! Tenant Resolver SDK
//!
//! This crate provides the public API for the `tenant-resolver` module:
//!
//! - [`TenantResolverClient`] - Public API trait for consumers
//! - [`TenantStorePluginClient`] - Backing-store trait for plugin implementations
//! - [`TenantConfig`], [`ThemeConfig`] - Resolved tenant model
//! - [`OrganizationRecord`], [`SystemDefaults`] - Raw backing-store records
//! - [`TenantResolverError`], [`TenantStoreError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use tenant_resolver_sdk::TenantResolverClient;
//!
//! let config = resolver.resolve("acme.example.com").await?;
//! if config.is_module_enabled("tickets") {
//!     // ...
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::TenantResolverClient;
pub use error::{TenantResolverError, TenantStoreError};
pub use models::{
    DEFAULT_LANGUAGE, JsonObject, OrganizationRecord, SystemDefaults, TenantConfig, ThemeConfig,
    ThemeMode,
};
pub use plugin_api::TenantStorePluginClient;
