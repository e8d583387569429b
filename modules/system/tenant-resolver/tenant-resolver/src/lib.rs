//! Tenant Resolver Module
//!
//! Turns a request host into a fully hydrated `TenantConfig`: derives and
//! classifies the subdomain, fetches the organization and system defaults
//! from a store plugin, merges them and caches the result for a TTL.
//!
//! The module provides the `TenantResolverClient` trait consumed by the
//! bootstrap orchestrator.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::{MODULE_NAME, TenantResolverModule};
