//! Static Tenant Store Plugin
//!
//! Serves organization records and system defaults from configuration.
//! Useful for testing, development, and single-box deployments.
//!
//! ## Configuration
//!
//! ```yaml
//! modules:
//!   static_store_plugin:
//!     config:
//!       system:
//!         modules: { core: true }
//!         languages: [en, de]
//!         default_language: en
//!       organizations:
//!         - id: "550e8400-e29b-41d4-a716-446655440001"
//!           name: "Acme"
//!           subdomain: "acme"
//!           modules: { tickets: true }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::{MODULE_NAME, StaticStorePlugin};
