//! Core module
//!
//! Baseline capabilities every console tenant gets:
//!
//! - view types `table`, `calendar` and (optionally) `kanban`
//! - a global `refresh` action and an `activity` tab for each configured entity type
//!
//! ## Tenant configuration
//!
//! ```yaml
//! module_config:
//!   core:
//!     entity_types: [customers, employees, tickets]
//!     activity_tab: true
//!     kanban: false
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod components;
pub mod config;
pub mod module;

pub use config::CoreConfig;
pub use module::{CoreModule, MODULE_ID, manifest_entry};
