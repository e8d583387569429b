//! Workforce module
//!
//! Employee scheduling: the `schedule` tab, the `clock-in` action, the
//! `timeline` view type and the employee detail view. With
//! `ticket_workload` set, employees also get a tab listing their assigned
//! tickets (only useful when the tickets module is enabled too).
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod components;
pub mod config;
pub mod module;

pub use config::WorkforceConfig;
pub use module::{MODULE_ID, WorkforceModule, manifest_entry};
