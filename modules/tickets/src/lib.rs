//! Tickets module
//!
//! Registers the ticket list tab, ticket row actions (`assign`, `close`), the
//! global `create-ticket` action and the ticket detail view.
//!
//! ## Tenant configuration
//!
//! ```yaml
//! module_config:
//!   tickets:
//!     allow_close: false
//!     sla_tab: true
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod components;
pub mod config;
pub mod module;

pub use config::TicketsConfig;
pub use module::{MODULE_ID, TicketsModule, manifest_entry};
