//! Shellkit bootstrap
//!
//! Host-side wiring for the console shell:
//!
//! - [`AppConfig`] - layered configuration (defaults, YAML, `APP__*` env)
//! - [`init_logging`] - global `tracing` subscriber
//! - [`Bootstrap`] - resolve tenant, load translations, load modules, apply theme
//! - [`TenantHandle`] - `{ config, loading }` snapshots for the rest of the app
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod collaborators;
pub mod config;
pub mod handle;
pub mod logging;
pub mod orchestrator;

pub use collaborators::{I18nClient, ThemeClient};
pub use config::{AppConfig, ENV_PREFIX};
pub use handle::{TenantHandle, TenantSnapshot};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use orchestrator::{Bootstrap, BootstrapError, BootstrapPhase, BootstrapStatus};
