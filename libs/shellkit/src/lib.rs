//! Shellkit
//!
//! Building blocks for the console shell's per-tenant module activation:
//!
//! - [`ModuleManifest`] - static id -> deferred loader table
//! - [`ModuleLoader`] - concurrent, settle-all load pass for a resolved tenant
//! - [`CapabilityRegistry`] - additive store of actions, tabs, view types and detail components
//! - [`RegisterCtx`] / [`RegistrationModule`] - the contract feature modules implement
//!
//! ```ignore
//! let registry = Arc::new(CapabilityRegistry::new());
//! let loader = ModuleLoader::new(Arc::new(manifest), registry.clone());
//! let report = loader.load_modules(&tenant).await;
//! let tabs = registry.get_tabs_for_entity("tickets");
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod context;
pub mod contracts;
pub mod humantime_serde;
pub mod loader;
pub mod manifest;
pub mod registry;

pub use config::{
    ConfigError, ConfigProvider, module_config_or_default, module_config_required,
    parse_module_slice,
};
pub use context::RegisterCtx;
pub use contracts::RegistrationModule;
pub use loader::{LoadReport, ModuleLoadError, ModuleLoadOutcome, ModuleLoader};
pub use manifest::{
    DependencyIssue, ManifestError, ModuleLoaderFn, ModuleManifest, ModuleManifestBuilder,
    ModuleManifestEntry,
};
pub use registry::{
    ActionDefinition, ActionPosition, CapabilityRegistry, Component, ComponentRef,
    DetailComponentDefinition, ModuleDefinition, TabDefinition, ViewTypeDefinition,
};
