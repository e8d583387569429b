use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::{ConfigError, parse_module_slice};
use crate::registry::{
    ActionDefinition, CapabilityRegistry, DetailComponentDefinition, ModuleDefinition,
    TabDefinition, ViewTypeDefinition,
};

/// Registration context - what a feature module sees while it registers.
///
/// Carries the module's slice of the tenant configuration and the single
/// write path into the [`CapabilityRegistry`]:
/// - **Configuration**: typed access via `config()`
/// - **Capabilities**: `register_*` helpers that forward to the shared registry
///
/// ```ignore
/// async fn register(&self, ctx: &RegisterCtx) -> anyhow::Result<()> {
///     let cfg: TicketsConfig = ctx.config()?;
///     ctx.register_tab(TabDefinition::new("tickets", "Tickets", ComponentRef::of::<List>("tickets/list"))
///         .for_entities(["tickets"]));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RegisterCtx {
    module_id: Arc<str>,
    config: serde_json::Value,
    registry: Arc<CapabilityRegistry>,
}

impl RegisterCtx {
    /// Only the [`ModuleLoader`](crate::loader::ModuleLoader) hands these out.
    #[must_use]
    pub(crate) fn new(
        module_id: impl Into<Arc<str>>,
        config: serde_json::Value,
        registry: Arc<CapabilityRegistry>,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            config,
            registry,
        }
    }

    #[inline]
    #[must_use]
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Raw tenant slice for this module (`{}` when the tenant configured nothing).
    #[inline]
    #[must_use]
    pub fn raw_config(&self) -> &serde_json::Value {
        &self.config
    }

    /// Typed view of the tenant slice; an empty slice yields `T::default()`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidConfig` if the slice does not match `T`.
    pub fn config<T: DeserializeOwned + Default>(&self) -> Result<T, ConfigError> {
        parse_module_slice(&self.module_id, &self.config)
    }

    /// Read access to everything registered so far, including by other modules.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn register_module(&self, def: ModuleDefinition) {
        self.registry.register_module(def);
    }

    pub fn register_action(&self, def: ActionDefinition) {
        self.registry.register_action(def);
    }

    pub fn register_tab(&self, def: TabDefinition) {
        self.registry.register_tab(def);
    }

    pub fn register_view_type(&self, def: ViewTypeDefinition) {
        self.registry.register_view_type(def);
    }

    pub fn register_detail_component(&self, def: DetailComponentDefinition) {
        self.registry.register_detail_component(def);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct TicketsLike {
        allow_close: bool,
        page_size: u32,
    }

    #[test]
    fn typed_config_from_slice() {
        let ctx = RegisterCtx::new(
            "tickets",
            json!({"allow_close": true, "page_size": 50}),
            Arc::new(CapabilityRegistry::new()),
        );
        let cfg: TicketsLike = ctx.config().unwrap();
        assert!(cfg.allow_close);
        assert_eq!(cfg.page_size, 50);
        assert_eq!(ctx.module_id(), "tickets");
    }

    #[test]
    fn empty_slice_is_default() {
        let ctx = RegisterCtx::new("tickets", json!({}), Arc::new(CapabilityRegistry::new()));
        assert_eq!(ctx.config::<TicketsLike>().unwrap(), TicketsLike::default());
    }

    #[test]
    fn writes_land_in_shared_registry() {
        let registry = Arc::new(CapabilityRegistry::new());
        let ctx = RegisterCtx::new("core", json!({}), registry.clone());
        ctx.register_module(ModuleDefinition::new("core", "Core", "1.0.0"));
        assert!(registry.get_module("core").is_some());
        assert!(ctx.registry().get_module("core").is_some());
    }
}
