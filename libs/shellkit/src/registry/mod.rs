//! Capability registry.
//!
//! Process-wide, additive store of what loaded modules contribute:
//! module metadata, per-entity actions and tabs, view types and detail
//! components. One instance belongs to one tenant and is shared behind an
//! `Arc`; modules write through their [`RegisterCtx`](crate::context::RegisterCtx),
//! everything else only reads.
//!
//! Invariants:
//! - within one entity type's action (or tab) list an `id` appears at most once;
//!   re-registering it is a no-op
//! - view types, detail components and module definitions are keyed by `id`,
//!   last write wins
//! - nothing is ever removed
//!
//! Each write takes the collection's lock once for its whole fan-out, so two
//! modules registering concurrently never interleave inside one update.

mod component;
mod definitions;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

pub use component::{Component, ComponentRef};
pub use definitions::{
    ActionDefinition, ActionPosition, DetailComponentDefinition, ModuleDefinition, TabDefinition,
    ViewTypeDefinition,
};

type EntityIndex<T> = HashMap<String, Vec<Arc<T>>>;

#[derive(Default)]
pub struct CapabilityRegistry {
    modules: RwLock<BTreeMap<String, Arc<ModuleDefinition>>>,
    actions: RwLock<EntityIndex<ActionDefinition>>,
    tabs: RwLock<EntityIndex<TabDefinition>>,
    view_types: RwLock<BTreeMap<String, Arc<ViewTypeDefinition>>>,
    detail_components: RwLock<BTreeMap<String, Arc<DetailComponentDefinition>>>,
}

impl CapabilityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ---- writes (reached through RegisterCtx) ----

    pub(crate) fn register_module(&self, def: ModuleDefinition) {
        tracing::debug!(module = %def.id, version = %def.version, "registry: module");
        self.modules.write().insert(def.id.clone(), Arc::new(def));
    }

    pub(crate) fn register_action(&self, def: ActionDefinition) {
        if def.entity_types.is_empty() {
            tracing::warn!(id = %def.id, "registry: action has no entity types");
        }
        let def = Arc::new(def);
        let mut index = self.actions.write();
        fan_out(&mut index, &def, &def.id, &def.entity_types, "action", |a| &a.id);
    }

    pub(crate) fn register_tab(&self, def: TabDefinition) {
        if def.entity_types.is_empty() {
            tracing::warn!(id = %def.id, "registry: tab has no entity types");
        }
        let def = Arc::new(def);
        let mut index = self.tabs.write();
        fan_out(&mut index, &def, &def.id, &def.entity_types, "tab", |t| &t.id);
    }

    pub(crate) fn register_view_type(&self, def: ViewTypeDefinition) {
        tracing::debug!(view_type = %def.id, "registry: view type");
        self.view_types.write().insert(def.id.clone(), Arc::new(def));
    }

    pub(crate) fn register_detail_component(&self, def: DetailComponentDefinition) {
        tracing::debug!(detail_component = %def.id, "registry: detail component");
        self.detail_components
            .write()
            .insert(def.id.clone(), Arc::new(def));
    }

    // ---- reads ----

    #[must_use]
    pub fn get_module(&self, id: &str) -> Option<Arc<ModuleDefinition>> {
        self.modules.read().get(id).cloned()
    }

    /// All registered modules, ordered by id.
    #[must_use]
    pub fn get_all_modules(&self) -> Vec<Arc<ModuleDefinition>> {
        self.modules.read().values().cloned().collect()
    }

    /// Actions for an entity type in registration order.
    ///
    /// `Row` and `Global` keep actions placed there or at `Both`; `None` or
    /// `Some(Both)` returns every action.
    #[must_use]
    pub fn get_actions_for_entity(
        &self,
        entity_type: &str,
        position: Option<ActionPosition>,
    ) -> Vec<Arc<ActionDefinition>> {
        let requested = position.unwrap_or(ActionPosition::Both);
        self.actions
            .read()
            .get(entity_type)
            .map(|list| {
                list.iter()
                    .filter(|a| a.position.satisfies(requested))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tabs for an entity type sorted by `order` (missing = 0); ties keep
    /// registration order.
    #[must_use]
    pub fn get_tabs_for_entity(&self, entity_type: &str) -> Vec<Arc<TabDefinition>> {
        let mut tabs = self
            .tabs
            .read()
            .get(entity_type)
            .cloned()
            .unwrap_or_default();
        // stable
        tabs.sort_by_key(|t| t.sort_key());
        tabs
    }

    #[must_use]
    pub fn get_view_type(&self, id: &str) -> Option<Arc<ViewTypeDefinition>> {
        self.view_types.read().get(id).cloned()
    }

    #[must_use]
    pub fn get_all_view_types(&self) -> Vec<Arc<ViewTypeDefinition>> {
        self.view_types.read().values().cloned().collect()
    }

    #[must_use]
    pub fn get_detail_component(&self, id: &str) -> Option<Arc<DetailComponentDefinition>> {
        self.detail_components.read().get(id).cloned()
    }

    /// Every entity type that has at least one action or tab, sorted.
    #[must_use]
    pub fn entity_types(&self) -> Vec<String> {
        let mut all: BTreeSet<String> = self.actions.read().keys().cloned().collect();
        all.extend(self.tabs.read().keys().cloned());
        all.into_iter().collect()
    }
}

fn fan_out<T>(
    index: &mut EntityIndex<T>,
    def: &Arc<T>,
    id: &str,
    entity_types: &[String],
    kind: &'static str,
    id_of: impl Fn(&T) -> &String,
) {
    for entity_type in entity_types {
        let list = index.entry(entity_type.clone()).or_default();
        if list.iter().any(|existing| id_of(&**existing) == id) {
            tracing::trace!(kind, id, entity_type = %entity_type, "registry: duplicate ignored");
            continue;
        }
        tracing::debug!(kind, id, entity_type = %entity_type, "registry: added");
        list.push(def.clone());
    }
}
