//! Core module registration.

use async_trait::async_trait;
use shellkit::{
    ActionDefinition, ActionPosition, ComponentRef, ModuleDefinition, ModuleManifestEntry,
    RegisterCtx, RegistrationModule, TabDefinition, ViewTypeDefinition,
};

use crate::components::{ActivityFeed, CalendarView, KanbanView, RefreshAction, TableView};
use crate::config::CoreConfig;

pub const MODULE_ID: &str = "core";

/// Activity comes after every module-specific tab.
const ACTIVITY_TAB_ORDER: i32 = 100;

#[derive(Debug, Default)]
pub struct CoreModule;

/// Manifest row for the core module.
#[must_use]
pub fn manifest_entry() -> ModuleManifestEntry {
    ModuleManifestEntry::eager::<CoreModule>(MODULE_ID)
}

#[async_trait]
impl RegistrationModule for CoreModule {
    async fn register(&self, ctx: &RegisterCtx) -> anyhow::Result<()> {
        let cfg: CoreConfig = ctx.config()?;

        ctx.register_module(
            ModuleDefinition::new(MODULE_ID, "Core", env!("CARGO_PKG_VERSION"))
                .with_description("Baseline views, actions and tabs"),
        );

        ctx.register_view_type(
            ViewTypeDefinition::new("table", "Table", ComponentRef::of::<TableView>("core/table"))
                .with_icon("table"),
        );
        ctx.register_view_type(
            ViewTypeDefinition::new(
                "calendar",
                "Calendar",
                ComponentRef::of::<CalendarView>("core/calendar"),
            )
            .with_icon("calendar"),
        );
        if cfg.kanban {
            ctx.register_view_type(
                ViewTypeDefinition::new(
                    "kanban",
                    "Board",
                    ComponentRef::of::<KanbanView>("core/kanban"),
                )
                .with_icon("columns"),
            );
        }

        ctx.register_action(
            ActionDefinition::new(
                "refresh",
                "Refresh",
                ComponentRef::of::<RefreshAction>("core/refresh"),
            )
            .for_entities(&cfg.entity_types)
            .at(ActionPosition::Global)
            .with_icon("refresh"),
        );

        if cfg.activity_tab {
            ctx.register_tab(
                TabDefinition::new(
                    "activity",
                    "Activity",
                    ComponentRef::of::<ActivityFeed>("core/activity"),
                )
                .for_entities(&cfg.entity_types)
                .with_order(ACTIVITY_TAB_ORDER)
                .with_icon("history"),
            );
        }

        tracing::debug!(
            entity_types = cfg.entity_types.len(),
            kanban = cfg.kanban,
            "Core capabilities registered"
        );
        Ok(())
    }
}
