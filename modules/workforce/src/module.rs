//! Workforce module registration.

use async_trait::async_trait;
use shellkit::{
    ActionDefinition, ActionPosition, ComponentRef, DetailComponentDefinition, ModuleDefinition,
    ModuleManifestEntry, RegisterCtx, RegistrationModule, TabDefinition, ViewTypeDefinition,
};

use crate::components::{
    ClockInDialog, EmployeeDetail, ScheduleCalendar, TicketWorkload, TimelineView,
};
use crate::config::WorkforceConfig;

pub const MODULE_ID: &str = "workforce";

pub const EMPLOYEES: &str = "employees";

#[derive(Debug, Default)]
pub struct WorkforceModule;

/// Manifest row: requires core, works better with tickets.
#[must_use]
pub fn manifest_entry() -> ModuleManifestEntry {
    ModuleManifestEntry::eager::<WorkforceModule>(MODULE_ID)
        .depends_on(["core"])
        .optionally_depends_on(["tickets"])
}

#[async_trait]
impl RegistrationModule for WorkforceModule {
    async fn register(&self, ctx: &RegisterCtx) -> anyhow::Result<()> {
        let cfg: WorkforceConfig = ctx.config()?;

        ctx.register_module(
            ModuleDefinition::new(MODULE_ID, "Workforce", env!("CARGO_PKG_VERSION"))
                .with_description("Schedules and time tracking"),
        );

        ctx.register_view_type(
            ViewTypeDefinition::new(
                "timeline",
                "Timeline",
                ComponentRef::of::<TimelineView>("workforce/timeline"),
            )
            .with_icon("timeline"),
        );

        ctx.register_tab(
            TabDefinition::new(
                "schedule",
                "Schedule",
                ComponentRef::of::<ScheduleCalendar>("workforce/schedule"),
            )
            .for_entities([EMPLOYEES])
            .with_order(10)
            .with_icon("calendar"),
        );
        if cfg.ticket_workload {
            ctx.register_tab(
                TabDefinition::new(
                    "workload",
                    "Assigned tickets",
                    ComponentRef::of::<TicketWorkload>("workforce/workload"),
                )
                .for_entities([EMPLOYEES])
                .with_order(20),
            );
        }

        if !cfg.disable_clock_in {
            ctx.register_action(
                ActionDefinition::new(
                    "clock-in",
                    "Clock in",
                    ComponentRef::of::<ClockInDialog>("workforce/clock-in"),
                )
                .for_entities([EMPLOYEES])
                .at(ActionPosition::Both)
                .with_icon("clock"),
            );
        }

        ctx.register_detail_component(DetailComponentDefinition::new(
            EMPLOYEES,
            ComponentRef::of::<EmployeeDetail>("workforce/employee"),
        ));

        tracing::debug!(
            clock_in = !cfg.disable_clock_in,
            ticket_workload = cfg.ticket_workload,
            "Workforce capabilities registered"
        );
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;
    use shellkit::{CapabilityRegistry, LoadReport, ModuleLoader, ModuleManifest};
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use tenant_resolver_sdk::TenantConfig;

    async fn load_with(slice: serde_json::Value) -> (Arc<CapabilityRegistry>, LoadReport) {
        let registry = Arc::new(CapabilityRegistry::new());
        let manifest = ModuleManifest::builder()
            .with(manifest_entry())
            .unwrap()
            .build();
        let loader = ModuleLoader::new(Arc::new(manifest), registry.clone());
        let tenant = TenantConfig {
            subdomain: "acme".to_owned(),
            enabled_modules: BTreeSet::from([MODULE_ID.to_owned()]),
            module_config: [(MODULE_ID.to_owned(), slice)].into(),
            ..TenantConfig::default()
        };
        let report = loader.load_modules(&tenant).await;
        (registry, report)
    }

    async fn registry_for(slice: serde_json::Value) -> Arc<CapabilityRegistry> {
        let (registry, report) = load_with(slice).await;
        assert_eq!(report.loaded_ids(), vec![MODULE_ID]);
        registry
    }

    #[tokio::test]
    async fn clock_in_shows_in_both_positions() {
        let registry = registry_for(json!({})).await;

        for position in [ActionPosition::Row, ActionPosition::Global] {
            let actions = registry.get_actions_for_entity(EMPLOYEES, Some(position));
            assert_eq!(actions.len(), 1);
            assert_eq!(actions[0].id, "clock-in");
        }
        assert!(registry.get_view_type("timeline").is_some());
        assert!(registry.get_detail_component(EMPLOYEES).is_some());
        assert_eq!(registry.get_tabs_for_entity(EMPLOYEES).len(), 1);
    }

    #[tokio::test]
    async fn slice_controls_optional_capabilities() {
        let registry =
            registry_for(json!({"disable_clock_in": true, "ticket_workload": true})).await;

        assert!(registry.get_actions_for_entity(EMPLOYEES, None).is_empty());
        let tabs = registry.get_tabs_for_entity(EMPLOYEES);
        let ids: Vec<&str> = tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["schedule", "workload"]);
    }

    #[test]
    fn disabled_optional_tickets_is_not_an_issue() {
        let manifest = ModuleManifest::builder()
            .with(core_module::manifest_entry())
            .unwrap()
            .with(tickets_module::manifest_entry())
            .unwrap()
            .with(manifest_entry())
            .unwrap()
            .build();
        assert_eq!(manifest.optional_dependencies_of(MODULE_ID), ["tickets"]);

        let enabled = BTreeSet::from(["core".to_owned(), MODULE_ID.to_owned()]);
        assert!(manifest.dependency_issues(&enabled).is_empty());

        let enabled = BTreeSet::from([MODULE_ID.to_owned()]);
        let issues = manifest.dependency_issues(&enabled);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().contains("requires 'core'"));
    }
}
