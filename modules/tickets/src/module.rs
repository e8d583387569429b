//! Tickets module registration.

use async_trait::async_trait;
use shellkit::{
    ActionDefinition, ActionPosition, ComponentRef, DetailComponentDefinition, ModuleDefinition,
    ModuleManifestEntry, RegisterCtx, RegistrationModule, TabDefinition,
};

use crate::components::{
    AssignDialog, CloseDialog, CreateTicketDialog, SlaBoard, TicketDetail, TicketList,
};
use crate::config::TicketsConfig;

pub const MODULE_ID: &str = "tickets";

/// Entity type owned by this module.
pub const TICKETS: &str = "tickets";
const CUSTOMERS: &str = "customers";

#[derive(Debug, Default)]
pub struct TicketsModule;

/// Manifest row: tickets builds on the core views.
#[must_use]
pub fn manifest_entry() -> ModuleManifestEntry {
    ModuleManifestEntry::eager::<TicketsModule>(MODULE_ID).depends_on(["core"])
}

#[async_trait]
impl RegistrationModule for TicketsModule {
    async fn register(&self, ctx: &RegisterCtx) -> anyhow::Result<()> {
        let cfg: TicketsConfig = ctx.config()?;

        ctx.register_module(
            ModuleDefinition::new(MODULE_ID, "Tickets", env!("CARGO_PKG_VERSION"))
                .with_description("Support tickets"),
        );

        ctx.register_tab(
            TabDefinition::new(
                "tickets",
                "Tickets",
                ComponentRef::of::<TicketList>("tickets/list"),
            )
            .for_entities([TICKETS, CUSTOMERS])
            .with_order(10)
            .with_icon("ticket"),
        );
        if cfg.sla_tab {
            ctx.register_tab(
                TabDefinition::new("sla", "SLA", ComponentRef::of::<SlaBoard>("tickets/sla"))
                    .for_entities([TICKETS])
                    .with_order(20),
            );
        }

        ctx.register_action(
            ActionDefinition::new(
                "assign",
                "Assign",
                ComponentRef::of::<AssignDialog>("tickets/assign"),
            )
            .for_entities([TICKETS])
            .at(ActionPosition::Row)
            .with_icon("user-plus"),
        );
        if cfg.allow_close {
            ctx.register_action(
                ActionDefinition::new(
                    "close",
                    "Close",
                    ComponentRef::of::<CloseDialog>("tickets/close"),
                )
                .for_entities([TICKETS])
                .at(ActionPosition::Row),
            );
        }
        ctx.register_action(
            ActionDefinition::new(
                "create-ticket",
                "New ticket",
                ComponentRef::of::<CreateTicketDialog>("tickets/create"),
            )
            .for_entities([TICKETS, CUSTOMERS])
            .at(ActionPosition::Global)
            .with_icon("plus"),
        );

        ctx.register_detail_component(DetailComponentDefinition::new(
            TICKETS,
            ComponentRef::of::<TicketDetail>("tickets/detail"),
        ));

        tracing::debug!(
            allow_close = cfg.allow_close,
            sla_tab = cfg.sla_tab,
            "Tickets capabilities registered"
        );
        Ok(())
    }
}
