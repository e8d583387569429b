use serde::Deserialize;

/// Tenant slice for the tickets module.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TicketsConfig {
    /// Offer the `close` row action.
    pub allow_close: bool,
    /// Add the SLA tab to tickets.
    pub sla_tab: bool,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            allow_close: true,
            sla_tab: false,
        }
    }
}
