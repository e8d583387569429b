use serde::Deserialize;

/// Tenant slice for the workforce module.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkforceConfig {
    /// Hide the `clock-in` action (e.g. badge-reader sites).
    pub disable_clock_in: bool,
    /// Add the assigned-tickets tab to employees.
    pub ticket_workload: bool,
}
