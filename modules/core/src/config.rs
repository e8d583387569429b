use serde::Deserialize;

/// Tenant slice for the core module.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Entity types that get the `refresh` action and the `activity` tab.
    pub entity_types: Vec<String>,
    pub activity_tab: bool,
    /// Register the `kanban` view type.
    pub kanban: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            entity_types: vec![
                "customers".to_owned(),
                "employees".to_owned(),
                "tickets".to_owned(),
            ],
            activity_tab: true,
            kanban: true,
        }
    }
}
