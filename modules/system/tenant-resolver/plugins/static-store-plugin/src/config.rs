//! Configuration for the static tenant store plugin.

use serde::{Deserialize, Serialize};
use tenant_resolver_sdk::{OrganizationRecord, SystemDefaults};

/// Plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticStorePluginConfig {
    /// Defaults every organization inherits from.
    pub system: SystemDefaults,

    /// Static organization definitions, matched by `subdomain`.
    pub organizations: Vec<OrganizationRecord>,
}
