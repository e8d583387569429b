//! Typed configuration access.
//!
//! Two sources feed typed configs:
//!
//! 1. **Host configuration** (`modules.<name>.config` in the app config file)
//!    for system modules such as the tenant resolver, read through a
//!    [`ConfigProvider`] either leniently ([`module_config_or_default`]) or
//!    strictly ([`module_config_required`]).
//! 2. **Tenant module slices** (`TenantConfig::module_config[id]`) handed to
//!    feature modules at registration and parsed with [`parse_module_slice`].

use serde::de::DeserializeOwned;

/// Configuration error for typed config operations
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("module '{module}' not found")]
    ModuleNotFound { module: String },
    #[error("module '{module}' config must be an object")]
    InvalidModuleStructure { module: String },
    #[error("missing 'config' section in module '{module}'")]
    MissingConfigSection { module: String },
    #[error("invalid config for module '{module}': {source}")]
    InvalidConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Lenient loader: missing module, non-object module value, or missing
/// `config` key all yield `T::default()`.
///
/// # Errors
/// Returns `ConfigError::InvalidConfig` if the config section exists but cannot be deserialized.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(section) = provider
        .get_module_config(module_name)
        .and_then(serde_json::Value::as_object)
        .and_then(|obj| obj.get("config"))
    else {
        return Ok(T::default());
    };

    decode(module_name, section)
}

/// Strict loader: the module, its object shape and its `config` key must exist.
///
/// # Errors
/// Returns `ConfigError` if the module is not found, has invalid structure, or config is invalid.
pub fn module_config_required<T: DeserializeOwned>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let obj = provider
        .get_module_config(module_name)
        .ok_or_else(|| ConfigError::ModuleNotFound {
            module: module_name.to_owned(),
        })?
        .as_object()
        .ok_or_else(|| ConfigError::InvalidModuleStructure {
            module: module_name.to_owned(),
        })?;

    let section = obj
        .get("config")
        .ok_or_else(|| ConfigError::MissingConfigSection {
            module: module_name.to_owned(),
        })?;

    decode(module_name, section)
}

/// Parse a tenant's configuration slice for a feature module.
///
/// `null` and `{}` both mean "nothing configured" and yield `T::default()`.
///
/// # Errors
/// Returns `ConfigError::InvalidConfig` if the slice does not match `T`.
pub fn parse_module_slice<T: DeserializeOwned + Default>(
    module_id: &str,
    slice: &serde_json::Value,
) -> Result<T, ConfigError> {
    match slice {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::Object(map) if map.is_empty() => Ok(T::default()),
        other => decode(module_id, other),
    }
}

fn decode<T: DeserializeOwned>(module: &str, value: &serde_json::Value) -> Result<T, ConfigError> {
    T::deserialize(value).map_err(|e| ConfigError::InvalidConfig {
        module: module.to_owned(),
        source: e,
    })
}
