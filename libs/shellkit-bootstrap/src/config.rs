//! Application configuration.
//!
//! Layered with figment: 1) defaults -> 2) YAML file (if provided) ->
//! 3) environment (`APP__*`, `__` separates nesting levels).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use shellkit::config::ConfigProvider;

use crate::logging::LoggingConfig;

/// Environment prefix for overrides, e.g. `APP__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,

    /// Per-module sections: `modules.<name>.config`.
    pub modules: BTreeMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Load layered configuration.
    ///
    /// # Errors
    /// Returns an error if the file is missing or unreadable, or the merged
    /// configuration does not match `AppConfig`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }

    /// Extract from an already layered figment.
    ///
    /// # Errors
    /// Returns an error if the figment does not match `AppConfig`.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        figment
            .extract::<Self>()
            .context("failed to load application configuration")
    }

    /// Sorted names of configured modules.
    #[must_use]
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Effective configuration as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}

impl ConfigProvider for AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.modules.get(module_name)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()));
        let cfg = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.modules.is_empty());
    }

    #[test]
    fn yaml_file_layers_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r"
logging:
  format: json
modules:
  tenant_resolver:
    config:
      base_domains: [example.com]
      cache_ttl: 2m
"
        )
        .unwrap();

        let cfg = AppConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.module_names(), vec!["tenant_resolver"]);
        assert_eq!(
            cfg.get_module_config("tenant_resolver"),
            Some(&json!({"config": {"base_domains": ["example.com"], "cache_ttl": "2m"}}))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load_or_default(Some(Path::new("/nonexistent/shell.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Serialized::default("sever", json!({"port": 1})));
        assert!(AppConfig::from_figment(&figment).is_err());
    }
}
