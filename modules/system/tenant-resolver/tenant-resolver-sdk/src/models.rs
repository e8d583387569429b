//! Tenant configuration model and raw backing-store records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque JSON object used for app settings.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Language used when neither the tenant nor the system names one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Color scheme the theme engine should start in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

/// Tenant branding handed to the theme engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    /// Named palette colors, e.g. `primary -> "#1a73e8"`.
    pub palette: BTreeMap<String, String>,
    /// Overrides applied on top of the palette in light mode.
    pub light: Option<serde_json::Value>,
    /// Overrides applied on top of the palette in dark mode.
    pub dark: Option<serde_json::Value>,
    pub logo_url: Option<String>,
    pub logo_dark_url: Option<String>,
    pub brand_name: Option<String>,
}

/// Fully hydrated tenant configuration.
///
/// Produced once per host resolution and shared behind an `Arc`; a
/// re-resolution yields a new value instead of mutating this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub subdomain: String,
    /// `None` for portal configurations that are not backed by an organization.
    pub organization_id: Option<Uuid>,
    pub organization_name: String,
    pub enabled_modules: BTreeSet<String>,
    /// Module id to an opaque configuration object only that module interprets.
    pub module_config: BTreeMap<String, serde_json::Value>,
    pub theme_config: ThemeConfig,
    /// Preference order matters for fallback.
    pub enabled_languages: Vec<String>,
    pub default_language: String,
    pub is_demo: bool,
    pub is_login_portal: bool,
    pub is_hub: bool,
    pub details: serde_json::Value,
    pub app_settings: JsonObject,
}

impl TenantConfig {
    /// Whether the tenant activates the module.
    #[must_use]
    pub fn is_module_enabled(&self, module_id: &str) -> bool {
        self.enabled_modules.contains(module_id)
    }

    /// Configuration slice for a module; an empty object when absent.
    #[must_use]
    pub fn module_config_for(&self, module_id: &str) -> serde_json::Value {
        self.module_config
            .get(module_id)
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Object(JsonObject::new()))
    }

    /// Single top-level field by its serialized name (e.g. `"default_language"`).
    #[must_use]
    pub fn field(&self, key: &str) -> Option<serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => map.remove(key),
            _ => None,
        }
    }

    /// Deduplicate `enabled_languages` (first occurrence wins) and make
    /// `default_language` one of them when the list is non-empty.
    ///
    /// Returns the replaced default language, if it had to change.
    pub fn normalize_languages(&mut self) -> Option<String> {
        let mut seen = BTreeSet::new();
        self.enabled_languages
            .retain(|lang| seen.insert(lang.clone()));

        let first = self.enabled_languages.first()?;
        if self.enabled_languages.contains(&self.default_language) {
            return None;
        }
        Some(std::mem::replace(&mut self.default_language, first.clone()))
    }
}

/// Organization record as stored in the backing store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizationRecord {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    /// Module flags; `false` explicitly disables a module the system enables.
    pub modules: BTreeMap<String, bool>,
    pub module_config: BTreeMap<String, serde_json::Value>,
    /// Raw theme JSON, merged over the system theme.
    pub theme: serde_json::Value,
    pub languages: Vec<String>,
    pub default_language: Option<String>,
    pub app_settings: JsonObject,
    pub details: serde_json::Value,
    pub is_demo: bool,
}

/// System-wide configuration every tenant inherits from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemDefaults {
    pub modules: BTreeMap<String, bool>,
    pub module_config: BTreeMap<String, serde_json::Value>,
    pub theme: serde_json::Value,
    pub languages: Vec<String>,
    pub default_language: Option<String>,
    pub app_settings: JsonObject,
}
