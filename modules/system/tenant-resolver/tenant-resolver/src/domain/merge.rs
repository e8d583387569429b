//! Building a `TenantConfig` from backing-store records.
//!
//! Tenant values win on collision; anything the tenant leaves unspecified
//! falls back to the system defaults. Objects merge recursively, every other
//! value (arrays included) is replaced as a whole, and an explicit `null`
//! in the tenant record does not erase a system value.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tenant_resolver_sdk::{
    DEFAULT_LANGUAGE, JsonObject, OrganizationRecord, SystemDefaults, TenantConfig, ThemeConfig,
};

use super::error::DomainError;
use super::host::HostKind;
use crate::config::PortalProfile;

/// Recursively merge `overlay` into `base`.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None if value.is_null() => {}
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

fn merged(base: &Value, overlay: &Value) -> Value {
    let mut out = base.clone();
    deep_merge(&mut out, overlay);
    out
}

fn merge_objects(base: &JsonObject, overlay: &JsonObject) -> JsonObject {
    match merged(&Value::Object(base.clone()), &Value::Object(overlay.clone())) {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

fn enabled_modules(system: &BTreeMap<String, bool>, tenant: &BTreeMap<String, bool>) -> BTreeSet<String> {
    let mut flags = system.clone();
    flags.extend(tenant.iter().map(|(k, v)| (k.clone(), *v)));
    flags
        .into_iter()
        .filter_map(|(id, enabled)| enabled.then_some(id))
        .collect()
}

fn module_config(
    system: &BTreeMap<String, Value>,
    tenant: &BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    let mut out = system.clone();
    for (id, slice) in tenant {
        out.entry(id.clone())
            .and_modify(|existing| deep_merge(existing, slice))
            .or_insert_with(|| slice.clone());
    }
    out
}

fn theme(subdomain: &str, system: &Value, overlay: &Value) -> Result<ThemeConfig, DomainError> {
    match merged(system, overlay) {
        Value::Null => Ok(ThemeConfig::default()),
        value => serde_json::from_value(value).map_err(|e| DomainError::InvalidRecord {
            subdomain: subdomain.to_owned(),
            reason: format!("theme: {e}"),
        }),
    }
}

fn finish_languages(config: &mut TenantConfig) {
    if let Some(previous) = config.normalize_languages() {
        tracing::warn!(
            subdomain = %config.subdomain,
            previous = %previous,
            default_language = %config.default_language,
            "Default language not enabled; using first enabled language"
        );
    }
}

/// Organization record merged over the system defaults.
///
/// # Errors
/// Returns `DomainError::InvalidRecord` if the merged theme does not parse.
pub fn tenant_config(
    subdomain: &str,
    org: &OrganizationRecord,
    system: &SystemDefaults,
) -> Result<TenantConfig, DomainError> {
    let enabled_languages = if org.languages.is_empty() {
        system.languages.clone()
    } else {
        org.languages.clone()
    };
    let default_language = org
        .default_language
        .clone()
        .or_else(|| system.default_language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());

    let mut config = TenantConfig {
        subdomain: subdomain.to_owned(),
        organization_id: Some(org.id),
        organization_name: org.name.clone(),
        enabled_modules: enabled_modules(&system.modules, &org.modules),
        module_config: module_config(&system.module_config, &org.module_config),
        theme_config: theme(subdomain, &system.theme, &org.theme)?,
        enabled_languages,
        default_language,
        is_demo: org.is_demo,
        is_login_portal: false,
        is_hub: false,
        details: org.details.clone(),
        app_settings: merge_objects(&system.app_settings, &org.app_settings),
    };
    finish_languages(&mut config);
    Ok(config)
}

/// Portal configuration: system defaults adjusted by the portal profile.
///
/// # Errors
/// Returns `DomainError::InvalidRecord` if the merged theme does not parse.
pub fn portal_config(
    kind: &HostKind,
    profile: &PortalProfile,
    system: &SystemDefaults,
) -> Result<TenantConfig, DomainError> {
    let subdomain = kind.subdomain();
    let enabled_modules = profile
        .enabled_modules
        .clone()
        .unwrap_or_else(|| enabled_modules(&system.modules, &BTreeMap::new()));

    let mut config = TenantConfig {
        subdomain: subdomain.to_owned(),
        organization_id: None,
        organization_name: profile.name.clone(),
        enabled_modules,
        module_config: system.module_config.clone(),
        theme_config: theme(
            subdomain,
            &system.theme,
            profile.theme.as_ref().unwrap_or(&Value::Null),
        )?,
        enabled_languages: system.languages.clone(),
        default_language: system
            .default_language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
        is_demo: false,
        is_login_portal: matches!(kind, HostKind::AuthPortal(_)),
        is_hub: matches!(kind, HostKind::HubPortal(_)),
        details: Value::Null,
        app_settings: system.app_settings.clone(),
    };
    finish_languages(&mut config);
    Ok(config)
}
