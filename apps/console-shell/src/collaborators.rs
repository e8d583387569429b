//! Headless stand-ins for the translation and theme engines.

use async_trait::async_trait;
use shellkit_bootstrap::{I18nClient, ThemeClient};
use tenant_resolver_sdk::ThemeConfig;

pub struct TracingI18n;

#[async_trait]
impl I18nClient for TracingI18n {
    async fn init(&self, languages: &[String], default_language: &str) -> anyhow::Result<()> {
        tracing::info!(?languages, default_language, "Translations initialized");
        Ok(())
    }
}

pub struct TracingTheme;

impl ThemeClient for TracingTheme {
    fn apply(&self, theme: &ThemeConfig) -> anyhow::Result<()> {
        if let Some((name, color)) = theme.palette.iter().find(|(_, c)| !c.starts_with('#')) {
            anyhow::bail!("palette color '{name}' is not a hex value: {color}");
        }
        tracing::info!(
            mode = ?theme.mode,
            brand = theme.brand_name.as_deref().unwrap_or_default(),
            colors = theme.palette.len(),
            "Theme applied"
        );
        Ok(())
    }
}
