//! Capabilities the bootstrap drives but does not implement.

use async_trait::async_trait;
use tenant_resolver_sdk::ThemeConfig;

/// Translation loading for the tenant's languages.
#[async_trait]
pub trait I18nClient: Send + Sync {
    /// Load base translations for `languages`, with `default_language` active.
    ///
    /// # Errors
    /// Any failure aborts the bootstrap.
    async fn init(&self, languages: &[String], default_language: &str) -> anyhow::Result<()>;
}

/// Theme engine.
pub trait ThemeClient: Send + Sync {
    /// # Errors
    /// Any failure aborts the bootstrap.
    fn apply(&self, theme: &ThemeConfig) -> anyhow::Result<()>;
}
