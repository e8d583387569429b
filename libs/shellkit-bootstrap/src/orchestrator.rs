//! Bootstrap orchestrator.
//!
//! `idle -> resolving -> loading_i18n -> loading_modules -> applying_theme -> ready`,
//! with `error` reachable from every non-ready phase. Phases run strictly in
//! sequence; the only recovery from `error` is a full restart via [`Bootstrap::retry`].
//!
//! A `Bootstrap` is bound to the first host it mounts. Its registry only ever
//! holds capabilities of that tenant's modules; another host needs a new `Bootstrap`.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use shellkit::{CapabilityRegistry, LoadReport, ModuleLoader, ModuleManifest};
use tenant_resolver_sdk::{TenantConfig, TenantResolverClient, TenantResolverError};
use tokio::sync::{Mutex, watch};

use crate::collaborators::{I18nClient, ThemeClient};
use crate::handle::TenantHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapPhase {
    #[default]
    Idle,
    Resolving,
    LoadingI18n,
    LoadingModules,
    ApplyingTheme,
    Ready,
    Error,
}

impl BootstrapPhase {
    /// `ready` and `error` are the only settled phases.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Ready | Self::Error)
    }
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::LoadingI18n => "loading_i18n",
            Self::LoadingModules => "loading_modules",
            Self::ApplyingTheme => "applying_theme",
            Self::Ready => "ready",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// What handles observe.
#[derive(Debug, Clone, Default)]
pub struct BootstrapStatus {
    pub phase: BootstrapPhase,
    pub host: Option<String>,
    /// Set once resolution succeeds.
    pub config: Option<Arc<TenantConfig>>,
    /// Retained message while in `error`.
    pub error: Option<String>,
    /// Set once the module pass settles.
    pub report: Option<Arc<LoadReport>>,
}

#[derive(thiserror::Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Resolve(#[from] TenantResolverError),
    #[error("failed to load translations: {0:#}")]
    I18n(anyhow::Error),
    #[error("failed to apply theme: {0:#}")]
    Theme(anyhow::Error),
    #[error("retry is only possible from the error phase (current: {phase})")]
    NotRetryable { phase: BootstrapPhase },
    #[error("bootstrap is bound to host '{mounted}', cannot mount '{requested}'")]
    HostMismatch { mounted: String, requested: String },
}

/// Sequences tenant resolution, translations, module loading and theming.
pub struct Bootstrap {
    resolver: Arc<dyn TenantResolverClient>,
    i18n: Arc<dyn I18nClient>,
    theme: Arc<dyn ThemeClient>,
    loader: ModuleLoader,
    status: watch::Sender<BootstrapStatus>,
    run_lock: Mutex<()>,
}

impl Bootstrap {
    #[must_use]
    pub fn new(
        resolver: Arc<dyn TenantResolverClient>,
        i18n: Arc<dyn I18nClient>,
        theme: Arc<dyn ThemeClient>,
        manifest: Arc<ModuleManifest>,
        registry: Arc<CapabilityRegistry>,
    ) -> Self {
        let (status, _) = watch::channel(BootstrapStatus::default());
        Self {
            resolver,
            i18n,
            theme,
            loader: ModuleLoader::new(manifest, registry),
            status,
            run_lock: Mutex::new(()),
        }
    }

    /// A read-only view that follows every phase change.
    #[must_use]
    pub fn handle(&self) -> TenantHandle {
        TenantHandle::new(self.status.subscribe(), self.loader.registry().clone())
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        self.loader.registry()
    }

    #[must_use]
    pub fn status(&self) -> BootstrapStatus {
        self.status.borrow().clone()
    }

    /// Bootstrap for `host`.
    ///
    /// A host that is already `ready` returns its config without re-running.
    ///
    /// # Errors
    /// `HostMismatch` if a different host was mounted before; the status is
    /// left untouched. Otherwise resolution, translation and theme failures,
    /// which move the status to `error`.
    pub async fn mount(&self, host: &str) -> Result<Arc<TenantConfig>, BootstrapError> {
        let _guard = self.run_lock.lock().await;

        if let Some(mounted) = self.mounted_host().filter(|mounted| mounted != host) {
            tracing::warn!(mounted = %mounted, requested = host, "Rejecting mount of a second host");
            return Err(BootstrapError::HostMismatch {
                mounted,
                requested: host.to_owned(),
            });
        }
        if let Some(config) = self.ready_config_for(host) {
            tracing::debug!(host, "Bootstrap already ready for host");
            return Ok(config);
        }
        self.run(host).await
    }

    /// Restart from `idle` with the host that failed.
    ///
    /// # Errors
    /// `NotRetryable` unless the current phase is `error`; otherwise as [`Self::mount`].
    pub async fn retry(&self) -> Result<Arc<TenantConfig>, BootstrapError> {
        let _guard = self.run_lock.lock().await;

        let (phase, host) = {
            let status = self.status.borrow();
            (status.phase, status.host.clone())
        };
        match (phase, host) {
            (BootstrapPhase::Error, Some(host)) => {
                tracing::info!(host = %host, "Retrying bootstrap");
                self.run(&host).await
            }
            (phase, _) => Err(BootstrapError::NotRetryable { phase }),
        }
    }

    fn mounted_host(&self) -> Option<String> {
        self.status.borrow().host.clone()
    }

    fn ready_config_for(&self, host: &str) -> Option<Arc<TenantConfig>> {
        let status = self.status.borrow();
        match (&status.phase, &status.host, &status.config) {
            (BootstrapPhase::Ready, Some(current), Some(config)) if current == host => {
                Some(config.clone())
            }
            _ => None,
        }
    }

    fn enter(&self, phase: BootstrapPhase) {
        tracing::debug!(%phase, "Bootstrap phase");
        self.status.send_modify(|s| s.phase = phase);
    }

    fn fail(&self, err: BootstrapError) -> BootstrapError {
        let phase = self.status.borrow().phase;
        tracing::error!(%phase, error = %err, "Bootstrap failed");
        self.status.send_modify(|s| {
            s.phase = BootstrapPhase::Error;
            s.error = Some(err.to_string());
        });
        err
    }

    async fn run(&self, host: &str) -> Result<Arc<TenantConfig>, BootstrapError> {
        let started = Instant::now();
        self.status.send_replace(BootstrapStatus {
            host: Some(host.to_owned()),
            ..BootstrapStatus::default()
        });

        self.enter(BootstrapPhase::Resolving);
        let config = match self.resolver.resolve(host).await {
            Ok(config) => config,
            Err(e) => return Err(self.fail(e.into())),
        };
        self.status.send_modify(|s| s.config = Some(config.clone()));

        self.enter(BootstrapPhase::LoadingI18n);
        if let Err(e) = self
            .i18n
            .init(&config.enabled_languages, &config.default_language)
            .await
        {
            return Err(self.fail(BootstrapError::I18n(e)));
        }

        self.enter(BootstrapPhase::LoadingModules);
        let report = Arc::new(self.loader.load_modules(&config).await);
        self.status.send_modify(|s| s.report = Some(report.clone()));

        self.enter(BootstrapPhase::ApplyingTheme);
        if let Err(e) = self.theme.apply(&config.theme_config) {
            return Err(self.fail(BootstrapError::Theme(e)));
        }

        self.enter(BootstrapPhase::Ready);
        tracing::info!(
            host,
            subdomain = %config.subdomain,
            loaded = report.succeeded().count(),
            failed = report.failed().count(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Bootstrap ready"
        );
        Ok(config)
    }
}
