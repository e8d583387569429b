//! Module loader.
//!
//! Given a resolved tenant, fires every enabled manifest module concurrently
//! and waits for all of them to settle. A failing or panicking module is
//! reported in the [`LoadReport`] and never affects its siblings.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::join_all;
use tenant_resolver_sdk::TenantConfig;

use crate::context::RegisterCtx;
use crate::manifest::{ModuleLoaderFn, ModuleManifest};
use crate::registry::CapabilityRegistry;

#[derive(thiserror::Error, Debug)]
pub enum ModuleLoadError {
    #[error("loading module '{module}' failed")]
    Loader {
        module: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("module '{module}' failed to register")]
    Register {
        module: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("module '{module}' panicked: {message}")]
    Panicked { module: String, message: String },
}

impl ModuleLoadError {
    #[must_use]
    pub fn module(&self) -> &str {
        match self {
            Self::Loader { module, .. }
            | Self::Register { module, .. }
            | Self::Panicked { module, .. } => module,
        }
    }
}

/// Settled result of one module's load-and-register attempt.
#[derive(Debug)]
pub struct ModuleLoadOutcome {
    pub module_id: String,
    pub elapsed: Duration,
    pub result: Result<(), ModuleLoadError>,
}

impl ModuleLoadOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything one load pass did, in manifest id order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub outcomes: Vec<ModuleLoadOutcome>,
    /// Enabled ids the manifest does not know.
    pub skipped: Vec<String>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ModuleLoadOutcome> {
        self.outcomes.iter().filter(|o| o.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ModuleLoadOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    #[must_use]
    pub fn loaded_ids(&self) -> Vec<&str> {
        self.succeeded().map(|o| o.module_id.as_str()).collect()
    }
}

pub struct ModuleLoader {
    manifest: Arc<ModuleManifest>,
    registry: Arc<CapabilityRegistry>,
}

impl ModuleLoader {
    #[must_use]
    pub fn new(manifest: Arc<ModuleManifest>, registry: Arc<CapabilityRegistry>) -> Self {
        Self { manifest, registry }
    }

    #[inline]
    #[must_use]
    pub fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        &self.registry
    }

    /// Load and register every enabled module known to the manifest.
    ///
    /// All modules are started before any is awaited; the call returns once
    /// every attempt has settled. Never fails as a whole.
    pub async fn load_modules(&self, config: &TenantConfig) -> LoadReport {
        let started = Instant::now();

        let mut skipped = Vec::new();
        let mut planned = Vec::new();
        for id in &config.enabled_modules {
            match self.manifest.loader_for(id) {
                Some(load) => planned.push((id.clone(), load)),
                None => {
                    tracing::debug!(module = %id, "Module not in manifest, skipping");
                    skipped.push(id.clone());
                }
            }
        }

        for issue in self.manifest.dependency_issues(&config.enabled_modules) {
            tracing::warn!(subdomain = %config.subdomain, %issue, "Module dependency issue");
        }

        tracing::info!(
            subdomain = %config.subdomain,
            modules = planned.len(),
            skipped = skipped.len(),
            "Phase: load modules"
        );

        let outcomes = join_all(
            planned
                .iter()
                .map(|(id, load)| self.load_one(id.clone(), load, config.module_config_for(id))),
        )
        .await;

        let report = LoadReport {
            outcomes,
            skipped,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            subdomain = %config.subdomain,
            loaded = report.succeeded().count(),
            failed = report.failed().count(),
            elapsed_ms = duration_ms(report.elapsed),
            "Module load pass complete"
        );
        report
    }

    async fn load_one(
        &self,
        id: String,
        load: &ModuleLoaderFn,
        slice: serde_json::Value,
    ) -> ModuleLoadOutcome {
        let started = Instant::now();
        let ctx = RegisterCtx::new(id.as_str(), slice, Arc::clone(&self.registry));

        let attempt = AssertUnwindSafe(async {
            let module = load().await.map_err(|source| ModuleLoadError::Loader {
                module: id.clone(),
                source,
            })?;
            module
                .register(&ctx)
                .await
                .map_err(|source| ModuleLoadError::Register {
                    module: id.clone(),
                    source,
                })
        })
        .catch_unwind()
        .await;

        let result = attempt.unwrap_or_else(|payload| {
            Err(ModuleLoadError::Panicked {
                module: id.clone(),
                message: panic_message(payload.as_ref()),
            })
        });

        let elapsed = started.elapsed();
        match &result {
            Ok(()) => {
                tracing::info!(module = %id, elapsed_ms = duration_ms(elapsed), "Module registered");
            }
            Err(e) => {
                tracing::error!(
                    module = %id,
                    elapsed_ms = duration_ms(elapsed),
                    error = ?e,
                    "Module failed to load"
                );
            }
        }

        ModuleLoadOutcome {
            module_id: id,
            elapsed,
            result,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
