//! Read-only tenant view for the rest of the application.

use std::sync::Arc;

use shellkit::CapabilityRegistry;
use tenant_resolver_sdk::TenantConfig;
use tokio::sync::watch;

use crate::orchestrator::{BootstrapPhase, BootstrapStatus};

/// Point-in-time `{ config, loading }` view.
#[derive(Debug, Clone)]
pub struct TenantSnapshot {
    pub config: Option<Arc<TenantConfig>>,
    pub loading: bool,
}

/// Cheap to clone; every clone follows the same bootstrap.
#[derive(Clone)]
pub struct TenantHandle {
    rx: watch::Receiver<BootstrapStatus>,
    registry: Arc<CapabilityRegistry>,
}

impl TenantHandle {
    pub(crate) fn new(rx: watch::Receiver<BootstrapStatus>, registry: Arc<CapabilityRegistry>) -> Self {
        Self { rx, registry }
    }

    #[must_use]
    pub fn snapshot(&self) -> TenantSnapshot {
        let status = self.rx.borrow();
        TenantSnapshot {
            config: status.config.clone(),
            loading: !status.phase.is_settled(),
        }
    }

    #[must_use]
    pub fn status(&self) -> BootstrapStatus {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> BootstrapPhase {
        self.rx.borrow().phase
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase() == BootstrapPhase::Ready
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.rx.borrow().error.clone()
    }

    /// A named field of the resolved config, `None` before resolution.
    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<serde_json::Value> {
        self.rx.borrow().config.as_ref().and_then(|c| c.field(key))
    }

    /// `false` until a config is resolved.
    #[must_use]
    pub fn is_module_enabled(&self, module_id: &str) -> bool {
        self.rx
            .borrow()
            .config
            .as_ref()
            .is_some_and(|c| c.is_module_enabled(module_id))
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<CapabilityRegistry> {
        &self.registry
    }

    /// Wait until the bootstrap reaches `ready` or `error`.
    ///
    /// Returns the settled status, or the last seen one if the orchestrator
    /// was dropped.
    pub async fn wait_settled(&mut self) -> BootstrapStatus {
        let settled = self
            .rx
            .wait_for(|s| s.phase.is_settled())
            .await
            .map(|status| status.clone());
        settled.unwrap_or_else(|_| self.rx.borrow().clone())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn handle_with(status: BootstrapStatus) -> (watch::Sender<BootstrapStatus>, TenantHandle) {
        let (tx, rx) = watch::channel(status);
        (tx, TenantHandle::new(rx, Arc::new(CapabilityRegistry::new())))
    }

    #[test]
    fn idle_handle_is_loading_without_config() {
        let (_tx, handle) = handle_with(BootstrapStatus::default());
        let snap = handle.snapshot();
        assert!(snap.loading);
        assert!(snap.config.is_none());
        assert!(!handle.is_module_enabled("core"));
        assert_eq!(handle.config_value("subdomain"), None);
    }

    #[test]
    fn reads_follow_the_sender() {
        let (tx, handle) = handle_with(BootstrapStatus::default());
        let config = TenantConfig {
            subdomain: "acme".to_owned(),
            enabled_modules: BTreeSet::from(["core".to_owned()]),
            ..TenantConfig::default()
        };
        tx.send_modify(|s| {
            s.phase = BootstrapPhase::Ready;
            s.config = Some(Arc::new(config));
        });

        assert!(handle.is_ready());
        assert!(!handle.snapshot().loading);
        assert!(handle.is_module_enabled("core"));
        assert!(!handle.is_module_enabled("tickets"));
        assert_eq!(handle.config_value("subdomain"), Some(json!("acme")));
    }

    #[tokio::test]
    async fn wait_settled_returns_error_status() {
        let (tx, mut handle) = handle_with(BootstrapStatus::default());
        let waiter = tokio::spawn(async move { handle.wait_settled().await });

        tx.send_modify(|s| s.phase = BootstrapPhase::Resolving);
        tx.send_modify(|s| {
            s.phase = BootstrapPhase::Error;
            s.error = Some("tenant not found".to_owned());
        });

        let status = waiter.await.unwrap();
        assert_eq!(status.phase, BootstrapPhase::Error);
        assert_eq!(status.error.as_deref(), Some("tenant not found"));
    }

    #[tokio::test]
    async fn wait_settled_falls_back_when_sender_is_dropped() {
        let (tx, mut handle) = handle_with(BootstrapStatus::default());
        tx.send_modify(|s| s.phase = BootstrapPhase::LoadingModules);
        drop(tx);

        let status = handle.wait_settled().await;
        assert_eq!(status.phase, BootstrapPhase::LoadingModules);
    }
}
