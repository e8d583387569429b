#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Load-pass behavior of the module loader
//!
//! Covers concurrent settle-all semantics, failure isolation, unknown module
//! skipping, config slice delivery and the "no code for disabled modules" rule.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tenant_resolver_sdk::TenantConfig;

use shellkit::{
    ActionDefinition, ActionPosition, CapabilityRegistry, Component, ComponentRef,
    ModuleDefinition, ModuleLoadError, ModuleLoader, ModuleManifest, ModuleManifestEntry,
    RegisterCtx, RegistrationModule, TabDefinition,
};

#[derive(Default)]
struct Panel;

impl Component for Panel {
    fn name(&self) -> &str {
        "panel"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Registers one tab for its own id, after an optional delay.
struct TabModule {
    id: &'static str,
    delay: Duration,
    seen_config: Arc<Mutex<Option<serde_json::Value>>>,
}

#[async_trait]
impl RegistrationModule for TabModule {
    async fn register(&self, ctx: &RegisterCtx) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        *self.seen_config.lock() = Some(ctx.raw_config().clone());
        ctx.register_module(ModuleDefinition::new(self.id, self.id, "1.0.0"));
        ctx.register_tab(
            TabDefinition::new(self.id, self.id, ComponentRef::of::<Panel>(self.id))
                .for_entities([self.id]),
        );
        Ok(())
    }
}

struct FailingModule;

#[async_trait]
impl RegistrationModule for FailingModule {
    async fn register(&self, ctx: &RegisterCtx) -> anyhow::Result<()> {
        // Partial registration before failing stays in place.
        ctx.register_action(
            ActionDefinition::new("half", "Half", ComponentRef::of::<Panel>("half"))
                .for_entities(["broken"])
                .at(ActionPosition::Row),
        );
        anyhow::bail!("config rejected")
    }
}

struct PanickingModule;

#[async_trait]
impl RegistrationModule for PanickingModule {
    async fn register(&self, _ctx: &RegisterCtx) -> anyhow::Result<()> {
        panic!("module bug");
    }
}

struct Recorder {
    loads: Arc<AtomicUsize>,
    seen_config: Arc<Mutex<Option<serde_json::Value>>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            loads: Arc::new(AtomicUsize::new(0)),
            seen_config: Arc::new(Mutex::new(None)),
        }
    }

    fn entry(&self, id: &'static str, delay: Duration) -> ModuleManifestEntry {
        let loads = self.loads.clone();
        let seen_config = self.seen_config.clone();
        ModuleManifestEntry::new(id, move || {
            loads.fetch_add(1, Ordering::SeqCst);
            let seen_config = seen_config.clone();
            async move {
                let module: Arc<dyn RegistrationModule> = Arc::new(TabModule {
                    id,
                    delay,
                    seen_config,
                });
                Ok(module)
            }
        })
    }
}

fn tenant(modules: &[&str]) -> TenantConfig {
    TenantConfig {
        subdomain: "acme".to_owned(),
        enabled_modules: modules.iter().map(|m| (*m).to_owned()).collect(),
        ..TenantConfig::default()
    }
}

fn build_loader(manifest: ModuleManifest) -> (ModuleLoader, Arc<CapabilityRegistry>) {
    let registry = Arc::new(CapabilityRegistry::new());
    (
        ModuleLoader::new(Arc::new(manifest), registry.clone()),
        registry,
    )
}

#[tokio::test]
async fn disabled_modules_are_never_loaded() {
    let enabled = Recorder::new();
    let disabled = Recorder::new();
    let manifest = ModuleManifest::builder()
        .with(enabled.entry("core", Duration::ZERO))
        .unwrap()
        .with(disabled.entry("tickets", Duration::ZERO))
        .unwrap()
        .build();
    let (loader, registry) = build_loader(manifest);

    let report = loader.load_modules(&tenant(&["core"])).await;

    assert_eq!(report.loaded_ids(), vec!["core"]);
    assert_eq!(enabled.loads.load(Ordering::SeqCst), 1);
    assert_eq!(disabled.loads.load(Ordering::SeqCst), 0);
    assert!(registry.get_module("tickets").is_none());
    assert!(registry.get_tabs_for_entity("tickets").is_empty());
}

#[tokio::test]
async fn unknown_module_ids_are_skipped_silently() {
    let recorder = Recorder::new();
    let manifest = ModuleManifest::builder()
        .with(recorder.entry("core", Duration::ZERO))
        .unwrap()
        .build();
    let (loader, _registry) = build_loader(manifest);

    let report = loader.load_modules(&tenant(&["core", "legacy-reports"])).await;

    assert_eq!(report.loaded_ids(), vec!["core"]);
    assert_eq!(report.skipped, vec!["legacy-reports"]);
    assert_eq!(report.failed().count(), 0);
}

#[tokio::test]
async fn failures_are_isolated_from_siblings() {
    let recorder = Recorder::new();
    let manifest = ModuleManifest::builder()
        .with(recorder.entry("core", Duration::from_millis(20)))
        .unwrap()
        .with(ModuleManifestEntry::new("broken", || async {
            let m: Arc<dyn RegistrationModule> = Arc::new(FailingModule);
            Ok(m)
        }))
        .unwrap()
        .with(ModuleManifestEntry::new("missing-chunk", || async {
            Err::<Arc<dyn RegistrationModule>, _>(anyhow::anyhow!("chunk not found"))
        }))
        .unwrap()
        .with(ModuleManifestEntry::new("panicky", || async {
            let m: Arc<dyn RegistrationModule> = Arc::new(PanickingModule);
            Ok(m)
        }))
        .unwrap()
        .build();
    let (loader, registry) = build_loader(manifest);

    let report = loader
        .load_modules(&tenant(&["broken", "core", "missing-chunk", "panicky"]))
        .await;

    assert_eq!(report.outcomes.len(), 4, "every attempt settles");
    assert_eq!(report.loaded_ids(), vec!["core"]);
    assert_eq!(registry.get_tabs_for_entity("core").len(), 1);

    let errors: BTreeMap<&str, &ModuleLoadError> = report
        .failed()
        .map(|o| (o.module_id.as_str(), o.result.as_ref().unwrap_err()))
        .collect();
    assert!(matches!(errors["broken"], ModuleLoadError::Register { .. }));
    assert!(matches!(errors["missing-chunk"], ModuleLoadError::Loader { .. }));
    assert!(
        matches!(errors["panicky"], ModuleLoadError::Panicked { message, .. } if message == "module bug")
    );

    // Whatever the failing module registered before erroring is kept.
    assert_eq!(registry.get_actions_for_entity("broken", None).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn modules_run_concurrently_and_all_settle() {
    let recorder = Recorder::new();
    let manifest = ModuleManifest::builder()
        .with(recorder.entry("a", Duration::from_millis(200)))
        .unwrap()
        .with(recorder.entry("b", Duration::from_millis(200)))
        .unwrap()
        .with(recorder.entry("c", Duration::from_millis(200)))
        .unwrap()
        .build();
    let (loader, registry) = build_loader(manifest);

    let started = tokio::time::Instant::now();
    let report = loader.load_modules(&tenant(&["a", "b", "c"])).await;

    // Virtual clock: concurrent loads settle after one delay, sequential would take three.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "{elapsed:?}");
    assert_eq!(report.loaded_ids(), vec!["a", "b", "c"]);
    for et in ["a", "b", "c"] {
        assert_eq!(registry.get_tabs_for_entity(et).len(), 1, "{et} registered");
    }
}

#[tokio::test]
async fn module_receives_its_config_slice() {
    let recorder = Recorder::new();
    let manifest = ModuleManifest::builder()
        .with(recorder.entry("tickets", Duration::ZERO))
        .unwrap()
        .build();
    let (loader, _registry) = build_loader(manifest);

    let mut config = tenant(&["tickets"]);
    config
        .module_config
        .insert("tickets".to_owned(), json!({"allow_close": false}));
    loader.load_modules(&config).await;
    assert_eq!(
        recorder.seen_config.lock().clone(),
        Some(json!({"allow_close": false}))
    );

    // Absent slice arrives as an empty object.
    loader.load_modules(&tenant(&["tickets"])).await;
    assert_eq!(recorder.seen_config.lock().clone(), Some(json!({})));
}

#[tokio::test]
async fn reloading_same_modules_is_idempotent() {
    let recorder = Recorder::new();
    let manifest = ModuleManifest::builder()
        .with(recorder.entry("tickets", Duration::ZERO))
        .unwrap()
        .build();
    let (loader, registry) = build_loader(manifest);

    loader.load_modules(&tenant(&["tickets"])).await;
    loader.load_modules(&tenant(&["tickets"])).await;

    assert_eq!(recorder.loads.load(Ordering::SeqCst), 2);
    assert_eq!(registry.get_tabs_for_entity("tickets").len(), 1);
    assert_eq!(registry.get_all_modules().len(), 1);
}
