mod collaborators;
mod registered_modules;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use serde_json::json;
use shellkit::{CapabilityRegistry, LoadReport, ModuleManifest};
use shellkit_bootstrap::{AppConfig, Bootstrap, init_logging};
use static_store_plugin::StaticStorePlugin;
use tenant_resolver::TenantResolverModule;
use tenant_resolver_sdk::TenantConfig;

use crate::collaborators::{TracingI18n, TracingTheme};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Console shell - resolves a tenant and bootstraps its feature modules
#[derive(Parser)]
#[command(name = "console-shell")]
#[command(about = "Console shell - resolves a tenant and bootstraps its feature modules")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap the tenant behind a host and print what it activated
    Run {
        /// Request host, e.g. `acme.example.com`
        #[arg(long)]
        host: String,
    },
    /// Validate configuration and every configured organization
    Check,
}

/// Everything built from configuration before a host is known.
struct Shell {
    store: StaticStorePlugin,
    resolver: TenantResolverModule,
    manifest: Arc<ModuleManifest>,
}

impl Shell {
    fn init(config: &AppConfig) -> Result<Self> {
        let store = StaticStorePlugin::init(config)?;
        let resolver = TenantResolverModule::init(config, store.client())?;
        let manifest = registered_modules::build_manifest().context("invalid module manifest")?;
        Ok(Self {
            store,
            resolver,
            manifest: Arc::new(manifest),
        })
    }

    fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(
            self.resolver.client(),
            Arc::new(TracingI18n),
            Arc::new(TracingTheme),
            self.manifest.clone(),
            Arc::new(CapabilityRegistry::new()),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config: 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*)
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    tracing::info!(modules = ?config.module_names(), "Console shell starting");
    let shell = Shell::init(&config)?;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Run { host } => run(&shell, &host).await,
        Commands::Check => check(&shell).await,
    }
}

async fn run(shell: &Shell, host: &str) -> Result<()> {
    let bootstrap = shell.bootstrap();
    let tenant = bootstrap
        .mount(host)
        .await
        .with_context(|| format!("bootstrap failed for host '{host}'"))?;

    let status = bootstrap.status();
    let report = status.report.unwrap_or_default();
    let summary = json!({
        "host": host,
        "phase": status.phase,
        "tenant": &*tenant,
        "modules": load_summary(&report),
        "capabilities": capabilities(bootstrap.registry()),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_summary(report: &LoadReport) -> serde_json::Value {
    let failed: BTreeMap<&str, String> = report
        .failed()
        .filter_map(|o| {
            o.result
                .as_ref()
                .err()
                .map(|e| (o.module_id.as_str(), error_chain(e)))
        })
        .collect();
    json!({
        "loaded": report.loaded_ids(),
        "failed": failed,
        "skipped": report.skipped,
        "elapsed_ms": u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
    })
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

fn capabilities(registry: &CapabilityRegistry) -> serde_json::Value {
    let entities: serde_json::Map<String, serde_json::Value> = registry
        .entity_types()
        .into_iter()
        .map(|entity| {
            let tabs = registry.get_tabs_for_entity(&entity);
            let actions = registry.get_actions_for_entity(&entity, None);
            let value = json!({
                "tabs": tabs.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
                "actions": actions
                    .iter()
                    .map(|a| json!({"id": a.id, "position": a.position}))
                    .collect::<Vec<_>>(),
                "detail": registry.get_detail_component(&entity).map(|d| d.component.key().to_owned()),
            });
            (entity, value)
        })
        .collect();

    json!({
        "modules": registry
            .get_all_modules()
            .iter()
            .map(|m| json!({"id": m.id, "version": m.version}))
            .collect::<Vec<_>>(),
        "view_types": registry
            .get_all_view_types()
            .iter()
            .map(|v| v.id.as_str())
            .collect::<Vec<_>>(),
        "entities": entities,
    })
}

async fn check(shell: &Shell) -> Result<()> {
    tracing::info!("Checking configuration...");
    let service = shell.resolver.service();
    let mut problems = 0usize;

    for org in shell.store.service().organizations() {
        let tenant = match service.resolve_subdomain(&org.subdomain).await {
            Ok(tenant) => tenant,
            Err(e) => {
                problems += 1;
                eprintln!("{}: {e}", org.subdomain);
                continue;
            }
        };
        println!("{}: {}", tenant.subdomain, describe(&tenant, &shell.manifest));
        for issue in shell.manifest.dependency_issues(&tenant.enabled_modules) {
            println!("  warning: {issue}");
        }
    }

    if problems > 0 {
        anyhow::bail!("{problems} organization(s) failed to resolve");
    }
    println!("Configuration is valid");
    Ok(())
}

fn describe(tenant: &TenantConfig, manifest: &ModuleManifest) -> String {
    let (known, unknown): (Vec<&str>, Vec<&str>) = tenant
        .enabled_modules
        .iter()
        .map(String::as_str)
        .partition(|id| manifest.has_module(id));
    if unknown.is_empty() {
        format!("modules [{}]", known.join(", "))
    } else {
        format!(
            "modules [{}], not in manifest [{}]",
            known.join(", "),
            unknown.join(", ")
        )
    }
}
