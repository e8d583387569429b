//! Module manifest.
//!
//! Static lookup table from module id to a deferred loader. Nothing is
//! constructed until the loader runs, so a module that no tenant enables costs
//! nothing beyond its table entry. The manifest is built once at startup and
//! never mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::contracts::RegistrationModule;

pub type ModuleLoaderFn =
    Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Arc<dyn RegistrationModule>>> + Send + Sync>;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ManifestError {
    #[error("module '{0}' declared twice in the manifest")]
    DuplicateModule(String),
    #[error("module id must not be empty")]
    EmptyModuleId,
}

/// One manifest row: id, loader, and the dependencies operators should know about.
///
/// Dependencies are informational. The loader reports them but never reorders
/// or blocks on them.
#[derive(Clone)]
pub struct ModuleManifestEntry {
    id: String,
    loader: ModuleLoaderFn,
    deps: Vec<String>,
    optional_deps: Vec<String>,
}

impl ModuleManifestEntry {
    #[must_use]
    pub fn new<F, Fut>(id: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Arc<dyn RegistrationModule>>> + Send + 'static,
    {
        let loader: ModuleLoaderFn = Arc::new(
            move || -> BoxFuture<'static, anyhow::Result<Arc<dyn RegistrationModule>>> {
                Box::pin(load())
            },
        );
        Self {
            id: id.into(),
            loader,
            deps: Vec::new(),
            optional_deps: Vec::new(),
        }
    }

    /// Entry whose loader simply constructs `M` through `Default`.
    #[must_use]
    pub fn eager<M: RegistrationModule + Default>(id: impl Into<String>) -> Self {
        Self::new(id, || async {
            let module: Arc<dyn RegistrationModule> = Arc::new(M::default());
            Ok(module)
        })
    }

    #[must_use]
    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn optionally_depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_deps = deps.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn loader(&self) -> &ModuleLoaderFn {
        &self.loader
    }
}

impl fmt::Debug for ModuleManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleManifestEntry")
            .field("id", &self.id)
            .field("deps", &self.deps)
            .field("optional_deps", &self.optional_deps)
            .finish_non_exhaustive()
    }
}

/// A dependency problem for a given enabled set; reported, never enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyIssue {
    /// `module` requires `dependency`, which is not enabled.
    MissingRequired { module: String, dependency: String },
    /// `module` declares a dependency the manifest does not know.
    Undeclared { module: String, dependency: String },
}

impl fmt::Display for DependencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { module, dependency } => {
                write!(f, "module '{module}' requires '{dependency}' which is not enabled")
            }
            Self::Undeclared { module, dependency } => {
                write!(f, "module '{module}' depends on unknown module '{dependency}'")
            }
        }
    }
}

#[derive(Default)]
pub struct ModuleManifestBuilder {
    entries: BTreeMap<String, ModuleManifestEntry>,
}

impl ModuleManifestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    ///
    /// # Errors
    /// Returns `ManifestError` for an empty id or an id already present.
    pub fn with(mut self, entry: ModuleManifestEntry) -> Result<Self, ManifestError> {
        if entry.id.is_empty() {
            return Err(ManifestError::EmptyModuleId);
        }
        if self.entries.contains_key(&entry.id) {
            return Err(ManifestError::DuplicateModule(entry.id));
        }
        self.entries.insert(entry.id.clone(), entry);
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> ModuleManifest {
        ModuleManifest {
            entries: self.entries,
        }
    }
}

/// Immutable id -> loader table.
#[derive(Debug, Default)]
pub struct ModuleManifest {
    entries: BTreeMap<String, ModuleManifestEntry>,
}

impl ModuleManifest {
    #[must_use]
    pub fn builder() -> ModuleManifestBuilder {
        ModuleManifestBuilder::new()
    }

    #[must_use]
    pub fn has_module(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn loader_for(&self, id: &str) -> Option<ModuleLoaderFn> {
        self.entries.get(id).map(|e| e.loader.clone())
    }

    /// All known ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn dependencies_of(&self, id: &str) -> &[String] {
        self.entries.get(id).map_or(&[][..], |e| e.deps.as_slice())
    }

    #[must_use]
    pub fn optional_dependencies_of(&self, id: &str) -> &[String] {
        self.entries
            .get(id)
            .map_or(&[][..], |e| e.optional_deps.as_slice())
    }

    /// Dependency problems for the enabled modules this manifest knows about.
    ///
    /// Optional dependencies never produce an issue when disabled, only when
    /// they name a module that does not exist.
    #[must_use]
    pub fn dependency_issues(&self, enabled: &BTreeSet<String>) -> Vec<DependencyIssue> {
        let mut issues = Vec::new();
        for (id, entry) in self.entries.iter().filter(|(id, _)| enabled.contains(*id)) {
            for dep in &entry.deps {
                if !self.has_module(dep) {
                    issues.push(DependencyIssue::Undeclared {
                        module: id.clone(),
                        dependency: dep.clone(),
                    });
                    continue;
                }
                if !enabled.contains(dep) {
                    issues.push(DependencyIssue::MissingRequired {
                        module: id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
            for dep in entry.optional_deps.iter().filter(|d| !self.has_module(d)) {
                issues.push(DependencyIssue::Undeclared {
                    module: id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
        issues
    }
}
