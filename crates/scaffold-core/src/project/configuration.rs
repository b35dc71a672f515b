//! Accumulated wizard answers

use super::library::{DbLibrary, DbProvider, WebLibrary};
use super::progress::BuildProgress;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Deferred template rendering, bound once the web/db selection implies bundles
/// and invoked by the build runner
pub trait TemplateHook: Send + Sync {
    /// Short description used in progress text
    fn describe(&self, config: &Configuration) -> String;

    /// Render into `project_dir`, returning the written paths relative to it
    fn apply(
        &self,
        config: &Configuration,
        project_dir: &Path,
    ) -> crate::error::Result<Vec<String>>;
}

/// Every decision made during a wizard run
#[derive(Clone)]
pub struct Configuration {
    pub name: String,
    pub web_library: WebLibrary,
    pub db_library: DbLibrary,
    pub db_provider: DbProvider,
    pub dependencies: BTreeSet<String>,
    pub do_vendor: bool,
    pub progress: Arc<BuildProgress>,
    pub template_hook: Option<Arc<dyn TemplateHook>>,
}

impl Configuration {
    /// New configuration named after the last component of `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            name: default_name(path.as_ref()),
            web_library: WebLibrary::None,
            db_library: DbLibrary::None,
            db_provider: DbProvider::None,
            dependencies: BTreeSet::new(),
            do_vendor: false,
            progress: Arc::new(BuildProgress::new()),
            template_hook: None,
        }
    }

    /// Both a web and a db library are selected
    pub fn is_full_project(&self) -> bool {
        self.web_library.is_set() && self.db_library.is_set()
    }

    /// Provider used for template selection, falling back to the library baseline
    pub fn resolved_provider(&self) -> DbProvider {
        if self.db_provider == DbProvider::None {
            self.db_library.baseline_provider()
        } else {
            self.db_provider
        }
    }

    /// Sets the db library, dropping a provider the new library cannot use
    pub fn set_db_library(&mut self, library: DbLibrary) {
        self.db_library = library;
        if !library.accepts(self.db_provider) {
            self.db_provider = DbProvider::None;
        }
    }

    /// Sets the provider if the current library accepts it; returns whether it did
    pub fn set_db_provider(&mut self, provider: DbProvider) -> bool {
        if self.db_library.accepts(provider) {
            self.db_provider = provider;
            true
        } else {
            false
        }
    }

    /// Adds a trimmed dependency; blank input is ignored
    pub fn add_dependency(&mut self, dependency: &str) -> bool {
        let dependency = dependency.trim();
        if dependency.is_empty() {
            return false;
        }
        self.dependencies.insert(dependency.to_string())
    }

    pub fn remove_dependency(&mut self, dependency: &str) -> bool {
        self.dependencies.remove(dependency)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("name", &self.name)
            .field("web_library", &self.web_library)
            .field("db_library", &self.db_library)
            .field("db_provider", &self.db_provider)
            .field("dependencies", &self.dependencies)
            .field("do_vendor", &self.do_vendor)
            .field("template_hook", &self.template_hook.is_some())
            .finish_non_exhaustive()
    }
}

fn default_name(path: &Path) -> String {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) if !name.is_empty() && name != "." => name.to_string(),
        _ => "default".to_string(),
    }
}
