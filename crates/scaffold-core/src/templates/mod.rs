//! Template bundles: loading, selection, and rendering
//!
//! This module provides:
//! - The bundle manifest schema and rule table (`bundles.yaml`)
//! - Template sources, embedded in the binary or read from a local directory
//! - Selection of bundles for a configuration
//! - Rendering of the selected bundles into a project directory

pub mod manifest;
pub mod renderer;
pub mod selector;
pub mod source;

use crate::error::TemplateError;
use crate::project::{Configuration, TemplateHook};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use manifest::{Bundle, BundleManifest, BundleSource, Layout, Pattern, Rule};
pub use renderer::{render_bundles, template_context};
pub use selector::{select, select_for};
pub use source::{EmbeddedTemplates, LocalTemplates, TemplateSource};

/// Manifest file at the root of every template source
pub const MANIFEST_FILE: &str = "bundles.yaml";

/// A template source together with its validated manifest
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn TemplateSource>,
    manifest: Arc<BundleManifest>,
}

impl Catalog {
    /// Catalog over the templates shipped with the binary
    pub fn embedded() -> Result<Self, TemplateError> {
        Self::from_source(Arc::new(EmbeddedTemplates))
    }

    /// Catalog over a template directory on disk
    pub fn local(root: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(TemplateError::NotFound {
                path: root.display().to_string(),
            });
        }
        Self::from_source(Arc::new(LocalTemplates::new(root)))
    }

    pub fn from_source(source: Arc<dyn TemplateSource>) -> Result<Self, TemplateError> {
        let files = source.list()?;
        let content = source.read(MANIFEST_FILE)?;
        let manifest = BundleManifest::parse(MANIFEST_FILE, &content)?;
        manifest.validate(&files)?;

        tracing::debug!(
            bundles = manifest.bundles.len(),
            rules = manifest.rules.len(),
            "loaded template catalog"
        );

        Ok(Self {
            source,
            manifest: Arc::new(manifest),
        })
    }

    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    pub fn select(&self, config: &Configuration) -> Vec<&str> {
        select_for(&self.manifest, config)
    }

    pub fn render(
        &self,
        config: &Configuration,
        target_dir: &Path,
    ) -> Result<Vec<String>, TemplateError> {
        let bundles = self.select(config);
        render_bundles(
            self.source.as_ref(),
            &self.manifest,
            &bundles,
            config,
            target_dir,
        )
    }

    /// Hook rendering this catalog, or `None` when the configuration selects
    /// no bundles
    pub fn hook_for(&self, config: &Configuration) -> Option<Arc<dyn TemplateHook>> {
        if self.select(config).is_empty() {
            return None;
        }
        Some(Arc::new(CatalogHook {
            catalog: self.clone(),
        }))
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("bundles", &self.manifest.bundles.len())
            .field("rules", &self.manifest.rules.len())
            .finish()
    }
}

/// [`TemplateHook`] that renders the bundles a [`Catalog`] selects
pub struct CatalogHook {
    catalog: Catalog,
}

impl TemplateHook for CatalogHook {
    fn describe(&self, config: &Configuration) -> String {
        format!("Writing templates ({})", self.catalog.select(config).join(", "))
    }

    fn apply(
        &self,
        config: &Configuration,
        project_dir: &Path,
    ) -> crate::error::Result<Vec<String>> {
        Ok(self.catalog.render(config, project_dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{DbLibrary, DbProvider, WebLibrary};
    use crate::templates::source::memory::MemoryTemplates;

    #[test]
    fn test_embedded_catalog_validates() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.manifest().bundle("common").is_some());
        assert!(catalog.manifest().bundle("common-lean").is_some());
    }

    #[test]
    fn test_embedded_catalog_renders_every_combination() {
        let catalog = Catalog::embedded().unwrap();
        for web in WebLibrary::ALL {
            for db in DbLibrary::ALL {
                let mut providers = db.providers().to_vec();
                providers.push(DbProvider::None);
                for provider in providers {
                    let mut config = Configuration::new("demo");
                    config.web_library = web;
                    config.set_db_library(db);
                    config.set_db_provider(provider);

                    let picked = catalog.select(&config);
                    let expected = match (web.is_set(), db.is_set()) {
                        (true, true) => 3,
                        (true, false) => 1,
                        (false, true) => 2,
                        (false, false) => 0,
                    };
                    assert_eq!(picked.len(), expected, "{:?}/{:?}/{:?}", web, db, provider);

                    let dir = tempfile::tempdir().unwrap();
                    let files = catalog.render(&config, dir.path()).unwrap();
                    assert_eq!(files.is_empty(), expected == 0);
                    for file in &files {
                        assert!(dir.path().join(file).is_file(), "{} missing", file);
                        assert!(!file.ends_with(".tmpl"));
                    }
                }
            }
        }
    }

    #[test]
    fn test_embedded_selection_order() {
        let catalog = Catalog::embedded().unwrap();
        let pick = |web, db, provider| {
            let mut config = Configuration::new("demo");
            config.web_library = web;
            config.set_db_library(db);
            config.set_db_provider(provider);
            catalog
                .select(&config)
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        assert_eq!(
            pick(WebLibrary::Gin, DbLibrary::Sqlx, DbProvider::Postgres),
            vec!["common", "gin", "sqlx-postgres"]
        );
        assert_eq!(
            pick(WebLibrary::NetHttp, DbLibrary::Gorm, DbProvider::GormPostgres),
            vec!["common", "nethttp", "gorm-postgres"]
        );
        // no provider falls back to the mysql driver
        assert_eq!(
            pick(WebLibrary::Gin, DbLibrary::Gorm, DbProvider::None),
            vec!["common", "gin", "gorm-mysql"]
        );
        assert_eq!(
            pick(WebLibrary::Fiber, DbLibrary::None, DbProvider::None),
            vec!["fiber-lean"]
        );
        assert_eq!(
            pick(WebLibrary::None, DbLibrary::Sql, DbProvider::None),
            vec!["common-lean", "sql-mysql"]
        );
        assert_eq!(
            pick(WebLibrary::None, DbLibrary::Sqlx, DbProvider::Postgres),
            vec!["common-lean", "sqlx-postgres"]
        );
        assert!(pick(WebLibrary::None, DbLibrary::None, DbProvider::None).is_empty());
    }

    #[test]
    fn test_embedded_full_project_mentions_module_name() {
        let catalog = Catalog::embedded().unwrap();
        let mut config = Configuration::new("shop");
        config.web_library = WebLibrary::Gin;
        config.set_db_library(DbLibrary::Sqlx);

        let dir = tempfile::tempdir().unwrap();
        let files = catalog.render(&config, dir.path()).unwrap();
        assert!(files.iter().any(|f| f.starts_with("internal/")));
        let any_mentions_module = files.iter().any(|f| {
            std::fs::read_to_string(dir.path().join(f))
                .map(|c| c.contains("shop/internal"))
                .unwrap_or(false)
        });
        assert!(any_mentions_module);
    }

    #[test]
    fn test_hook_bound_only_when_bundles_apply() {
        let catalog = Catalog::embedded().unwrap();
        let mut config = Configuration::new("demo");
        assert!(catalog.hook_for(&config).is_none());
        config.web_library = WebLibrary::Fiber;
        let hook = catalog.hook_for(&config).unwrap();
        assert!(hook.describe(&config).contains("fiber-lean"));
    }

    #[test]
    fn test_catalog_rejects_manifest_naming_missing_root() {
        let source = MemoryTemplates::new().with(
            MANIFEST_FILE,
            "bundles:\n  - id: gin\n    sources:\n      - root: gin\nrules: []\n",
        );
        let err = Catalog::from_source(Arc::new(source)).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidManifest { .. }));
    }

    #[test]
    fn test_catalog_requires_manifest() {
        let source = MemoryTemplates::new().with("gin/main.go.tmpl", "package main\n");
        let err = Catalog::from_source(Arc::new(source)).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound { path } if path == MANIFEST_FILE));
    }

    #[test]
    fn test_local_catalog_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::local(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound { .. }));
    }
}
