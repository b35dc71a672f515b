//! Rendering selected bundles into a project tree

use crate::error::TemplateError;
use crate::project::Configuration;
use crate::templates::manifest::BundleManifest;
use crate::templates::source::TemplateSource;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};

/// Values available to templates as `{{ name }}`, `{{ module }}` and so on
pub fn template_context(config: &Configuration) -> Context {
    let mut ctx = Context::new();
    ctx.insert("name", &config.name);
    ctx.insert("module", &config.name);
    ctx.insert("web_library", config.web_library.module_path());
    ctx.insert("db_library", config.db_library.module_path());
    ctx.insert("db_provider", config.resolved_provider().module_path());
    ctx.insert("dependencies", &config.dependencies);
    ctx.insert("vendored", &config.do_vendor);
    ctx
}

/// Render `bundles` in order into `target_dir`
///
/// Files of each source are rendered sorted by path. When two files map to the
/// same destination the later one overwrites it; the returned list still names
/// each destination once, at the position it was first written. Any error stops
/// the render and leaves already written files in place.
pub fn render_bundles(
    source: &dyn TemplateSource,
    manifest: &BundleManifest,
    bundles: &[&str],
    config: &Configuration,
    target_dir: &Path,
) -> Result<Vec<String>, TemplateError> {
    let files = source.list()?;
    let ctx = template_context(config);
    let mut written: Vec<String> = Vec::new();

    for id in bundles {
        let bundle = manifest
            .bundle(id)
            .ok_or_else(|| TemplateError::UnknownBundle {
                name: id.to_string(),
            })?;

        for bundle_source in &bundle.sources {
            let mut own = bundle_source.files(&files);
            own.sort_unstable();

            for file in own {
                let Some(dest) = bundle_source.destination(file) else {
                    continue;
                };
                let content = source.read(file)?;
                let rendered =
                    Tera::one_off(&content, &ctx, false).map_err(|e| TemplateError::Render {
                        path: file.to_string(),
                        source: e,
                    })?;

                let target_path = target_dir.join(&dest);
                if let Some(parent) = target_path.parent() {
                    fs::create_dir_all(parent).map_err(|e| TemplateError::Io {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
                fs::write(&target_path, rendered).map_err(|e| TemplateError::Io {
                    path: target_path.clone(),
                    source: e,
                })?;

                tracing::debug!(bundle = %bundle.id, template = %file, dest = %dest, "rendered");
                if !written.contains(&dest) {
                    written.push(dest);
                }
            }
        }
    }

    Ok(written)
}
