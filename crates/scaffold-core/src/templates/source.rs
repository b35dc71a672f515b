//! Read-only template trees: embedded in the binary or on local disk

use crate::error::TemplateError;
use include_dir::{include_dir, Dir, DirEntry};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Templates compiled into the binary.
static EMBEDDED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// A tree of template files addressed by `/`-separated paths relative to its root
pub trait TemplateSource: Send + Sync {
    /// Every file in the tree, sorted
    fn list(&self) -> Result<Vec<String>, TemplateError>;

    /// Contents of one file
    fn read(&self, path: &str) -> Result<String, TemplateError>;
}

/// The template tree shipped with the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn list(&self) -> Result<Vec<String>, TemplateError> {
        let mut files = Vec::new();
        collect_embedded(&EMBEDDED, &mut files);
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, TemplateError> {
        let file = EMBEDDED.get_file(path).ok_or_else(|| TemplateError::NotFound {
            path: path.to_string(),
        })?;
        file.contents_utf8()
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotUtf8 {
                path: path.to_string(),
            })
    }
}

fn collect_embedded(dir: &Dir<'_>, files: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_embedded(sub, files),
            DirEntry::File(file) => files.push(slash_path(file.path())),
        }
    }
}

/// Templates read from a directory, for working on templates without rebuilding
#[derive(Debug, Clone)]
pub struct LocalTemplates {
    root: PathBuf,
}

impl LocalTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for LocalTemplates {
    fn list(&self) -> Result<Vec<String>, TemplateError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                TemplateError::Io {
                    path,
                    source: e.into(),
                }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                files.push(slash_path(relative));
            }
        }
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, TemplateError> {
        let full_path = self.root.join(path);
        std::fs::read_to_string(&full_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TemplateError::NotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::InvalidData => TemplateError::NotUtf8 {
                path: path.to_string(),
            },
            _ => TemplateError::Io {
                path: full_path.clone(),
                source: e,
            },
        })
    }
}

/// Join path components with `/` regardless of platform
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
