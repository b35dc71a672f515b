//! Toolchain trait for the generated project's build tool
//!
//! The build runner and the binary only talk to the external tool through this
//! trait: which commands to run, which files mark an existing project, and what
//! to tell the user afterwards.

use crate::build::Invocation;
use crate::error::{Result, ScaffoldError};
use crate::project::Configuration;
use std::path::{Path, PathBuf};

/// Description of the external tool a generated project is built with
pub trait Toolchain: Send + Sync + 'static {
    /// Binary name looked up on PATH
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Files whose presence means the directory already holds a project
    fn manifest_files(&self) -> &'static [&'static str];

    /// Directories created before anything else, relative to the project
    fn skeleton_dirs(&self) -> &'static [&'static str];

    fn init_module(&self, name: &str) -> Invocation;

    fn fetch_dependency(&self, dependency: &str) -> Invocation;

    fn vendor(&self) -> Invocation;

    /// Command whose success shows the tool is installed
    fn version(&self) -> Invocation;

    /// Where to get the tool
    fn docs_url(&self) -> &'static str;

    /// Instructions printed after a successful build
    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String>;

    /// First manifest file already present in `dir`
    fn existing_manifest(&self, dir: &Path) -> Option<PathBuf> {
        self.manifest_files()
            .iter()
            .map(|file| dir.join(file))
            .find(|path| path.exists())
    }

    /// Fails when `dir` already holds a project
    fn ensure_fresh(&self, dir: &Path) -> Result<()> {
        match self.existing_manifest(dir) {
            Some(path) => Err(ScaffoldError::ManifestExists { path }),
            None => Ok(()),
        }
    }
}

/// The Go toolchain
#[derive(Debug, Clone, Copy, Default)]
pub struct GoToolchain;

impl Toolchain for GoToolchain {
    fn name(&self) -> &'static str {
        "go"
    }

    fn display_name(&self) -> &'static str {
        "Go"
    }

    fn manifest_files(&self) -> &'static [&'static str] {
        &["go.mod", "go.sum"]
    }

    fn skeleton_dirs(&self) -> &'static [&'static str] {
        &[
            "internal/models",
            "internal/services",
            "internal/controllers",
            "internal/repositories",
            "internal/routers",
            "cmd",
            "scripts",
            "docs",
        ]
    }

    fn init_module(&self, name: &str) -> Invocation {
        Invocation::new(self.name(), ["mod", "init", name])
    }

    fn fetch_dependency(&self, dependency: &str) -> Invocation {
        Invocation::new(self.name(), ["get", dependency])
    }

    fn vendor(&self) -> Invocation {
        Invocation::new(self.name(), ["mod", "vendor"])
    }

    fn version(&self) -> Invocation {
        Invocation::new(self.name(), ["version"])
    }

    fn docs_url(&self) -> &'static str {
        "https://go.dev/doc/install"
    }

    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String> {
        let mut steps = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            if cwd != dir {
                let shown = dir.strip_prefix(&cwd).unwrap_or(dir);
                steps.push(format!("cd {}", shown.display()));
            }
        }

        // the library module paths are not fetched by the build
        if config.web_library.is_set() || config.db_library.is_set() {
            steps.push("go mod tidy".to_string());
        }

        if config.is_full_project() {
            steps.push("export DATABASE_URL=<your connection string>".to_string());
            steps.push("sh scripts/run.sh".to_string());
        } else {
            steps.push("go build ./...".to_string());
        }

        steps
    }
}
