//! Error types for scaffolding operations.
//!
//! [`ScaffoldError`] covers the wizard and the build; [`TemplateError`] covers
//! loading, selecting and rendering template bundles. Both are fatal to the
//! operation that raised them. Advisory dependency failures are not errors and
//! are reported through [`crate::build::BuildReport`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the wizard and the build runner.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The target directory already holds a module manifest.
    #[error("{} already exists", path.display())]
    ManifestExists { path: PathBuf },

    /// The project directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The summary dispatch was handed a cursor with no facet behind it.
    #[error("Unexpected summary selection {index} (only {len} entries)")]
    UnknownFacet { index: usize, len: usize },

    /// An external command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// An external command could not be started.
    #[error("Failed to run command {command}: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Template selection or rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The build task ended without reporting a result.
    #[error("Build task ended unexpectedly: {0}")]
    BuildAborted(String),
}

/// Errors raised while loading or rendering template bundles.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The bundle manifest is not valid YAML for the expected schema.
    #[error("Failed to parse {path}: {source}")]
    ManifestParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The bundle manifest parsed but references things that do not exist.
    #[error("Invalid bundle manifest: {message}")]
    InvalidManifest { message: String },

    /// A rule or caller named a bundle the manifest does not declare.
    #[error("Unknown template bundle: {name}")]
    UnknownBundle { name: String },

    /// A template file is missing from the source.
    #[error("Template not found: {path}")]
    NotFound { path: String },

    /// A template file is not valid UTF-8.
    #[error("Template {path} is not valid UTF-8")]
    NotUtf8 { path: String },

    /// Placeholder substitution failed (syntax error or unknown variable).
    #[error("Failed to render template {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: tera::Error,
    },

    /// Filesystem error while reading templates or writing output.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for scaffolding operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_exists_displays_path() {
        let err = ScaffoldError::ManifestExists {
            path: PathBuf::from("demo/go.mod"),
        };
        assert_eq!(err.to_string(), "demo/go.mod already exists");
    }

    #[test]
    fn command_failed_names_command() {
        let err = ScaffoldError::CommandFailed {
            command: "go mod init demo".to_string(),
            code: Some(1),
        };
        assert!(err.to_string().contains("go mod init demo"));
    }

    #[test]
    fn template_errors_are_transparent() {
        let err: ScaffoldError = TemplateError::UnknownBundle {
            name: "gin".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown template bundle: gin");
    }
}
