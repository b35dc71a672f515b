//! go-scaffold core - wizard engine, template selection and build runner
//!
//! This library holds everything behind the `go-scaffold` binary. Apart from
//! the optional [`tui`] module it never touches the terminal, so every piece can
//! be driven from tests.
//!
//! # Architecture
//!
//! - **Wizard** - [`wizard::Navigator`] walks the steps and fills a
//!   [`project::Configuration`]
//! - **Templates** - [`templates::Catalog`] picks bundles for a configuration and
//!   renders them into the project directory
//! - **Build** - [`build::BuildRunner`] creates the skeleton, runs the
//!   [`toolchain::Toolchain`] commands and publishes progress
//! - **TUI** - ratatui front end over the wizard and the progress record
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the ratatui/crossterm terminal front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use go_scaffold_core::{BuildRunner, Catalog, Configuration, GoToolchain, WebLibrary};
//!
//! let catalog = Catalog::embedded()?;
//! let mut config = Configuration::new("shop");
//! config.web_library = WebLibrary::Gin;
//! config.template_hook = catalog.hook_for(&config);
//!
//! let report = BuildRunner::system(GoToolchain, "shop").run(&config)?;
//! ```

pub mod build;
pub mod error;
pub mod project;
pub mod runtime;
pub mod templates;
pub mod toolchain;
pub mod wizard;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use build::{BuildHandle, BuildReport, BuildRunner, CommandRunner, Invocation};
pub use error::{Result, ScaffoldError, TemplateError};
pub use project::{BuildProgress, Configuration, DbLibrary, DbProvider, TemplateHook, WebLibrary};
pub use runtime::{check_toolchain, RuntimeInfo};
pub use templates::{Catalog, TemplateSource};
pub use toolchain::{GoToolchain, Toolchain};
pub use wizard::{Flow, Input, Navigator};

#[cfg(feature = "tui")]
pub use tui::run;
