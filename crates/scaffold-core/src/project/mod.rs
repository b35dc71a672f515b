//! Project configuration: the choices a wizard run accumulates and the
//! progress record the build publishes.

pub mod configuration;
pub mod library;
pub mod progress;

pub use configuration::{Configuration, TemplateHook};
pub use library::{DbLibrary, DbProvider, UnknownChoice, WebLibrary};
pub use progress::{BuildProgress, ProgressSnapshot};
