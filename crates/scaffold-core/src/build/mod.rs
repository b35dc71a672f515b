//! Build phase: turns a finished configuration into a project on disk

pub mod command;
pub mod runner;

pub use command::{CommandRunner, Invocation, SystemCommandRunner};
pub use runner::{BuildHandle, BuildReport, BuildRunner};
