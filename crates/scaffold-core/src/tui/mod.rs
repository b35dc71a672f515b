//! Terminal UI for the wizard and the build progress screen

pub mod app;
pub mod keys;
mod screens;

pub use app::{restore_terminal, run, TuiOutcome};
