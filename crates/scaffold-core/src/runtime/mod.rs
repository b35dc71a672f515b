//! Runtime detection
//!
//! Checks that the toolchain a generated project needs is installed.

pub mod check;

pub use check::{check_toolchain, parse_version, RuntimeInfo};
