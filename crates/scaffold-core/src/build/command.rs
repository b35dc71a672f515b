//! External command execution

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs commands to completion; only the exit status is observed
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation, dir: &Path) -> Result<()>;
}

/// Runs commands with [`std::process::Command`], output discarded
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation, dir: &Path) -> Result<()> {
        tracing::debug!(command = %invocation, dir = %dir.display(), "running");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ScaffoldError::CommandSpawn {
                command: invocation.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            tracing::warn!(command = %invocation, code = ?status.code(), "command failed");
            Err(ScaffoldError::CommandFailed {
                command: invocation.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    /// Records every command line and fails the ones it was told to
    #[derive(Debug, Clone, Default)]
    pub struct RecordingRunner {
        pub log: Arc<Mutex<Vec<String>>>,
        failing: HashSet<String>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(mut self, command: &str) -> Self {
            self.failing.insert(command.to_string());
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation, _dir: &Path) -> Result<()> {
            let line = invocation.to_string();
            self.log.lock().unwrap().push(line.clone());
            if self.failing.contains(&line) {
                return Err(ScaffoldError::CommandFailed {
                    command: line,
                    code: Some(1),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("go", ["mod", "init", "demo"]);
        assert_eq!(inv.to_string(), "go mod init demo");
        assert_eq!(Invocation::new("go", Vec::<String>::new()).to_string(), "go");
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("definitely-not-a-real-binary-5f3a", ["version"]);
        let err = SystemCommandRunner.run(&inv, dir.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::CommandSpawn { .. }));
    }
}
