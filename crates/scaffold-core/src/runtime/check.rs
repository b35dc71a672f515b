//! Toolchain detection before the wizard starts

use crate::toolchain::Toolchain;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// Warning shown when the toolchain is missing; the build will fail at
    /// module init without it, but the wizard itself still works
    pub fn advisory(&self, docs_url: &str) -> Option<String> {
        if self.available {
            return None;
        }
        Some(format!(
            "{} was not found on PATH (install from {})",
            self.name, docs_url
        ))
    }
}

/// Check if the toolchain binary runs
pub fn check_toolchain<T: Toolchain>(toolchain: &T) -> RuntimeInfo {
    let version = toolchain.version();
    let output = Command::new(&version.program).args(&version.args).output();

    match output {
        Ok(out) if out.status.success() => {
            let raw = String::from_utf8_lossy(&out.stdout);
            RuntimeInfo {
                name: toolchain.display_name(),
                version: Some(parse_version(&raw).unwrap_or_else(|| raw.trim().to_string())),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: toolchain.display_name(),
            version: None,
            available: false,
        },
    }
}

/// Extracts `1.22.1` from `go version go1.22.1 linux/amd64`
pub fn parse_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .find_map(|word| {
            word.strip_prefix("go")
                .filter(|v| v.starts_with(|c: char| c.is_ascii_digit()))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_version() {
        assert_eq!(
            parse_version("go version go1.22.1 linux/amd64\n").as_deref(),
            Some("1.22.1")
        );
        assert_eq!(
            parse_version("go version devel go1.23-abc123 darwin/arm64").as_deref(),
            Some("1.23-abc123")
        );
        assert_eq!(parse_version("command not found"), None);
    }

    #[test]
    fn test_advisory_only_when_missing() {
        let missing = RuntimeInfo {
            name: "Go",
            version: None,
            available: false,
        };
        let warning = missing.advisory("https://go.dev/doc/install").unwrap();
        assert!(warning.starts_with("Go was not found"));

        let found = RuntimeInfo {
            name: "Go",
            version: Some("1.22.1".to_string()),
            available: true,
        };
        assert_eq!(found.advisory("https://go.dev/doc/install"), None);
    }
}
