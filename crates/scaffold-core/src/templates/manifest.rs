//! Bundle manifest types and parsing
//!
//! `bundles.yaml` at the root of a template source declares the bundles and the
//! rule table that selects them:
//!
//! ```yaml
//! bundles:
//!   - id: gin-lean
//!     sources:
//!       - root: gin
//!         include: [pkg/httphelpers, pkg/taskutils]
//!         flatten_into: pkg
//! rules:
//!   - web: gin
//!     db: unset
//!     bundles: [gin-lean]
//! ```

use crate::error::TemplateError;
use crate::project::{DbLibrary, DbProvider, WebLibrary};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Suffix stripped from template file names on output
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Root manifest listing bundles and the rules that select them
#[derive(Debug, Clone, Deserialize)]
pub struct BundleManifest {
    #[serde(default)]
    pub bundles: Vec<Bundle>,

    /// Evaluated in order; every matching row contributes its bundles
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A named set of template files selected as a unit
#[derive(Debug, Clone, Deserialize)]
pub struct Bundle {
    pub id: String,

    #[serde(default)]
    pub description: String,

    pub sources: Vec<BundleSource>,
}

/// One directory of a bundle and how its files map onto the project tree
#[derive(Debug, Clone, Deserialize)]
pub struct BundleSource {
    /// Directory inside the template source; stripped from output paths
    pub root: String,

    /// Subpaths of `root` to take (all files when empty)
    #[serde(default)]
    pub include: Vec<String>,

    /// Write every file as `<flatten_into>/<parent dir name>/<file>` instead of
    /// keeping the path below `root`
    #[serde(default)]
    pub flatten_into: Option<String>,
}

/// Destination convention of a [`BundleSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout<'a> {
    /// Path below the root is kept as-is
    Full,
    /// Everything lands under one fixed directory
    Flat { into: &'a str },
}

impl BundleSource {
    pub fn layout(&self) -> Layout<'_> {
        match &self.flatten_into {
            Some(into) => Layout::Flat { into },
            None => Layout::Full,
        }
    }

    /// Path of `file` below the root, if the file belongs to this source
    fn relative<'f>(&self, file: &'f str) -> Option<&'f str> {
        let rest = file.strip_prefix(self.root.trim_end_matches('/'))?;
        let rest = rest.strip_prefix('/')?;
        let included = self.include.is_empty()
            || self.include.iter().any(|inc| {
                let inc = inc.trim_matches('/');
                rest == inc || rest.strip_prefix(inc).is_some_and(|r| r.starts_with('/'))
            });
        included.then_some(rest)
    }

    /// Files of `all` that belong to this source, in the order given
    pub fn files<'f>(&self, all: &'f [String]) -> Vec<&'f str> {
        all.iter()
            .map(String::as_str)
            .filter(|f| self.relative(f).is_some())
            .collect()
    }

    /// Output path for `file`, relative to the project directory
    pub fn destination(&self, file: &str) -> Option<String> {
        let relative = self.relative(file)?;
        let relative = relative.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(relative);
        let dest = match self.layout() {
            Layout::Full => relative.to_string(),
            Layout::Flat { into } => {
                let into = into.trim_end_matches('/');
                match relative.rsplit_once('/') {
                    Some((parent, file_name)) => {
                        let parent = parent.rsplit('/').next().unwrap_or(parent);
                        format!("{}/{}/{}", into, parent, file_name)
                    }
                    None => format!("{}/{}", into, relative),
                }
            }
        };
        Some(dest)
    }
}

/// One row of the selection table
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub web: Pattern<WebLibrary>,

    #[serde(default)]
    pub db: Pattern<DbLibrary>,

    /// Matched against the resolved provider (baseline applied)
    #[serde(default)]
    pub provider: Pattern<DbProvider>,

    pub bundles: Vec<String>,
}

impl Rule {
    pub fn matches(&self, web: WebLibrary, db: DbLibrary, provider: DbProvider) -> bool {
        self.web.matches(web) && self.db.matches(db) && self.provider.matches(provider)
    }
}

/// Match on one field of a rule: `any`, `set`, `unset` or a specific id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern<T> {
    #[default]
    Any,
    Set,
    Unset,
    Is(T),
}

impl<T: Copy + PartialEq + Default> Pattern<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Set => value != T::default(),
            Pattern::Unset => value == T::default(),
            Pattern::Is(expected) => value == *expected,
        }
    }
}

impl<T: FromStr> FromStr for Pattern<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" | "*" => Ok(Pattern::Any),
            "set" => Ok(Pattern::Set),
            "unset" => Ok(Pattern::Unset),
            other => other.parse().map(Pattern::Is),
        }
    }
}

impl<'de, T> Deserialize<'de> for Pattern<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl BundleManifest {
    pub fn parse(path: &str, content: &str) -> Result<Self, TemplateError> {
        serde_yaml::from_str(content).map_err(|source| TemplateError::ManifestParse {
            path: path.to_string(),
            source,
        })
    }

    pub fn bundle(&self, id: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.id == id)
    }

    /// Check that ids are unique, rules only name declared bundles, and every
    /// source and include path has files behind it
    pub fn validate(&self, files: &[String]) -> Result<(), TemplateError> {
        let invalid = |message: String| TemplateError::InvalidManifest { message };

        let mut seen = HashSet::new();
        for bundle in &self.bundles {
            if !seen.insert(bundle.id.as_str()) {
                return Err(invalid(format!("bundle '{}' is declared twice", bundle.id)));
            }
            if bundle.sources.is_empty() {
                return Err(invalid(format!("bundle '{}' has no sources", bundle.id)));
            }
            for source in &bundle.sources {
                // name the first empty include before judging the source as a whole
                for include in &source.include {
                    let single = BundleSource {
                        root: source.root.clone(),
                        include: vec![include.clone()],
                        flatten_into: None,
                    };
                    if single.files(files).is_empty() {
                        return Err(invalid(format!(
                            "bundle '{}': nothing matches '{}/{}'",
                            bundle.id, source.root, include
                        )));
                    }
                }
                if source.files(files).is_empty() {
                    return Err(invalid(format!(
                        "bundle '{}': no templates under '{}'",
                        bundle.id, source.root
                    )));
                }
            }
        }

        for (i, rule) in self.rules.iter().enumerate() {
            for id in &rule.bundles {
                if !seen.contains(id.as_str()) {
                    return Err(invalid(format!("rule {} names unknown bundle '{}'", i + 1, id)));
                }
            }
        }

        Ok(())
    }
}
