//! Export configuration
//!
//! ```toml
//! delimiter = "@"
//!
//! [filter]
//! mode = "exclude"
//! kinds = ["Variable", "Member"]
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use graphldi_core::NodeKind;
use serde::Deserialize;

use crate::error::{ExportError, Result};

/// Whether a [`KindFilter`] lists the kinds to keep or the kinds to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Include,
    Exclude,
}

/// Restricts which node kinds may become elements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindFilter {
    pub mode: FilterMode,
    pub kinds: BTreeSet<String>,
}

impl KindFilter {
    pub fn include<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KindFilter {
            mode: FilterMode::Include,
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exclude<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KindFilter {
            mode: FilterMode::Exclude,
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether nodes of `kind` pass the filter. Matching is on the raw kind tag.
    pub fn admits(&self, kind: &NodeKind) -> bool {
        let listed = self.kinds.contains(kind.as_str());
        match self.mode {
            FilterMode::Include => listed,
            FilterMode::Exclude => !listed,
        }
    }
}

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Separator between hierarchy levels in names; declared on the root tag.
    pub delimiter: char,
    /// Optional node-kind filter; none by default.
    pub filter: Option<KindFilter>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            delimiter: '@',
            filter: None,
        }
    }
}

impl ExportConfig {
    /// Parse a TOML configuration. `origin` names the text in errors.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ExportError::Config {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ExportError::Config {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&text, &path.display().to_string())?;
        tracing::debug!("Configuration loaded from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
