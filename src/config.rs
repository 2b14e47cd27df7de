// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::{Error, Result};
use crate::normalize::SEGMENT_SEPARATOR;
use crate::schema::CONTENT_KEY;

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Marker inserted before a selection so that the selected key can be told apart from other
/// keys with the same name.
pub const SELECTION_MARKER: &str = ":";

/// Options for [`crate::Locator`].
///
/// Every field has a default, so a configuration file only lists what it changes:
///
/// ```yaml
/// content_key: Body
/// auto_pick_single: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Top-level key holding the schema tree.
    pub content_key: String,
    /// Placed between normalized segments.
    pub separator: String,
    /// Inserted before a selection; removed again from the rendered path.
    pub selection_marker: String,
    /// Resolve a prompt directly when it matches a single path instead of offering a choice.
    pub auto_pick_single: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_key: CONTENT_KEY.to_string(),
            separator: SEGMENT_SEPARATOR.to_string(),
            selection_marker: SELECTION_MARKER.to_string(),
            auto_pick_single: false,
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::check(serde_json::from_str(s).map_err(|e| Error::Config(format!("{e}")))?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Self::check(serde_yaml::from_str(s).map_err(|e| Error::Config(format!("{e}")))?)
    }

    /// Load a configuration file. `.yaml`/`.yml` files need the `yaml` feature; anything else is
    /// read as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            #[cfg(not(feature = "yaml"))]
            Some("yaml" | "yml") => Err(Error::Config(format!(
                "{} is a YAML file; enable the `yaml` feature to load it",
                path.display()
            ))),
            _ => Self::from_json_str(&contents),
        }
    }

    fn check(self) -> Result<Self> {
        if self.selection_marker.is_empty() {
            return Err(Error::Config("selection_marker must not be empty".to_string()));
        }
        Ok(self)
    }
}
