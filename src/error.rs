// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

/// Errors surfaced by document loading and path lookup.
///
/// A target that matches nothing is not an error; see [`crate::Outcome::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document (or the document rewritten for a selection) is not valid JSON.
    #[error("Error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Selection range cannot be applied to the document.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    /// Configuration text could not be deserialized.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Reading a document or configuration file failed.
    #[error("Failed to read {}. {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
