// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::config::Config;
use crate::error::Result;
use crate::finder::{find_paths, Path};
use crate::normalize::normalize_with;
use crate::schema::RootDocument;
use crate::source::{Selection, Source};

use log::{debug, info, warn};

/// One path offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub detail: String,
}

impl Candidate {
    fn new(label: String) -> Self {
        let detail = format!("Click to copy: {label}");
        Self { label, detail }
    }
}

/// Result of a lookup, for the host to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A single path, ready to be copied.
    Resolved(String),
    /// Several paths; the user picks one with [`Outcome::pick`].
    Candidates(Vec<Candidate>),
    /// Nothing carries the name.
    NotFound(String),
    /// The user gave no name or made no choice. Nothing is reported.
    Cancelled,
}

impl Outcome {
    /// Apply the user's choice to a candidate list. Other outcomes are returned unchanged.
    pub fn pick(self, choice: Option<usize>) -> Outcome {
        match self {
            Outcome::Candidates(mut candidates) => match choice {
                Some(idx) if idx < candidates.len() => {
                    Outcome::Resolved(candidates.swap_remove(idx).label)
                }
                _ => Outcome::Cancelled,
            },
            other => other,
        }
    }

    pub fn resolved(&self) -> Option<&str> {
        match self {
            Outcome::Resolved(path) => Some(path),
            _ => None,
        }
    }

    /// Notification shown to the user, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Resolved(path) => Some(format!("Copied to clipboard: {path}")),
            Outcome::NotFound(name) => Some(format!("No attribute found with name: {name}")),
            Outcome::Candidates(_) | Outcome::Cancelled => None,
        }
    }
}

/// Finds where a field lives in a form document.
///
/// Two kinds of lookups are offered. [`Locator::locate_name`] searches for a typed name and
/// may return several candidates. [`Locator::locate_selection`] searches for the key under an
/// editor selection and always resolves to a single path.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    config: Config,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a document. A document that fails to parse cannot be searched.
    pub fn load(&self, text: &str) -> Result<RootDocument> {
        RootDocument::from_json_str(text, &self.config.content_key)
            .inspect_err(|e| warn!("{e}"))
    }

    /// Raw matching paths for `name` in `text`.
    pub fn find(&self, text: &str, name: &str) -> Result<Vec<Path>> {
        let document = self.load(text)?;
        Ok(find_paths(&document, name))
    }

    pub fn render<S: AsRef<str>>(&self, path: &[S]) -> String {
        normalize_with(path, &self.config.separator)
    }

    /// Look up a name typed by the user.
    pub fn locate_name(&self, text: &str, name: &str) -> Result<Outcome> {
        if name.is_empty() {
            debug!("no attribute name given");
            return Ok(Outcome::Cancelled);
        }

        let paths = self.find(text, name)?;
        info!("{} path(s) for attribute {name:?}", paths.len());

        Ok(match paths.len() {
            0 => Outcome::NotFound(name.to_string()),
            1 if self.config.auto_pick_single => Outcome::Resolved(self.render(&paths[0])),
            _ => Outcome::Candidates(
                paths
                    .iter()
                    .map(|path| Candidate::new(self.render(path)))
                    .collect(),
            ),
        })
    }

    /// Look up the key under a selection, or a typed name when nothing is selected.
    ///
    /// `ask_name` is only called for an empty selection. Returning `None` cancels the lookup.
    pub fn locate<F>(&self, source: &Source, selection: &Selection, ask_name: F) -> Result<Outcome>
    where
        F: FnOnce() -> Option<String>,
    {
        if !source.span(selection)?.is_empty() {
            return self.locate_selection(source, selection);
        }

        debug!("nothing selected in {}, asking for a name", source.file());
        match ask_name() {
            Some(name) => self.locate_name(source.contents(), &name),
            None => Ok(Outcome::Cancelled),
        }
    }

    /// Look up the key under a selection.
    ///
    /// The marker is inserted into a copy of the document just before the selection, which
    /// renames exactly the selected key. The copy is parsed and searched for the renamed key, and
    /// the first path found is rendered with the marker removed. A selection that does not cover
    /// the inside of a key usually leaves the copy unparsable, which is reported as a parse
    /// error.
    pub fn locate_selection(&self, source: &Source, selection: &Selection) -> Result<Outcome> {
        let span = source.span(selection)?;
        if span.is_empty() {
            return Err(span.error("selection is empty"));
        }

        let marker = &self.config.selection_marker;
        let selected = span.text();
        debug!("selection {span:?}");

        let document = self.load(&span.splice_before(marker))?;
        let paths = find_paths(&document, &format!("{marker}{selected}"));
        info!("{} path(s) for selection {selected:?}", paths.len());

        Ok(match paths.first() {
            None => {
                debug!("{}", span.message("note", "selection is not a key"));
                Outcome::NotFound(selected.to_string())
            }
            Some(path) => Outcome::Resolved(self.render(path).replace(marker.as_str(), "")),
        })
    }
}
