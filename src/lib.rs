// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod config;
mod error;
mod finder;
mod locator;
mod normalize;
mod schema;
mod source;

pub use config::{Config, SELECTION_MARKER};
pub use error::{Error, Result};
pub use finder::{all_paths, find_paths, find_paths_in, Path};
pub use locator::{Candidate, Locator, Outcome};
pub use normalize::{normalize, normalize_segment, normalize_with, SEGMENT_SEPARATOR};
pub use schema::{RootDocument, SchemaNode, CONTENT_KEY};
pub use source::{Position, Selection, Source, Span};
