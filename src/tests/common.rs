// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared test utilities for YAML-based test cases

use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer};

/// Check computed lines against expected lines, showing a character diff of the first mismatch.
pub fn check_output(computed: &[String], expected: &[String]) -> Result<()> {
    for (n, (c, e)) in computed.iter().zip(expected.iter()).enumerate() {
        if c != e {
            bail!(
                "result {n} does not match:\n{}",
                prettydiff::diff_chars(e, c)
            );
        }
    }

    if computed.len() != expected.len() {
        bail!(
            "the number of computed results ({}) and expected results ({}) is not equal\ncomputed: {computed:?}",
            computed.len(),
            expected.len()
        );
    }

    Ok(())
}

/// Support for a single string or a list of strings in test expectations.
#[derive(PartialEq, Debug, Clone)]
pub struct StrOrVec(pub Vec<String>);

impl<'de> Deserialize<'de> for StrOrVec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Single(String),
            Many(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Single(s) => StrOrVec(vec![s]),
            Repr::Many(v) => StrOrVec(v),
        })
    }
}
