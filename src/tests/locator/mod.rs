// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::panic, clippy::unwrap_used, clippy::print_stdout)] // test harness asserts and unwraps

use std::env;

use crate::tests::common::{check_output, StrOrVec};
use crate::*;

use anyhow::{anyhow, bail, Result};
use serde::Deserialize;
use test_generator::test_resources;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TestCase {
    note: String,
    /// Document as structured data. Pretty-printed to JSON before the lookup.
    document: Option<serde_json::Value>,
    /// Document as raw text, for inputs that are not valid JSON.
    text: Option<String>,
    config: Option<Config>,

    /// Name lookup.
    target: Option<String>,
    /// Selection lookup: the selected text, located in the document text...
    /// An empty selection falls back to a name lookup of `target`.
    select: Option<String>,
    /// ...at this 1-based occurrence (default 1).
    occurrence: Option<usize>,
    /// Candidate to pick, 1-based.
    pick: Option<usize>,

    want_paths: Option<Vec<Vec<String>>>,
    want_candidates: Option<StrOrVec>,
    want_resolved: Option<String>,
    want_not_found: Option<bool>,
    want_cancelled: Option<bool>,
    error: Option<String>,
    skip: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

fn document_text(case: &TestCase) -> Result<String> {
    match (&case.document, &case.text) {
        (Some(document), None) => Ok(serde_json::to_string_pretty(document)?),
        (None, Some(text)) => Ok(text.clone()),
        _ => bail!("exactly one of document or text must be specified"),
    }
}

fn selection_of(text: &str, selected: &str, occurrence: usize) -> Result<Selection> {
    let start = text
        .match_indices(selected)
        .nth(occurrence.saturating_sub(1))
        .map(|(idx, _)| idx)
        .ok_or_else(|| anyhow!("occurrence {occurrence} of {selected:?} not in document"))?;
    Ok(Selection::bytes(start..start + selected.len()))
}

fn eval_case(case: &TestCase) -> Result<Outcome, Error> {
    let text = document_text(case).map_err(|e| Error::Config(e.to_string()))?;
    let locator = Locator::with_config(case.config.clone().unwrap_or_default());

    match (&case.target, &case.select) {
        (Some(target), None) => {
            if let Some(want_paths) = &case.want_paths {
                let paths = locator.find(&text, target)?;
                assert_eq!(&paths, want_paths, "raw paths for {target:?}");
            }
            let outcome = locator.locate_name(&text, target)?;
            Ok(match case.pick {
                Some(n) => outcome.pick(n.checked_sub(1)),
                None => outcome,
            })
        }
        (target, Some(selected)) => {
            let source = Source::from_contents("case.json".to_string(), text.clone());
            let selection = selection_of(&text, selected, case.occurrence.unwrap_or(1))
                .map_err(|e| Error::InvalidSelection(e.to_string()))?;
            match target {
                // The target is the name typed when the selection turns out to be empty.
                Some(target) => {
                    let outcome = locator.locate(&source, &selection, || {
                        (!target.is_empty()).then(|| target.clone())
                    })?;
                    Ok(match case.pick {
                        Some(n) => outcome.pick(n.checked_sub(1)),
                        None => outcome,
                    })
                }
                None => locator.locate_selection(&source, &selection),
            }
        }
        (None, None) => Err(Error::Config(
            "target or select must be specified".to_string(),
        )),
    }
}

fn check_outcome(case: &TestCase, outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Resolved(path) => match &case.want_resolved {
            Some(want) => check_output(&[path], std::slice::from_ref(want)),
            None => bail!("lookup resolved to {path:?}"),
        },
        Outcome::Candidates(candidates) => match &case.want_candidates {
            Some(want) => {
                let labels: Vec<String> = candidates.into_iter().map(|c| c.label).collect();
                check_output(&labels, &want.0)
            }
            None => bail!("lookup produced candidates {candidates:?}"),
        },
        Outcome::NotFound(name) if case.want_not_found == Some(true) => {
            std::println!("not found: {name}");
            Ok(())
        }
        Outcome::NotFound(name) => bail!("nothing found for {name:?}"),
        Outcome::Cancelled if case.want_cancelled == Some(true) => Ok(()),
        Outcome::Cancelled => bail!("lookup was cancelled"),
    }
}

fn yaml_test_impl(file: &str) -> Result<()> {
    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    std::println!("running {file}");

    for case in test.cases {
        std::print!("case {} ", case.note);
        if case.skip == Some(true) {
            std::println!("skipped");
            continue;
        }

        let expectations = [
            case.want_candidates.is_some(),
            case.want_resolved.is_some(),
            case.want_not_found == Some(true),
            case.want_cancelled == Some(true),
            case.error.is_some(),
        ];
        if expectations.iter().filter(|e| **e).count() != 1 {
            panic!("exactly one expectation must be specified in test case.");
        }

        match eval_case(&case) {
            Ok(outcome) => {
                if case.error.is_some() {
                    bail!("lookup succeeded with {outcome:?} and did not produce any errors");
                }
                check_outcome(&case, outcome)?;
            }
            Err(actual) => match &case.error {
                Some(expected) => {
                    let actual = actual.to_string();
                    if !actual.contains(expected) {
                        bail!(
                            "Error message\n`{}\n`\ndoes not contain `{}`",
                            actual,
                            expected
                        );
                    }
                    std::println!("{actual}");
                }
                _ => return Err(actual.into()),
            },
        }

        std::println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{e}");
        }
    }
}

#[test]
fn yaml_test_basic() -> Result<()> {
    yaml_test("tests/locator/cases/find/basic.yaml")
}

#[test]
#[ignore = "intended for running a single case file: cargo test one_yaml -- --ignored <file>.yaml"]
fn one_yaml() -> Result<()> {
    let mut file = String::default();

    for a in env::args() {
        if a.ends_with(".yaml") {
            file = a;
        }
    }

    if file.is_empty() {
        bail!("missing <yaml-test-file>");
    }

    yaml_test(file.as_str())
}

#[test_resources("tests/locator/cases/**/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}
