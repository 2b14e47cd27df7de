// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Separator placed between normalized segments.
pub const SEGMENT_SEPARATOR: &str = "_";

/// Render a path as a single identifier-like string, e.g. `["first name", "x"]` becomes
/// `FirstName_X`.
pub fn normalize<S: AsRef<str>>(path: &[S]) -> String {
    normalize_with(path, SEGMENT_SEPARATOR)
}

/// Like [`normalize`], joining segments with `separator`.
pub fn normalize_with<S: AsRef<str>>(path: &[S], separator: &str) -> String {
    path.iter()
        .map(|segment| normalize_segment(segment.as_ref()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Capitalize every word of a segment and drop the spaces between them.
///
/// Words are delimited by single spaces only. The first character of a word is mapped to
/// uppercase (possibly to more than one character) and the rest is left untouched.
pub fn normalize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for word in segment.split(' ') {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
