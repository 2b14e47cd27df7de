// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::{Error, Result};

use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::ops::Range;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
struct SourceInternal {
    file: String,
    contents: String,
    // Byte range of every line, line terminators excluded.
    lines: Vec<(usize, usize)>,
}

/// Document text together with its line table.
///
/// Cloning is cheap; the text is shared.
#[derive(Clone)]
pub struct Source {
    src: Arc<SourceInternal>,
}

impl Debug for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        self.src.file.fmt(f)
    }
}

/// A 1-based line and column.
///
/// Columns count characters (Unicode scalar values), not bytes. Hosts that report UTF-16 code
/// units, as most editors do, disagree after a character outside the Basic Multilingual Plane;
/// use [`Selection::Utf16Positions`] or [`Source::offset_at_utf16`] for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A highlighted region of the document, as an editor would report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Byte offsets into the document text.
    Bytes(Range<usize>),
    /// Start (inclusive) and end (exclusive) editor positions.
    Positions { start: Position, end: Position },
    /// Same as `Positions`, with columns counted in UTF-16 code units.
    Utf16Positions { start: Position, end: Position },
}

impl Selection {
    pub fn bytes(range: Range<usize>) -> Self {
        Selection::Bytes(range)
    }

    pub fn positions(start: Position, end: Position) -> Self {
        Selection::Positions { start, end }
    }

    pub fn utf16_positions(start: Position, end: Position) -> Self {
        Selection::Utf16Positions { start, end }
    }
}

impl Source {
    pub fn from_contents(file: String, contents: String) -> Source {
        let mut lines = vec![];
        let mut prev_ch = ' ';
        let mut prev_pos = 0;
        let mut start = 0;
        for (i, ch) in contents.char_indices() {
            if ch == '\n' {
                let end = match prev_ch {
                    '\r' => prev_pos,
                    _ => i,
                };
                lines.push((start, end));
                start = i + 1;
            }
            prev_ch = ch;
            prev_pos = i;
        }
        lines.push((start, contents.len()));

        Self {
            src: Arc::new(SourceInternal {
                file,
                contents,
                lines,
            }),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Source> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_contents(
            path.to_string_lossy().to_string(),
            contents,
        ))
    }

    pub fn file(&self) -> &str {
        &self.src.file
    }

    pub fn contents(&self) -> &str {
        &self.src.contents
    }

    pub fn num_lines(&self) -> usize {
        self.src.lines.len()
    }

    /// Text of the line at 0-based `idx`, or "" past the end.
    pub fn line(&self, idx: usize) -> &str {
        match self.src.lines.get(idx) {
            Some(&(start, end)) => &self.src.contents[start..end],
            None => "",
        }
    }

    // Byte offset and text of the line holding `pos`.
    fn line_of(&self, pos: Position) -> Result<(usize, &str)> {
        if pos.line == 0 || pos.col == 0 {
            return Err(Error::InvalidSelection(format!(
                "{}: positions are 1-based, got {pos}",
                self.src.file
            )));
        }
        match self.src.lines.get(pos.line as usize - 1) {
            Some(&(start, end)) => Ok((start, &self.src.contents[start..end])),
            None => Err(Error::InvalidSelection(format!(
                "{}: invalid line {} specified",
                self.src.file, pos.line
            ))),
        }
    }

    /// Byte offset of an editor position.
    ///
    /// The column just past the last character of a line is valid and maps to the end of
    /// that line.
    pub fn offset_at(&self, pos: Position) -> Result<usize> {
        let (start, text) = self.line_of(pos)?;
        let skip = pos.col as usize - 1;
        match text.char_indices().nth(skip) {
            Some((i, _)) => Ok(start + i),
            None if skip == text.chars().count() => Ok(start + text.len()),
            None => Err(self.error(pos, "column is past the end of the line")),
        }
    }

    /// Byte offset of an editor position whose column counts UTF-16 code units.
    pub fn offset_at_utf16(&self, pos: Position) -> Result<usize> {
        let (start, text) = self.line_of(pos)?;
        let skip = pos.col as usize - 1;
        let mut units = 0;
        for (i, ch) in text.char_indices() {
            if units == skip {
                return Ok(start + i);
            }
            if units > skip {
                return Err(self.error(pos, "column splits a surrogate pair"));
            }
            units += ch.len_utf16();
        }
        match units.cmp(&skip) {
            Ordering::Equal => Ok(start + text.len()),
            Ordering::Greater => Err(self.error(pos, "column splits a surrogate pair")),
            Ordering::Less => Err(self.error(pos, "column is past the end of the line")),
        }
    }

    /// Editor position of a byte offset. Offsets past the end clamp to the end.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.src.contents.len());
        let idx = self
            .src
            .lines
            .partition_point(|&(start, _)| start <= offset)
            .saturating_sub(1);
        let (start, end) = self.src.lines[idx];
        let upto = offset.min(end);
        let col = self.src.contents[start..upto].chars().count() + 1;
        Position::new(idx as u32 + 1, col as u32)
    }

    /// Resolve a selection into a validated span.
    pub fn span(&self, selection: &Selection) -> Result<Span> {
        let (start, end) = match selection {
            Selection::Bytes(range) => (range.start, range.end),
            Selection::Positions { start, end } => (self.offset_at(*start)?, self.offset_at(*end)?),
            Selection::Utf16Positions { start, end } => {
                (self.offset_at_utf16(*start)?, self.offset_at_utf16(*end)?)
            }
        };

        let contents = self.contents();
        if start > end {
            return Err(self.error(self.position_at(end), "selection ends before it starts"));
        }
        if end > contents.len() {
            return Err(Error::InvalidSelection(format!(
                "{}: selection {start}..{end} is past the end of the document ({} bytes)",
                self.src.file,
                contents.len()
            )));
        }
        for offset in [start, end] {
            if !contents.is_char_boundary(offset) {
                return Err(self.error(
                    self.position_at(offset),
                    "selection does not fall on a character boundary",
                ));
            }
        }

        let pos = self.position_at(start);
        Ok(Span {
            source: self.clone(),
            line: pos.line,
            col: pos.col,
            start,
            end,
        })
    }

    pub fn message(&self, pos: Position, kind: &str, msg: &str) -> String {
        if pos.line == 0 || pos.line as usize > self.src.lines.len() {
            return format!("{}: invalid line {} specified", self.src.file, pos.line);
        }

        let line_str = format!("{}", pos.line);
        let line_num_width = line_str.len() + 1;
        let col_spaces = pos.col.saturating_sub(1) as usize;

        format!(
            "\n--> {}:{}:{}\n{:<line_num_width$}|\n\
		{:<line_num_width$}| {}\n\
		{:<line_num_width$}| {:<col_spaces$}^\n\
		{}: {}",
            self.src.file,
            pos.line,
            pos.col,
            "",
            pos.line,
            self.line(pos.line as usize - 1),
            "",
            "",
            kind,
            msg
        )
    }

    pub fn error(&self, pos: Position, msg: &str) -> Error {
        Error::InvalidSelection(self.message(pos, "error", msg))
    }
}

/// A validated byte range of a [`Source`], with the position of its first character.
#[derive(Clone)]
pub struct Span {
    pub source: Source,
    pub line: u32,
    pub col: u32,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn text(&self) -> &str {
        &self.source.contents()[self.start..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    pub fn message(&self, kind: &str, msg: &str) -> String {
        self.source.message(self.position(), kind, msg)
    }

    pub fn error(&self, msg: &str) -> Error {
        self.source.error(self.position(), msg)
    }

    /// Document text with `marker` inserted immediately before this span.
    pub fn splice_before(&self, marker: &str) -> String {
        let contents = self.source.contents();
        let mut text = String::with_capacity(contents.len() + marker.len());
        text.push_str(&contents[..self.start]);
        text.push_str(marker);
        text.push_str(&contents[self.start..]);
        text
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let t = self.text().escape_debug().to_string();
        let max = 32;
        let (txt, trailer) = match t.char_indices().nth(max) {
            Some((i, _)) => (&t[..i], "..."),
            None => (t.as_str(), ""),
        };

        f.write_fmt(format_args!(
            "{}:{}:{}:{}, \"{}{}\"",
            self.line, self.col, self.start, self.end, txt, trailer
        ))
    }
}
