//! Line classification for XER exports.
//!
//! Each line starts with a tag: `ERMHDR` for the export header, `%T` for a
//! table name, `%F` for the table's field names, `%R` for a data row and
//! `%E` for the end of the export. Fields are separated by a single tab.

use std::iter::Enumerate;
use std::str::Lines;

pub const FIELD_SEPARATOR: char = '\t';

/// What occupies one position of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot<'a> {
    /// The row ended before this position.
    Missing,
    /// Present but empty or whitespace only.
    Blank,
    Value(&'a str),
}

impl<'a> FieldSlot<'a> {
    pub fn from_raw(raw: Option<&'a str>) -> Self {
        match raw {
            None => FieldSlot::Missing,
            Some(text) if text.trim().is_empty() => FieldSlot::Blank,
            Some(text) => FieldSlot::Value(text),
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldSlot::Value(text) => Some(text),
            FieldSlot::Missing | FieldSlot::Blank => None,
        }
    }
}

/// The fields of one `%R` line, tag excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow<'a> {
    fields: Vec<&'a str>,
}

impl<'a> RawRow<'a> {
    pub fn new(fields: Vec<&'a str>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    pub fn slot(&self, position: usize) -> FieldSlot<'a> {
        FieldSlot::from_raw(self.fields.get(position).copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    ExportHeader(Vec<&'a str>),
    TableHeader(&'a str),
    FieldHeader(Vec<&'a str>),
    DataRow(RawRow<'a>),
    End,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based.
    pub number: usize,
    pub kind: LineKind<'a>,
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.split(FIELD_SEPARATOR);
    let tag = parts.next().unwrap_or("").trim_start_matches('\u{feff}').trim();

    match tag {
        "ERMHDR" => LineKind::ExportHeader(parts.collect()),
        "%T" => match parts.next().map(str::trim) {
            Some(name) if !name.is_empty() => LineKind::TableHeader(name),
            _ => LineKind::Other,
        },
        "%F" => LineKind::FieldHeader(parts.map(str::trim).collect()),
        "%R" => LineKind::DataRow(RawRow::new(parts.collect())),
        "%E" => LineKind::End,
        _ => LineKind::Other,
    }
}

/// Lazy, single-pass iterator over the classified lines of an export.
pub struct Tokenizer<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|(index, raw)| Line {
            number: index + 1,
            kind: classify_line(raw),
        })
    }
}
