use crate::config::ParseOptions;
use crate::error::{Diagnostic, ErrorKind, FieldError};
use crate::field::Field;
use crate::tokenizer::{FieldSlot, RawRow};
use chrono::NaiveDateTime;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// The textual pattern of every date-time column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Ordered field names declared by a table's `%F` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FieldSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(position);
        }
        Self { names, positions }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The raw text of one data row, kept next to the typed record so the row
/// can be written back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    schema: Arc<FieldSchema>,
    values: Vec<String>,
}

impl SourceRow {
    pub fn new(schema: Arc<FieldSchema>, values: Vec<String>) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Field texts in row order. May be shorter than the schema.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn slot(&self, field: &str) -> FieldSlot<'_> {
        let raw = self
            .schema
            .position(field)
            .and_then(|position| self.values.get(position))
            .map(String::as_str);
        FieldSlot::from_raw(raw)
    }

    pub fn raw(&self, field: &str) -> Option<&str> {
        self.schema
            .position(field)
            .and_then(|position| self.values.get(position))
            .map(String::as_str)
    }
}

/// One data row seen through its table's schema.
///
/// Typed getters return `Field::Absent` when the column is not declared or
/// the row is too short, and `Field::Blank` when it is empty.
pub struct RowView<'a> {
    table: &'a str,
    line: usize,
    schema: &'a Arc<FieldSchema>,
    row: &'a RawRow<'a>,
    options: &'a ParseOptions,
    notes: RefCell<Vec<Diagnostic>>,
}

impl<'a> RowView<'a> {
    pub fn new(
        table: &'a str,
        line: usize,
        schema: &'a Arc<FieldSchema>,
        row: &'a RawRow<'a>,
        options: &'a ParseOptions,
    ) -> Self {
        Self {
            table,
            line,
            schema,
            row,
            options,
            notes: RefCell::new(Vec::new()),
        }
    }

    pub fn table(&self) -> &str {
        self.table
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn schema(&self) -> &FieldSchema {
        self.schema
    }

    pub fn options(&self) -> &ParseOptions {
        self.options
    }

    pub fn slot(&self, field: &str) -> FieldSlot<'a> {
        match self.schema.position(field) {
            Some(position) => self.row.slot(position),
            None => FieldSlot::Missing,
        }
    }

    pub fn text(&self, field: &str) -> Field<String> {
        match self.slot(field) {
            FieldSlot::Value(raw) => Field::Value(raw.trim().to_string()),
            FieldSlot::Blank => Field::Blank,
            FieldSlot::Missing => Field::Absent,
        }
    }

    /// Flag columns keep the exported token (`Y`, `N`, or anything else).
    pub fn flag(&self, field: &str) -> Field<String> {
        self.text(field)
    }

    pub fn int(&self, field: &str) -> Result<Field<i64>, FieldError> {
        self.typed(field, |raw| {
            raw.parse::<i64>().map_err(|_| FieldError::MalformedNumber {
                field: field.to_string(),
                raw: raw.to_string(),
            })
        })
    }

    /// Primary and foreign keys.
    pub fn id(&self, field: &str) -> Result<Field<i64>, FieldError> {
        self.int(field)
    }

    pub fn float(&self, field: &str) -> Result<Field<f64>, FieldError> {
        self.typed(field, |raw| {
            parse_decimal(raw, self.options).ok_or_else(|| FieldError::MalformedNumber {
                field: field.to_string(),
                raw: raw.to_string(),
            })
        })
    }

    pub fn date(&self, field: &str) -> Result<Field<NaiveDateTime>, FieldError> {
        let parsed = self.typed(field, |raw| {
            parse_date(raw).ok_or_else(|| FieldError::MalformedDate {
                field: field.to_string(),
                raw: raw.to_string(),
            })
        });
        match parsed {
            Err(err) if self.options.is_lenient_date(self.table, field) => {
                self.note(Diagnostic::warning(
                    ErrorKind::MalformedDate,
                    self.table,
                    self.line,
                    format!("{err}; read as unset"),
                ));
                Ok(Field::Blank)
            }
            other => other,
        }
    }

    pub fn note(&self, diagnostic: Diagnostic) {
        self.notes.borrow_mut().push(diagnostic);
    }

    pub fn take_notes(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.notes.borrow_mut())
    }

    pub fn source_row(&self) -> SourceRow {
        SourceRow::new(
            Arc::clone(self.schema),
            self.row.fields().iter().map(|field| field.to_string()).collect(),
        )
    }

    fn typed<T, F>(&self, field: &str, parse: F) -> Result<Field<T>, FieldError>
    where
        F: FnOnce(&str) -> Result<T, FieldError>,
    {
        match self.slot(field) {
            FieldSlot::Value(raw) => parse(raw.trim()).map(Field::Value),
            FieldSlot::Blank => Ok(Field::Blank),
            FieldSlot::Missing => Ok(Field::Absent),
        }
    }
}

/// Parses a decimal number written with the configured separators.
pub fn parse_decimal(raw: &str, options: &ParseOptions) -> Option<f64> {
    let mut normalized = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        if Some(ch) == options.grouping_separator {
            continue;
        }
        if ch == options.decimal_separator {
            normalized.push('.');
        } else if ch == '.' && options.decimal_separator != '.' {
            return None;
        } else {
            normalized.push(ch);
        }
    }
    let value = normalized.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format_date(value: &NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}
