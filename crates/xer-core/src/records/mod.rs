//! Typed rows of the tables the reader understands, plus [`GenericRecord`]
//! for every other table.

mod activity_code;
mod calendar;
mod project;
mod resource;
mod task;

pub use activity_code::TaskActivityCodeAssignment;
pub use calendar::Calendar;
pub use project::{Project, Wbs};
pub use resource::{Resource, ResourceCategory, ResourceCurve, TaskResourceAssignment};
pub use task::{Task, TaskPredecessor};

use crate::decode::{RowView, SourceRow};
use crate::error::FieldError;
use crate::tokenizer::FieldSlot;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;

/// Behaviour shared by every decoded row, typed or generic.
pub trait Record: Any + Debug + Send + Sync {
    fn table_name(&self) -> &str;

    fn primary_key(&self) -> Option<i64>;

    /// Value of a foreign-key column, `None` when unset or not a key of
    /// this record type.
    fn foreign_key(&self, field: &str) -> Option<i64>;

    /// The raw row this record was decoded from.
    fn source(&self) -> &SourceRow;

    fn as_any(&self) -> &dyn Any;
}

impl dyn Record {
    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Static key layout of a typed table.
pub trait TableSchema {
    const TABLE: &'static str;
    const PRIMARY_KEY: Option<&'static str>;
    const FOREIGN_KEYS: &'static [&'static str];
}

pub trait Decode: Record + Sized {
    /// Builds a record from one row. A strict field that fails to decode
    /// fails the whole row; softer problems go to [`RowView::note`].
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError>;
}

macro_rules! impl_record {
    (@key_name) => { None };
    (@key_name $pk:ident) => { Some(stringify!($pk)) };

    ($ty:ty, table = $table:literal, $(primary_key = $pk:ident,)? foreign_keys = [$($fk:ident),* $(,)?]) => {
        impl $crate::records::Record for $ty {
            fn table_name(&self) -> &str {
                $table
            }

            fn primary_key(&self) -> Option<i64> {
                let key: Option<i64> = None $(.or(self.$pk.get()))?;
                key
            }

            fn foreign_key(&self, field: &str) -> Option<i64> {
                match field {
                    $(stringify!($fk) => self.$fk.get(),)*
                    _ => None,
                }
            }

            fn source(&self) -> &$crate::decode::SourceRow {
                &self.source
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl $crate::records::TableSchema for $ty {
            const TABLE: &'static str = $table;
            const PRIMARY_KEY: Option<&'static str> = impl_record!(@key_name $($pk)?);
            const FOREIGN_KEYS: &'static [&'static str] = &[$(stringify!($fk)),*];
        }
    };
}

pub(crate) use impl_record;

/// A row of a table with no typed definition.
///
/// The first column is the primary key when its name ends in `_id` and its
/// value is an integer; every other integer `*_id` column is a foreign key.
/// Tables in [`COMPOSITE_KEY_TABLES`] have no primary key and index every
/// `*_id` column, the first one included.
#[derive(Debug, Clone)]
pub struct GenericRecord {
    table: String,
    primary_key: Option<i64>,
    foreign_keys: HashMap<String, i64>,
    source: SourceRow,
}

/// Untyped tables keyed by a combination of columns. Their leading `*_id`
/// column repeats across valid rows.
pub const COMPOSITE_KEY_TABLES: &[&str] = &["UDFVALUE", "PROJPCAT", "TASKFIN", "TRSRCFIN"];

impl GenericRecord {
    /// The primary-key column of a generic table with these fields.
    pub fn key_field<'n>(table: &str, names: &'n [String]) -> Option<&'n str> {
        if COMPOSITE_KEY_TABLES.contains(&table) {
            return None;
        }
        names
            .first()
            .map(String::as_str)
            .filter(|name| is_id_column(name))
    }

    /// Columns indexed as foreign keys for a generic table with these fields.
    pub fn foreign_key_fields(table: &str, names: &[String]) -> Vec<String> {
        let skip = usize::from(Self::key_field(table, names).is_some());
        names
            .iter()
            .skip(skip)
            .filter(|name| is_id_column(name))
            .cloned()
            .collect()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.source.slot(field).as_str().map(str::trim)
    }

    pub fn foreign_keys(&self) -> &HashMap<String, i64> {
        &self.foreign_keys
    }
}

fn is_id_column(name: &str) -> bool {
    name.len() > 3 && name.ends_with("_id")
}

fn integer(slot: FieldSlot<'_>) -> Option<i64> {
    slot.as_str().and_then(|raw| raw.trim().parse().ok())
}

impl Record for GenericRecord {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn primary_key(&self) -> Option<i64> {
        self.primary_key
    }

    fn foreign_key(&self, field: &str) -> Option<i64> {
        self.foreign_keys.get(field).copied()
    }

    fn source(&self) -> &SourceRow {
        &self.source
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Decode for GenericRecord {
    fn decode(row: &RowView<'_>) -> Result<Self, FieldError> {
        let names = row.schema().names();
        let primary_key =
            GenericRecord::key_field(row.table(), names).and_then(|field| integer(row.slot(field)));
        let foreign_keys = GenericRecord::foreign_key_fields(row.table(), names)
            .into_iter()
            .filter_map(|field| integer(row.slot(&field)).map(|id| (field, id)))
            .collect();

        Ok(Self {
            table: row.table().to_string(),
            primary_key,
            foreign_keys,
            source: row.source_row(),
        })
    }
}
