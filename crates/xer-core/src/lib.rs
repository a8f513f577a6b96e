pub mod analysis;
pub mod calendar;
pub mod config;
pub mod decode;
pub mod document;
pub mod error;
pub mod field;
pub mod graph;
pub mod persistence;
pub mod records;
pub mod resolve;
pub mod table;
pub mod tokenizer;

pub use analysis::{TaskDuration, UnresolvedReference, task_durations, unresolved_references};
pub use calendar::{CalendarDataError, HourCounts, WorkCalendar, WorkInterval};
pub use config::{DEFAULT_HOURS_PER_DAY, LenientField, ParseOptions};
pub use decode::{FieldSchema, SourceRow};
pub use document::{Document, DocumentBuilder, ExportHeader};
pub use error::{Diagnostic, ErrorKind, FieldError, Severity, XerError, XerResult};
pub use field::Field;
pub use graph::{TaskDag, TaskLink};
#[cfg(feature = "dataframe")]
pub use persistence::tasks_dataframe;
pub use persistence::{
    load_calendars_from_json, load_document, save_calendars_to_json, save_document_to_tsv,
    write_tsv,
};
pub use records::{
    Calendar, GenericRecord, Project, Record, Resource, ResourceCategory, ResourceCurve, Task,
    TaskActivityCodeAssignment, TaskPredecessor, TaskResourceAssignment, Wbs,
};
pub use resolve::Constraint;
pub use table::{Table, TableRegistry, TableView};
pub use tokenizer::{Line, LineKind, Tokenizer};
