//! File helpers around [`Document`](crate::Document). The parser itself
//! never touches the filesystem.

mod file;
#[cfg(feature = "dataframe")]
mod frame;
mod tsv;

pub use file::{load_calendars_from_json, load_document, save_calendars_to_json, save_document_to_tsv};
#[cfg(feature = "dataframe")]
pub use frame::tasks_dataframe;
pub use tsv::write_tsv;
