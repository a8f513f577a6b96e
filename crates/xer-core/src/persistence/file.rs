use super::tsv::write_tsv;
use crate::calendar::WorkCalendar;
use crate::config::ParseOptions;
use crate::document::Document;
use crate::error::XerResult;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Reads and parses an export file. Bytes that are not valid UTF-8 are
/// replaced rather than rejected.
pub fn load_document<P: AsRef<Path>>(path: P, options: ParseOptions) -> XerResult<Document> {
    let bytes = std::fs::read(path.as_ref())?;
    let text = String::from_utf8_lossy(&bytes);
    tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "loading export");
    Document::parse_with(&text, options)
}

pub fn save_document_to_tsv<P: AsRef<Path>>(doc: &Document, path: P) -> XerResult<()> {
    let file = File::create(path)?;
    write_tsv(doc, file)
}

/// Writes every decoded calendar, keyed by `clndr_id`. Calendars without an
/// id are skipped.
pub fn save_calendars_to_json<P: AsRef<Path>>(doc: &Document, path: P) -> XerResult<()> {
    let snapshot: BTreeMap<i64, &WorkCalendar> = doc
        .calendars()
        .iter()
        .filter_map(|calendar| Some((calendar.clndr_id.get()?, &calendar.work_calendar)))
        .collect();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_calendars_from_json<P: AsRef<Path>>(path: P) -> XerResult<BTreeMap<i64, WorkCalendar>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}
