use crate::document::Document;
use crate::error::XerResult;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

/// Writes the document back in export form: header, then each table's
/// `%T`, `%F` and `%R` lines in their original order, then `%E`.
///
/// Rows are written from the text they were read from, so blank fields stay
/// blank and fields missing from a short row stay missing. Rows dropped as
/// malformed are not written.
pub fn write_tsv<W: Write>(doc: &Document, writer: W) -> XerResult<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_writer(writer);

    if let Some(header) = doc.header() {
        writer.write_record(std::iter::once("ERMHDR").chain(header.fields().iter().map(String::as_str)))?;
    }

    for name in doc.table_names() {
        let Some(table) = doc.table(name) else {
            continue;
        };
        writer.write_record(["%T", name])?;
        if let Some(schema) = table.schema() {
            writer.write_record(std::iter::once("%F").chain(schema.names().iter().map(String::as_str)))?;
        }
        for record in table.iter_records() {
            let values = record.source().values();
            writer.write_record(std::iter::once("%R").chain(values.iter().map(String::as_str)))?;
        }
    }

    writer.write_record(["%E"])?;
    writer.flush()?;
    Ok(())
}
