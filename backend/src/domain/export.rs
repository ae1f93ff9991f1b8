//! CSV export of journal entries.
//!
//! Rows are emitted in caller order; the export handler passes the
//! `list_by_owner` result so downloads match the on-screen listing.

use crate::domain::{Entry, Error};

/// Download file name advertised in the `Content-Disposition` header.
pub const EXPORT_FILE_NAME: &str = "journal_entries.csv";

/// MIME type of the exported artifact.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

const HEADER: [&str; 6] = ["ID", "Title", "Content", "Tags", "Created At", "Updated At"];

/// Serialize entries to CSV bytes with a fixed header row.
///
/// Fields are textually rendered: timestamps as RFC 3339, tags as the raw
/// stored string. Quoting of embedded delimiters and newlines follows the
/// standard CSV rules.
///
/// # Examples
/// ```
/// use journal_backend::domain::entries_to_csv;
///
/// let bytes = entries_to_csv(&[]).unwrap();
/// assert!(String::from_utf8(bytes).unwrap().starts_with("ID,Title,Content,Tags"));
/// ```
pub fn entries_to_csv(entries: &[Entry]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|err| Error::internal(format!("failed to write CSV header: {err}")))?;

    for entry in entries {
        writer
            .write_record([
                entry.id().to_string().as_str(),
                entry.title(),
                entry.content(),
                entry.tags(),
                entry.created_at().to_rfc3339().as_str(),
                entry.updated_at().to_rfc3339().as_str(),
            ])
            .map_err(|err| Error::internal(format!("failed to write CSV row: {err}")))?;
    }

    writer
        .into_inner()
        .map_err(|err| Error::internal(format!("failed to finish CSV export: {err}")))
}
