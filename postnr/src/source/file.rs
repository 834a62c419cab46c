//! Record source reading the authority's tab-separated postal table.

use std::fs::File;
use std::path::PathBuf;

use futures::Stream;
use futures::stream;

use crate::error::{ErrorKind, PostnrResult};
use crate::postnr_error;
use crate::source::base::RecordSource;
use crate::types::ZipCodeRecord;

/// Minimum number of tab-separated fields a row must carry.
///
/// The published table has five columns (zip code, postal place,
/// municipality id, municipality name, category); only the first four are
/// consumed here.
const MIN_RECORD_FIELDS: usize = 4;

/// Record source backed by a downloaded copy of the authority's postal table.
///
/// The file is the tab-separated "Postnummer i rekkefølge" export, one row
/// per zip code, without a header row, re-encoded as UTF-8. Fetching the file
/// and discovering its download link are outside this crate; the source reads
/// a local path.
///
/// Rows are read lazily as the stream is polled, so a run interleaves parsing
/// and reconciliation record by record.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    /// Creates a source reading from the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileRecordSource {
    fn produce(self) -> impl Stream<Item = PostnrResult<ZipCodeRecord>> + Send {
        stream::iter(RecordRows::open(self.path))
    }
}

/// Iterator over parsed rows of the postal table.
///
/// Opening the file is deferred until the stream is first polled; an open
/// failure surfaces as the single item of the sequence.
enum RecordRows {
    Failed(Option<crate::error::PostnrError>),
    Rows(csv::StringRecordsIntoIter<File>),
}

impl RecordRows {
    fn open(path: PathBuf) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(&path);

        match reader {
            Ok(reader) => RecordRows::Rows(reader.into_records()),
            Err(err) => RecordRows::Failed(Some(err.into())),
        }
    }
}

impl Iterator for RecordRows {
    type Item = PostnrResult<ZipCodeRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RecordRows::Failed(err) => err.take().map(Err),
            RecordRows::Rows(rows) => {
                let row = match rows.next()? {
                    Ok(row) => row,
                    Err(err) => return Some(Err(err.into())),
                };

                if row.len() < MIN_RECORD_FIELDS {
                    return Some(Err(postnr_error!(
                        ErrorKind::InvalidRecord,
                        "postal table row has too few fields",
                        format!("expected at least {MIN_RECORD_FIELDS} fields, found {}", row.len())
                    )));
                }

                Some(Ok(ZipCodeRecord::new(
                    &row[0], &row[1], &row[2], &row[3],
                )))
            }
        }
    }
}
