//! In-memory record source for tests and development.

use futures::Stream;
use futures::stream;

use crate::error::{PostnrError, PostnrResult};
use crate::source::base::RecordSource;
use crate::types::ZipCodeRecord;

/// Record source producing a fixed in-memory sequence.
///
/// [`MemoryRecordSource`] makes reconciliation runs reproducible without any
/// file plumbing. A trailing failure can be attached to exercise the
/// upstream-unavailability path: the error is yielded after the last record,
/// as if the producer died mid-file.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSource {
    records: Vec<ZipCodeRecord>,
    trailing_error: Option<PostnrError>,
}

impl MemoryRecordSource {
    /// Creates a source yielding the given records in order.
    pub fn new(records: Vec<ZipCodeRecord>) -> Self {
        Self {
            records,
            trailing_error: None,
        }
    }

    /// Creates a source that yields the given records and then fails.
    pub fn failing_after(records: Vec<ZipCodeRecord>, error: PostnrError) -> Self {
        Self {
            records,
            trailing_error: Some(error),
        }
    }
}

impl RecordSource for MemoryRecordSource {
    fn produce(self) -> impl Stream<Item = PostnrResult<ZipCodeRecord>> + Send {
        stream::iter(
            self.records
                .into_iter()
                .map(Ok)
                .chain(self.trailing_error.into_iter().map(Err)),
        )
    }
}
