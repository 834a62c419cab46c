//! Trait for systems that produce the incoming record stream.

use futures::Stream;

use crate::error::PostnrResult;
use crate::types::ZipCodeRecord;

/// Trait for producers of the incoming zip code record sequence.
///
/// A [`RecordSource`] yields a lazy, finite stream with one record per zip
/// code. [`RecordSource::produce`] consumes the source, which makes the
/// single-pass contract explicit: a stream cannot be restarted within a run,
/// and a new run needs a new source.
///
/// Record production is the only place a run suspends on outside I/O. Items
/// are fallible; a source failure propagates to the consumer unmodified and
/// ends the run.
pub trait RecordSource {
    /// Consumes the source and returns the record stream.
    fn produce(self) -> impl Stream<Item = PostnrResult<ZipCodeRecord>> + Send;
}
