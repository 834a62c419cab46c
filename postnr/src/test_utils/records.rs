//! Record builders for tests.

use crate::source::MemoryRecordSource;
use crate::types::ZipCodeRecord;

/// Creates an incoming record from raw authority fields.
pub fn record(
    zip_id: &str,
    zip_name: &str,
    municipality_id: &str,
    municipality_name: &str,
) -> ZipCodeRecord {
    ZipCodeRecord::new(zip_id, zip_name, municipality_id, municipality_name)
}

/// Creates a memory source over the given records.
pub fn source(records: Vec<ZipCodeRecord>) -> MemoryRecordSource {
    MemoryRecordSource::new(records)
}
