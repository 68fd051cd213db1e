//! Merge: combine the original record with freshly parsed fields.

use crate::event::Record;
use crate::parser::ParsedFields;

/// Build the output record.
///
/// With `reserve_data` the original record is kept and parsed fields are
/// laid over it (parsed wins on collision, new keys are appended). Without
/// it the parsed fields are the whole record.
pub fn merge(original: &Record, parsed: ParsedFields, reserve_data: bool) -> Record {
    if !reserve_data {
        return parsed;
    }

    let mut record = original.clone();
    for (key, value) in parsed {
        record.insert(key, value);
    }
    record
}
