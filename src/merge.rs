//! Merging per-page records into one document record.

use crate::error::{Error, Result};
use crate::model::{Field, Record};

/// Merge page records in page order.
///
/// For each field the last present, non-empty value wins; an absent value
/// never clears an earlier one. When a later page replaces a different
/// earlier value the conflict is logged and the later value is kept.
///
/// Returns [`Error::NoPages`] for an empty slice.
pub fn merge_records(records: &[Record]) -> Result<Record> {
    if records.is_empty() {
        return Err(Error::NoPages);
    }

    let mut merged = Record::new();
    for (index, record) in records.iter().enumerate() {
        merge_into(&mut merged, record, index + 1);
    }
    Ok(merged)
}

fn merge_into(merged: &mut Record, page: &Record, page_number: usize) {
    for field in Field::ALL {
        let Some(value) = page.get(field).filter(|v| !v.is_empty()) else {
            continue;
        };

        if let Some(previous) = merged.get(field) {
            if previous != value {
                log::warn!(
                    "{}: page {} value {:?} replaces earlier {:?}",
                    field,
                    page_number,
                    value,
                    previous
                );
            }
        }
        merged.set(field, value);
    }
}
