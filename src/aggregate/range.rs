//! Counts over an a-priori known integer range.

use std::ops::RangeInclusive;

use indexmap::IndexMap;

use crate::chart::{ChartRole, ChartSeries};
use crate::fields::{FieldNames, LogicalField, parse_number};
use crate::record::Record;

pub const SEMESTER_RANGE: RangeInclusive<i64> = 3..=14;

/// One label per value in `range`, zero-filled, in range order.
///
/// Values that are not whole numbers or fall outside the range are skipped.
pub fn fixed_range_count(
    records: &[Record],
    fields: &FieldNames,
    field: LogicalField,
    range: RangeInclusive<i64>,
    label_for: impl Fn(i64) -> String,
    label: &str,
    role: ChartRole,
) -> ChartSeries {
    let mut tally: IndexMap<String, usize> =
        range.clone().map(|v| (label_for(v), 0)).collect();

    for record in records {
        let Some(value) = fields.lookup(record, field).and_then(parse_number) else {
            continue;
        };
        if value.fract() != 0.0 {
            continue;
        }
        let value = value as i64;
        if range.contains(&value) {
            if let Some(count) = tally.get_mut(&label_for(value)) {
                *count += 1;
            }
        }
    }

    ChartSeries::from_tally(&tally, label, role)
}

/// `Semester 3` through `Semester 14`.
pub fn semester_count(records: &[Record], fields: &FieldNames, label: &str, role: ChartRole) -> ChartSeries {
    fixed_range_count(
        records,
        fields,
        LogicalField::Semester,
        SEMESTER_RANGE,
        |s| format!("Semester {s}"),
        label,
        role,
    )
}
