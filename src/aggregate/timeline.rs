//! Counts per month bucket of a `D/M/YYYY` date field.

use indexmap::IndexMap;
use tracing::warn;

use crate::chart::{ChartRole, ChartSeries};
use crate::fields::{FieldNames, LogicalField};
use crate::period::{DatePolicy, PeriodError, to_full_date, to_month_year};
use crate::record::Record;

fn bucketed<'r>(
    records: &'r [Record],
    fields: &FieldNames,
    field: LogicalField,
    policy: DatePolicy,
) -> impl Iterator<Item = Result<&'r str, PeriodError>> {
    records
        .iter()
        .filter_map(move |r| fields.lookup(r, field))
        .filter_map(move |date| match to_month_year(date) {
            Ok(_) => Some(Ok(date)),
            Err(e) => match policy {
                DatePolicy::Strict => Some(Err(e)),
                DatePolicy::SkipMalformed => {
                    warn!("skipping record: {e}");
                    None
                }
            },
        })
}

/// Count per `Month Year` bucket, in first-seen order.
pub fn date_bucket_tally(
    records: &[Record],
    fields: &FieldNames,
    field: LogicalField,
    policy: DatePolicy,
) -> Result<IndexMap<String, usize>, PeriodError> {
    let mut tally: IndexMap<String, usize> = IndexMap::new();
    for date in bucketed(records, fields, field, policy) {
        *tally.entry(to_month_year(date?)?).or_insert(0) += 1;
    }
    Ok(tally)
}

/// Series of counts per `Month Year` bucket.
pub fn date_bucket_count(
    records: &[Record],
    fields: &FieldNames,
    field: LogicalField,
    policy: DatePolicy,
    label: &str,
    role: ChartRole,
) -> Result<ChartSeries, PeriodError> {
    let tally = date_bucket_tally(records, fields, field, policy)?;
    Ok(ChartSeries::from_tally(&tally, label, role))
}

/// Per-day breakdown (`5 March 2024` to count) of one `Month Year` bucket.
pub fn details_for_bucket(
    records: &[Record],
    fields: &FieldNames,
    field: LogicalField,
    policy: DatePolicy,
    bucket: &str,
) -> Result<IndexMap<String, usize>, PeriodError> {
    let mut details: IndexMap<String, usize> = IndexMap::new();
    for date in bucketed(records, fields, field, policy) {
        let date = date?;
        if to_month_year(date)? == bucket {
            *details.entry(to_full_date(date)?).or_insert(0) += 1;
        }
    }
    Ok(details)
}
