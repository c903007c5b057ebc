//! Counts per observed category.

use indexmap::IndexMap;

use crate::chart::{ChartRole, ChartSeries};
use crate::fields::{FieldNames, LogicalField};
use crate::record::Record;

/// Count records per key in first-seen order. `None` keys are skipped.
pub fn tally_by<'r, F>(records: &'r [Record], mut key: F) -> IndexMap<String, usize>
where
    F: FnMut(&'r Record) -> Option<String>,
{
    let mut tally: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        if let Some(k) = key(record) {
            *tally.entry(k).or_insert(0) += 1;
        }
    }
    tally
}

/// One label per distinct value of `field`, in first-seen order.
pub fn categorical_count(
    records: &[Record],
    fields: &FieldNames,
    field: LogicalField,
    label: &str,
    role: ChartRole,
) -> ChartSeries {
    let tally = tally_by(records, |r| fields.lookup(r, field).map(str::to_string));
    ChartSeries::from_tally(&tally, label, role)
}

/// Cohorts keyed by the first two characters of the student id (`"2101..."` is `"21"`).
pub fn cohort_count(records: &[Record], fields: &FieldNames, label: &str, role: ChartRole) -> ChartSeries {
    let tally = tally_by(records, |r| {
        fields
            .lookup(r, LogicalField::StudentId)
            .map(|id| id.chars().take(2).collect())
    });
    ChartSeries::from_tally(&tally, label, role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            record(&[("Fakultas", "Teknik")]),
            record(&[("Fakultas", "Hukum")]),
            record(&[("Fakultas", "Teknik")]),
        ];
        let series = categorical_count(
            &records,
            &FieldNames::default(),
            LogicalField::Faculty,
            "Fakultas",
            ChartRole::Bar,
        );

        assert_eq!(series.labels, vec!["Teknik", "Hukum"]);
        assert_eq!(series.datasets[0].data, vec![2.0, 1.0]);
        assert!(series.is_aligned());
    }

    #[test]
    fn test_total_excludes_missing_values() {
        let records = vec![
            record(&[("Fakultas", "Teknik")]),
            record(&[("fakultas", "Ekonomi")]),
            record(&[("Fakultas", "")]),
            record(&[("Nama", "Ayu")]),
        ];
        let series = categorical_count(
            &records,
            &FieldNames::default(),
            LogicalField::Faculty,
            "Fakultas",
            ChartRole::Pie,
        );

        assert_eq!(series.total(), 2.0);
        assert_eq!(series.datasets[0].background_color.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let series = categorical_count(
            &[],
            &FieldNames::default(),
            LogicalField::Faculty,
            "Fakultas",
            ChartRole::Bar,
        );
        assert!(series.labels.is_empty());
        assert!(series.datasets[0].data.is_empty());
    }

    #[test]
    fn test_cohort_prefix() {
        let records = vec![
            record(&[("NIM", "2101001")]),
            record(&[("nim", "2205002")]),
            record(&[("Nim", "2101003")]),
            record(&[("NIM", "")]),
        ];
        let series = cohort_count(&records, &FieldNames::default(), "Angkatan", ChartRole::Bar);

        assert_eq!(series.labels, vec!["21", "22"]);
        assert_eq!(series.datasets[0].data, vec![2.0, 1.0]);
    }
}
