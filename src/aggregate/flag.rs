//! Two-bucket counts from a yes/no style field.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartRole, ChartSeries, Dataset};
use crate::fields::{FieldNames, LogicalField, lookup_any};
use crate::record::Record;

/// Case-insensitive predicate over a flag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagMatch {
    Contains(String),
    Equals(String),
}

impl FlagMatch {
    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim().to_lowercase();
        match self {
            FlagMatch::Contains(needle) => value.contains(&needle.to_lowercase()),
            FlagMatch::Equals(expected) => value == expected.trim().to_lowercase(),
        }
    }
}

/// A flag field, its predicate, and the two bucket labels.
///
/// `fields` overrides the candidate headers of `field` when non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagRule {
    #[serde(default)]
    pub fields: Vec<String>,
    pub predicate: FlagMatch,
    pub matched_label: String,
    pub unmatched_label: String,
}

impl FlagRule {
    /// `kendala` containing "iya".
    pub fn obstacle() -> Self {
        Self {
            fields: Vec::new(),
            predicate: FlagMatch::Contains("iya".to_string()),
            matched_label: "ada kendala (belajar)".to_string(),
            unmatched_label: "tidak ada kendala (belajar)".to_string(),
        }
    }

    /// `aktif` equal to "aktif (belajar)".
    pub fn active() -> Self {
        Self {
            fields: Vec::new(),
            predicate: FlagMatch::Equals("aktif (belajar)".to_string()),
            matched_label: "aktif (belajar)".to_string(),
            unmatched_label: "tidak aktif (belajar)".to_string(),
        }
    }
}

/// Always exactly two labels, matched first. Records without the field land
/// in the unmatched bucket.
pub fn flag_count(
    records: &[Record],
    names: &FieldNames,
    field: LogicalField,
    rule: &FlagRule,
    label: &str,
    role: ChartRole,
) -> ChartSeries {
    let candidates: &[String] = if rule.fields.is_empty() {
        names.candidates(field)
    } else {
        &rule.fields
    };

    let matched = records
        .iter()
        .filter(|r| lookup_any(r, candidates).is_some_and(|v| rule.predicate.matches(v)))
        .count();
    let unmatched = records.len() - matched;

    ChartSeries {
        labels: vec![rule.matched_label.clone(), rule.unmatched_label.clone()],
        datasets: vec![Dataset::styled(
            label,
            vec![matched as f64, unmatched as f64],
            role,
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_obstacle_buckets() {
        let records = vec![record(&[("kendala", "Iya")]), record(&[("kendala", "Tidak")]), record(&[])];
        let series = flag_count(
            &records,
            &FieldNames::default(),
            LogicalField::Obstacle,
            &FlagRule::obstacle(),
            "Kendala",
            ChartRole::Pie,
        );

        assert_eq!(
            series.labels,
            vec!["ada kendala (belajar)", "tidak ada kendala (belajar)"]
        );
        assert_eq!(series.datasets[0].data, vec![1.0, 2.0]);
    }

    #[test]
    fn test_empty_keeps_both_labels() {
        let series = flag_count(
            &[],
            &FieldNames::default(),
            LogicalField::ActiveStatus,
            &FlagRule::active(),
            "Status",
            ChartRole::Doughnut,
        );
        assert_eq!(series.labels.len(), 2);
        assert_eq!(series.datasets[0].data, vec![0.0, 0.0]);
    }

    #[test]
    fn test_active_equals_is_case_insensitive() {
        let records = vec![
            record(&[("aktif", "Aktif (Belajar)")]),
            record(&[("Status", "aktif (belajar) ")]),
            record(&[("aktif", "aktif (cuti)")]),
        ];
        let series = flag_count(
            &records,
            &FieldNames::default(),
            LogicalField::ActiveStatus,
            &FlagRule::active(),
            "Status",
            ChartRole::Pie,
        );
        assert_eq!(series.datasets[0].data, vec![2.0, 1.0]);
    }

    #[test]
    fn test_rule_field_override() {
        let mut rule = FlagRule::obstacle();
        rule.fields = vec!["Hambatan".to_string()];
        let records = vec![record(&[("Hambatan", "iya, biaya")]), record(&[("kendala", "iya")])];
        let series = flag_count(
            &records,
            &FieldNames::default(),
            LogicalField::Obstacle,
            &rule,
            "Kendala",
            ChartRole::Pie,
        );
        assert_eq!(series.datasets[0].data, vec![1.0, 1.0]);
    }
}
