use crate::chart::{ChartRole, ChartSeries, Dataset};
use crate::fields::{FieldNames, LogicalField, parse_number};
use crate::record::Record;

/// One value per selected name, taken from the first record whose name field
/// matches. A missing record or a missing/non-numeric value yields 0.
pub fn per_entity_value<S: AsRef<str>>(
    records: &[Record],
    fields: &FieldNames,
    selected: &[S],
    value_field: LogicalField,
    label: &str,
    role: ChartRole,
) -> ChartSeries {
    let data = selected
        .iter()
        .map(|name| {
            let name = name.as_ref().trim();
            records
                .iter()
                .find(|r| fields.lookup(r, LogicalField::Name) == Some(name))
                .and_then(|r| fields.lookup(r, value_field))
                .and_then(parse_number)
                .unwrap_or(0.0)
        })
        .collect();

    ChartSeries {
        labels: selected.iter().map(|s| s.as_ref().trim().to_string()).collect(),
        datasets: vec![Dataset::styled(label, data, role)],
    }
}
