//! GPA-like metric split into three fixed bands.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartRole, ChartSeries, Dataset};
use crate::fields::{FieldNames, LogicalField, parse_number};
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpaBand {
    /// `< 2`
    #[serde(rename = "below2")]
    Below2,
    /// `>= 2` and `<= 3`
    #[serde(rename = "between2and3")]
    Between2And3,
    /// `> 3`
    #[serde(rename = "above3")]
    Above3,
}

impl GpaBand {
    pub const ALL: [GpaBand; 3] = [GpaBand::Below2, GpaBand::Between2And3, GpaBand::Above3];

    pub fn of(value: f64) -> Self {
        if value < 2.0 {
            GpaBand::Below2
        } else if value <= 3.0 {
            GpaBand::Between2And3
        } else {
            GpaBand::Above3
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GpaBand::Below2 => "below2",
            GpaBand::Between2And3 => "between2and3",
            GpaBand::Above3 => "above3",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == s)
    }
}

fn gpa_values<'a>(records: &'a [Record], fields: &'a FieldNames) -> impl Iterator<Item = f64> + 'a {
    records
        .iter()
        .filter_map(move |r| fields.lookup(r, LogicalField::Gpa).and_then(parse_number))
}

/// Counts for all three bands, always in `below2, between2and3, above3` order.
pub fn gpa_band_count(records: &[Record], fields: &FieldNames, label: &str, role: ChartRole) -> ChartSeries {
    let mut counts = [0usize; 3];
    for value in gpa_values(records, fields) {
        counts[GpaBand::of(value) as usize] += 1;
    }

    ChartSeries {
        labels: GpaBand::ALL.iter().map(|b| b.label().to_string()).collect(),
        datasets: vec![Dataset::styled(
            label,
            counts.iter().map(|&c| c as f64).collect(),
            role,
        )],
    }
}

/// The GPA values that fall into `band`, in record order.
pub fn gpa_values_in_band(records: &[Record], fields: &FieldNames, band: GpaBand) -> Vec<f64> {
    gpa_values(records, fields)
        .filter(|&v| GpaBand::of(v) == band)
        .collect()
}

/// Number of records whose GPA falls into `band`.
pub fn gpa_band_size(records: &[Record], fields: &FieldNames, band: GpaBand) -> usize {
    gpa_values(records, fields)
        .filter(|&v| GpaBand::of(v) == band)
        .count()
}
