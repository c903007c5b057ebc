//! All chart slots of the visualization page from one record set.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::{
    categorical_count, cohort_count, date_bucket_count, details_for_bucket, flag_count,
    gpa_band_count, per_entity_value, semester_count,
};
use crate::chart::{ChartRole, ChartSeries};
use crate::config::EngineConfig;
use crate::fields::LogicalField;
use crate::period::PeriodError;
use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub faculty: ChartSeries,
    pub cohort: ChartSeries,
    pub semester: ChartSeries,
    pub graduation: ChartSeries,
    pub active_status: ChartSeries,
    pub obstacle: ChartSeries,
    pub gpa_bands: ChartSeries,
    pub student_gpa: ChartSeries,
}

/// Build every chart slot. Fails only under [`DatePolicy::Strict`](crate::period::DatePolicy)
/// when a graduation date is malformed.
pub fn build<S: AsRef<str>>(
    records: &[Record],
    config: &EngineConfig,
    selected_students: &[S],
) -> Result<DashboardCharts, PeriodError> {
    let fields = &config.fields;

    if let Some(first) = records.first() {
        let headers: Vec<&str> = first.keys().map(String::as_str).collect();
        for w in fields.audit_headers(&headers) {
            warn!(header = %w.header, suggestion = %w.suggestion, "misspelled header in sheet");
        }
    }
    debug!(records = records.len(), "building dashboard charts");

    Ok(DashboardCharts {
        faculty: categorical_count(
            records,
            fields,
            LogicalField::Faculty,
            "Jumlah Mahasiswa per Fakultas",
            ChartRole::Pie,
        ),
        cohort: cohort_count(records, fields, "Jumlah Mahasiswa per Angkatan", ChartRole::Bar),
        semester: semester_count(records, fields, "Jumlah Mahasiswa per Semester", ChartRole::Bar),
        graduation: date_bucket_count(
            records,
            fields,
            LogicalField::GraduationDate,
            config.dates,
            "Jumlah Lulusan per Bulan",
            ChartRole::Area,
        )?,
        active_status: flag_count(
            records,
            fields,
            LogicalField::ActiveStatus,
            &config.active,
            "Status Aktif",
            ChartRole::Doughnut,
        ),
        obstacle: flag_count(
            records,
            fields,
            LogicalField::Obstacle,
            &config.obstacle,
            "Kendala Belajar",
            ChartRole::Pie,
        ),
        gpa_bands: gpa_band_count(records, fields, "Sebaran IPK", ChartRole::Bar),
        student_gpa: per_entity_value(
            records,
            fields,
            selected_students,
            LogicalField::Gpa,
            "IPK Mahasiswa",
            ChartRole::Bar,
        ),
    })
}

/// Per-day graduate counts inside one `Month Year` bucket.
pub fn graduation_details(
    records: &[Record],
    config: &EngineConfig,
    bucket: &str,
) -> Result<IndexMap<String, usize>, PeriodError> {
    details_for_bucket(
        records,
        &config.fields,
        LogicalField::GraduationDate,
        config.dates,
        bucket,
    )
}

/// Drill-down series for one graduation bucket.
pub fn graduation_details_series(
    records: &[Record],
    config: &EngineConfig,
    bucket: &str,
) -> Result<ChartSeries, PeriodError> {
    let details = graduation_details(records, config, bucket)?;
    Ok(ChartSeries::from_tally(&details, "Jumlah Lulusan per Tanggal", ChartRole::Bar))
}
