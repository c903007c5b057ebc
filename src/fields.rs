//! Logical field lookup over inconsistently spelled sheet headers.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A field the engine understands, independent of how a sheet spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Name,
    StudentId,
    Faculty,
    Semester,
    Gpa,
    GraduationDate,
    ActiveStatus,
    Obstacle,
}

/// Headers seen in real sheets that misspell a logical field.
/// They are still accepted as candidates, but reported by [`FieldNames::audit_headers`].
const MISSPELLED_HEADERS: &[(&str, &str)] = &[("Fakuktas", "Fakultas"), ("fakuktas", "fakultas")];

/// Candidate header spellings per logical field, tried in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub name: Vec<String>,
    pub student_id: Vec<String>,
    pub faculty: Vec<String>,
    pub semester: Vec<String>,
    pub gpa: Vec<String>,
    pub graduation_date: Vec<String>,
    pub active_status: Vec<String>,
    pub obstacle: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            name: names(&["Nama", "nama", "Nama Lengkap", "Name", "name"]),
            student_id: names(&["NIM", "nim", "Nim"]),
            faculty: names(&["Fakultas", "fakultas", "Fakuktas", "fakuktas"]),
            semester: names(&["Semester", "semester"]),
            gpa: names(&["IPK", "ipk", "Ipk", "GPA", "gpa"]),
            graduation_date: names(&["Tanggal Lulus", "tanggal lulus", "Tanggal_Lulus", "tanggal_lulus"]),
            active_status: names(&["aktif", "Aktif", "Status", "status"]),
            obstacle: names(&["kendala", "Kendala"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderWarning {
    pub header: String,
    pub suggestion: String,
}

impl FieldNames {
    pub fn candidates(&self, field: LogicalField) -> &[String] {
        match field {
            LogicalField::Name => &self.name,
            LogicalField::StudentId => &self.student_id,
            LogicalField::Faculty => &self.faculty,
            LogicalField::Semester => &self.semester,
            LogicalField::Gpa => &self.gpa,
            LogicalField::GraduationDate => &self.graduation_date,
            LogicalField::ActiveStatus => &self.active_status,
            LogicalField::Obstacle => &self.obstacle,
        }
    }

    /// First candidate key present in `record` with a non-empty value.
    pub fn lookup<'r>(&self, record: &'r Record, field: LogicalField) -> Option<&'r str> {
        lookup_any(record, self.candidates(field))
    }

    /// Headers that are known misspellings of a logical field.
    pub fn audit_headers<S: AsRef<str>>(&self, headers: &[S]) -> Vec<HeaderWarning> {
        headers
            .iter()
            .filter_map(|h| {
                let h = h.as_ref();
                MISSPELLED_HEADERS
                    .iter()
                    .find(|(wrong, _)| *wrong == h)
                    .map(|(wrong, right)| HeaderWarning {
                        header: wrong.to_string(),
                        suggestion: right.to_string(),
                    })
            })
            .collect()
    }
}

/// First key of `candidates` present in `record` with a non-blank value.
pub fn lookup_any<'r, S: AsRef<str>>(record: &'r Record, candidates: &[S]) -> Option<&'r str> {
    candidates.iter().find_map(|key| {
        record
            .get(key.as_ref())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    })
}

/// Parse a sheet cell as a number. Accepts a decimal comma (`3,25`).
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let parsed: f64 = if value.contains(',') && !value.contains('.') {
        value.replace(',', ".").parse().ok()?
    } else {
        value.parse().ok()?
    };
    parsed.is_finite().then_some(parsed)
}
