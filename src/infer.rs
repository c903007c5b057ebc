use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fields::parse_number;

/// Coarse cell type used to annotate diagram fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Number,
    Normal,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Normal => "Normal",
        };
        f.write_str(s)
    }
}

/// Numeric text is `Number`, other text is `String`, absent or blank is `Normal`.
pub fn infer_type(value: Option<&str>) -> FieldType {
    match value.map(str::trim) {
        Some("") | None => FieldType::Normal,
        Some(v) if parse_number(v).is_some() => FieldType::Number,
        Some(_) => FieldType::String,
    }
}
