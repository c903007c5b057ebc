//! Engine configuration, loaded from JSON with every field optional.

use serde::{Deserialize, Serialize};

use crate::aggregate::FlagRule;
use crate::error::EngineError;
use crate::fields::FieldNames;
use crate::layout::LayoutEngine;
use crate::period::DatePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fields: FieldNames,
    pub layout: LayoutEngine,
    pub dates: DatePolicy,
    pub obstacle: FlagRule,
    pub active: FlagRule,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fields: FieldNames::default(),
            layout: LayoutEngine::default(),
            dates: DatePolicy::default(),
            obstacle: FlagRule::obstacle(),
            active: FlagRule::active(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::Config)
    }

    /// Defaults when `json` is absent or blank.
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, EngineError> {
        match json.map(str::trim) {
            Some(s) if !s.is_empty() => Self::from_json(s),
            _ => Ok(Self::default()),
        }
    }
}
