use crate::period::PeriodError;
use crate::registry::RegistryError;
use crate::source::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Date error: {0}")]
    Period(#[from] PeriodError),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
    #[error("Invalid input: {0}")]
    Input(#[source] serde_json::Error),
}
