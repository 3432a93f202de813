use thiserror::Error;

use crate::campaign::units::UnitKind;
use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum WarfrontError {
    #[error("Unit not found: {kind:?} {id}")]
    UnitNotFound { kind: UnitKind, id: UnitId },

    #[error("Malformed order: {0}")]
    MalformedOrder(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WarfrontError>;
