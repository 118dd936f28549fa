use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrewError {
    #[error("Entity not found: {0:?}")]
    EntityNotFound(crate::core::types::EntityId),

    #[error("Entity already exists: {0:?}")]
    DuplicateEntity(crate::core::types::EntityId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid drink rules: {0}")]
    InvalidRules(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BrewError>;
