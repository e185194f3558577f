use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown resource kind: {0} (expected people or vehicles)")]
    UnknownResource(String),

    #[error("Collection item is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
