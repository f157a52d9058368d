use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeerBotError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Not found: {entity} '{key}'")]
    NotFound { entity: String, key: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PeerBotError {
    pub(crate) fn not_found(entity: &str, key: impl Into<String>) -> Self {
        PeerBotError::NotFound {
            entity: entity.to_string(),
            key: key.into(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PeerBotError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PeerBotError {
    fn from(e: serde_json::Error) -> Self {
        PeerBotError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for PeerBotError {
    fn from(e: csv::Error) -> Self {
        PeerBotError::SerializationError(e.to_string())
    }
}
