use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("New and old ref are the same: {0}")]
    IdenticalRefs(String),

    #[error("Unknown subtask: {name}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
    UnknownSubtask {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Invalid domain id: {0}")]
    InvalidDomainId(String),

    #[error("No repository model known for plugin: {0}")]
    UnknownRepoPlugin(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    /// Boundary conversion: decode failures are configuration errors, not
    /// serialization errors.
    pub(crate) fn from_decode(err: &serde_json::Error) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
