use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Decode error for {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Fetch for {url} was cancelled")]
    Cancelled { url: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FetchError {
    pub(crate) fn network(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Short machine-readable class of the failure
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::Cancelled { .. } => "cancelled",
            Self::Client(_) => "client",
        }
    }
}
