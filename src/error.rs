//! Error types for the Sats dashboard.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the dashboard, its feeds and tooling.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The remote API answered with a non-success status.
    #[error("HTTP error! status: {status} ({endpoint})")]
    RemoteRequest { status: u16, endpoint: String },

    /// The request never produced a response (DNS, timeout, transport).
    #[error("Request to {endpoint} failed: {source}")]
    RemoteTransport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Wallet connector errors (handshake failure, not connected, ...)
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The user or the wallet declined the request.
    #[error("Wallet request rejected: {0}")]
    WalletRejected(String),

    /// Contract artifact could not be read or parsed.
    #[error("Failed to read contract artifact {}: {message}", path.display())]
    Artifact { path: PathBuf, message: String },

    /// Declare/deploy submission failed.
    #[error("Deployment failed: {0}")]
    Deploy(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new wallet error.
    pub fn wallet(msg: impl Into<String>) -> Self {
        Self::Wallet(msg.into())
    }

    /// Create a new wallet rejection error.
    pub fn wallet_rejected(msg: impl Into<String>) -> Self {
        Self::WalletRejected(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Artifact {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a new deployment error.
    pub fn deploy(msg: impl Into<String>) -> Self {
        Self::Deploy(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Status code of a failed remote request, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRequest { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RemoteRequest { .. }
                | Self::RemoteTransport { .. }
                | Self::WalletRejected(_)
                | Self::Wallet(_)
                | Self::Channel(_)
        )
    }
}
