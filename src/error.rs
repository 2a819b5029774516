//! Error types for buildpost modules using thiserror.

use thiserror::Error;

use crate::llm::Provider;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("'{path}' is not a git repository. Run buildpost from within a git repository.")]
    NotARepository { path: String },

    #[error("Invalid commit reference '{0}'. Provide a valid commit hash, branch, or tag: {1}")]
    InvalidReference(String, #[source] git2::Error),

    #[error("Invalid commit range '{0}'. Expected the form <from>..<to> (e.g. HEAD~5..HEAD)")]
    InvalidRange(String),

    #[error("No commits found in range '{0}'")]
    EmptyRange(String),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Failed to compute diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Commit {hash} has invalid timestamp (seconds={seconds})")]
    InvalidTimestamp { hash: String, seconds: i64 },
}

/// Errors from prompt template validation and rendering.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error(
        "Unknown placeholder '{{{name}}}' in the {location} text. Recognized variables: {available}"
    )]
    UnknownPlaceholder {
        name: String,
        location: String,
        available: String,
    },
}

/// Errors from configuration loading and lookups.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    SerializeFailed {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("Style '{key}' not found. Available styles: {available}")]
    UnknownStyle { key: String, available: String },

    #[error("Platform '{key}' not found. Available platforms: {available}")]
    UnknownPlatform { key: String, available: String },

    #[error("Unsupported provider '{key}'. Supported providers: {available}")]
    UnknownProvider { key: String, available: String },

    #[error("Style '{key}' is invalid: {source}")]
    InvalidStyle {
        key: String,
        #[source]
        source: TemplateError,
    },

    #[error(
        "Platform '{key}' has max_length {max_length}, below the minimum of {min}. Raise it in the style library."
    )]
    MaxLengthTooSmall {
        key: String,
        max_length: usize,
        min: usize,
    },
}

/// Errors from generation provider CLIs.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0} CLI not found. Install it with: {hint}", hint = .0.install_hint())]
    NotInstalled(Provider),

    #[error("Failed to spawn {0} process: {1}")]
    SpawnFailed(Provider, #[source] std::io::Error),

    #[error("{0} process timed out after {1} seconds")]
    Timeout(Provider, u64),

    #[error("{provider} CLI exited with code {code}: {stderr}")]
    NonZeroExit {
        provider: Provider,
        code: i32,
        stderr: String,
    },

    #[error("{0} reported an error: {1}")]
    ExecutionFailed(Provider, String),

    #[error("{0} returned an empty response")]
    EmptyResponse(Provider),
}

impl ProviderError {
    /// The provider the error originated from.
    pub fn provider(&self) -> Provider {
        match self {
            ProviderError::NotInstalled(p)
            | ProviderError::SpawnFailed(p, _)
            | ProviderError::Timeout(p, _)
            | ProviderError::ExecutionFailed(p, _)
            | ProviderError::EmptyResponse(p) => *p,
            ProviderError::NonZeroExit { provider, .. } => *provider,
        }
    }
}
