use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("order configuration {location} is invalid: {reason}")]
    OrderDocument { location: String, reason: String },
}

/// Errors raised while talking to an exchange.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("order submission failed: {0}")]
    Submission(String),

    #[error("order query failed: {0}")]
    Query(String),

    #[error("no transaction ids provided")]
    NoTransactionIds,

    #[error("exchange returned errors: {}", .0.join("; "))]
    Api(Vec<String>),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("failed to resolve credential {path}: {reason}")]
    Credential { path: String, reason: String },

    #[error("no orderer found for exchange {0}")]
    UnknownExchange(String),

    #[error("archive error at {location}: {reason}")]
    Archive { location: String, reason: String },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("queue error: {0}")]
    Queue(String),

    #[error("failed to start job {job}: {reason}")]
    JobSubmission { job: String, reason: String },

    #[error("malformed queue message {message_id}: {reason}")]
    MalformedMessage { message_id: String, reason: String },

    #[error("no queue messages found")]
    NoMessages,

    #[error("invocation deadline of {0}s exceeded")]
    DeadlineExceeded(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
