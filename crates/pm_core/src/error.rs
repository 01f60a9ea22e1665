use thiserror::Error;

/// Why a model reply could not be turned into a JSON value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("No JSON object found")]
    NoObject,

    #[error("Unable to parse JSON from response text")]
    Unparseable,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse failure: {0}")]
    Parse(#[from] ParseFailure),

    #[error("Missing directive: {0}")]
    MissingDirective(String),

    #[error("Missing field in model reply: {0}")]
    MissingField(String),

    #[error("Model reply is not a JSON object: {0}")]
    NotAnObject(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
