use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from everything around the parser. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid request file: {0}")]
    Request(String),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0} environment variable not set")]
    MissingApiKey(String),

    #[error("Gemini API Error: {0}")]
    Api(String),

    #[error("The API returned an empty response.")]
    EmptyResponse,

    #[error("{0}")]
    Typst(String),
}
