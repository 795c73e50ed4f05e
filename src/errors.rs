use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response has no amount")]
    MissingAmount,

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}
