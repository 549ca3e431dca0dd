use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),
}
