use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("TLE file read error: {0}")]
    TleRead(#[from] std::io::Error),
    #[error("invalid TLE in {file}: {message}")]
    InvalidTle { file: String, message: String },
    #[error("propagation error: {0}")]
    Propagation(String),
}
