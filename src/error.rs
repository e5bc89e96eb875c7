use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrowWiseError {
    #[error("Dataset error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),
}

pub type Result<T> = std::result::Result<T, GrowWiseError>;
