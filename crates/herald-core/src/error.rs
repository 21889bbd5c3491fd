use thiserror::Error;

pub type HeraldResult<T> = Result<T, HeraldError>;

#[derive(Debug, Error)]
pub enum HeraldError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
}
