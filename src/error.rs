use thiserror::Error;

#[derive(Error, Debug)]
pub enum TixError {
    #[error("API error: {0}")]
    Api(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TixError>;
