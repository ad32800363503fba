use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TimerError>;
