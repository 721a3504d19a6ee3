use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{}", .0.user_message())]
    Client(#[from] client::ClientError),
    #[error("{0}")]
    InvalidInput(String),
    #[error("expense \"{0}\" not found")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
}
