use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Client error: {0}")]
    Client(String),

    #[error("{0} call timed out")]
    Timeout(&'static str),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Message not found: chat {chat_id} message {message_id}")]
    MessageNotFound { chat_id: i64, message_id: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
