use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the server gave no usable message.
pub(crate) const GENERIC_MESSAGE: &str = "Something went wrong, please try again";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Server { status: StatusCode, message: String },
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Human readable text to surface to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Transport(_) => "Unable to reach the server".to_string(),
            _ => GENERIC_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_as_is() {
        let err = ClientError::Server {
            status: StatusCode::BAD_REQUEST,
            message: "Title is required".to_string(),
        };
        assert_eq!(err.user_message(), "Title is required");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn blank_or_missing_messages_fall_back() {
        let err = ClientError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
        assert_eq!(
            ClientError::Decode("eof".to_string()).user_message(),
            GENERIC_MESSAGE
        );
    }
}
