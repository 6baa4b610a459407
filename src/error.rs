use thiserror::Error;

/// Client error kinds. Display strings are shown verbatim in the error
/// area of the UI.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// Rejected before any request was made (bad size or type).
    #[error("{0}")]
    Validation(String),

    /// The request never completed (connection refused, DNS, aborted).
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response; `message` is the server's `error` field.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Preview/download/purchase attempted before a successful conversion.
    #[error("No endcard available. Please upload a file and generate an endcard first.")]
    MissingPayload,

    #[error("{0}")]
    Io(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_message_only() {
        let err = ClientError::Server {
            status: 400,
            message: "bad format".to_string(),
        };
        assert_eq!(err.to_string(), "bad format");
    }

    #[test]
    fn missing_payload_tells_the_user_what_to_do() {
        assert!(ClientError::MissingPayload
            .to_string()
            .contains("upload a file"));
    }
}
