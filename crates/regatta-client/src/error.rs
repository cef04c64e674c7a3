use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Longest response body kept in an error message.
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Server(String),

    #[error("Unexpected response ({status}): {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Validation error: {0}")]
    Validation(#[from] standings::ValidationError),
}

impl ClientError {
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.trim().to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = Self::truncate_body(body);
        match status.as_u16() {
            404 => ClientError::NotFound(body),
            500..=599 => ClientError::Server(body),
            code => ClientError::UnexpectedStatus { status: code, body },
        }
    }
}
