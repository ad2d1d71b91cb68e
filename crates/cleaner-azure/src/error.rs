use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Azure API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CloudError {
    pub fn is_not_found(&self) -> bool {
        match self {
            CloudError::Api { status, .. } => *status == 404,
            CloudError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
