use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeltaCovError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("GitHub API error (HTTP {status}): {body}")]
    GitHub { status: u16, body: String },

    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for DeltaCovError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, resp) => DeltaCovError::GitHub {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            other => DeltaCovError::Http(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeltaCovError>;
