use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("YouTube API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Transcript unavailable for {video_id}: {reason}")]
    Transcript { video_id: String, reason: String },

    #[error("Transcript client could not be created: {reason}")]
    TranscriptClient { reason: String },

    #[error("Cannot look back {years} years from now")]
    InvalidLookback { years: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Missing API key: pass --api-key or set the {env_var} environment variable")]
    MissingApiKey { env_var: String },
}

impl HarvestError {
    /// HTTP status of a failed API call, if the failure came from the API itself.
    pub fn status(&self) -> Option<u16> {
        match self {
            HarvestError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
