use thiserror::Error;

/// Everything that can go wrong between the command line and yt-dlp.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "The 'yt-dlp' program is required to use tubefetch. \
         Install it via `pip install yt-dlp` or add it to your PATH."
    )]
    BackendUnavailable,

    /// yt-dlp itself failed: network, extraction, unsupported URL, bad option...
    #[error("yt-dlp error: {0}")]
    Backend(String),

    #[error("backend reported no output filename")]
    MissingFilename,

    #[error("Failed to load config file at {path}: {message}")]
    Config { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode yt-dlp output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
