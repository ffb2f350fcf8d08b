//! tubefetch: inspect or download online videos through yt-dlp.

// --- Modules ---
pub mod backend;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod options;

pub use backend::{Backend, BackendSession, YtDlp};
pub use downloader::{download_video, extract_video_info, VideoDownloader};
pub use error::{Error, Result};
pub use models::{resolve_download_path, InfoDict, VideoInfo};
pub use options::{build_options, BackendOptions, ExtraOptions};
