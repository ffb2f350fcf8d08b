//! Metadata and download operations on top of a [`Backend`].
//!
//! Every call builds fresh options, opens its own session and drops it before
//! returning. Nothing is cached between calls.

use crate::backend::{Backend, BackendSession};
use crate::error::Result;
use crate::models::{resolve_download_path, VideoInfo};
use crate::options::{build_options, ExtraOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extracts metadata for `url` without downloading anything.
pub async fn extract_video_info<B: Backend>(
    backend: &B,
    url: &str,
    proxy: Option<&str>,
) -> Result<VideoInfo> {
    let options = build_options(None, false, None, proxy, None);
    let mut session = backend.open(options)?;
    debug!("Extracting information for {}", url);
    let info = session.extract_info(url, false).await?;
    Ok(VideoInfo::from_info_dict(&info, url))
}

/// Downloads `url` (or only its audio) and returns the path of the produced
/// file.
pub async fn download_video<B: Backend>(
    backend: &B,
    url: &str,
    output_dir: Option<&Path>,
    audio_only: bool,
    format: Option<&str>,
    proxy: Option<&str>,
    extra_options: Option<&ExtraOptions>,
) -> Result<PathBuf> {
    let options = build_options(output_dir, audio_only, format, proxy, extra_options);
    debug!("Downloading {} with options {:?}", url, options);
    let mut session = backend.open(options)?;
    let result = session.extract_info(url, true).await?;
    drop(session);
    resolve_download_path(&result)
}

/// Downloads into a fixed directory through a fixed proxy.
#[derive(Debug, Clone)]
pub struct VideoDownloader<B> {
    backend: B,
    output_dir: Option<PathBuf>,
    proxy: Option<String>,
}

impl<B: Backend> VideoDownloader<B> {
    pub fn new(backend: B, output_dir: Option<PathBuf>, proxy: Option<String>) -> Self {
        Self {
            backend,
            output_dir,
            proxy,
        }
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub async fn fetch_info(&self, url: &str) -> Result<VideoInfo> {
        extract_video_info(&self.backend, url, self.proxy()).await
    }

    pub async fn download(
        &self,
        url: &str,
        audio_only: bool,
        format: Option<&str>,
        extra_options: Option<&ExtraOptions>,
    ) -> Result<PathBuf> {
        download_video(
            &self.backend,
            url,
            self.output_dir(),
            audio_only,
            format,
            self.proxy(),
            extra_options,
        )
        .await
    }
}
