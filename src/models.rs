use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A raw info dict as printed by `yt-dlp --dump-single-json`.
pub type InfoDict = Map<String, Value>;

// === Metadata ===

/// The metadata tubefetch reports for a single video.
///
/// Field order here is the order of the JSON rendering.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    id: String,
    title: String,
    uploader: Option<String>,
    duration: Option<u64>,
    webpage_url: String,
    description: Option<String>,
    view_count: Option<u64>,
    like_count: Option<u64>,
    upload_date: Option<String>,
}

impl VideoInfo {
    /// Maps a yt-dlp info dict, falling back to `url` when the backend did not
    /// report a `webpage_url`.
    ///
    /// Missing `id` and `title` become empty strings rather than errors.
    pub fn from_info_dict(info: &InfoDict, url: &str) -> Self {
        VideoInfo {
            id: string_field(info, "id").unwrap_or_default(),
            title: string_field(info, "title").unwrap_or_default(),
            uploader: string_field(info, "uploader"),
            duration: count_field(info, "duration"),
            webpage_url: string_field(info, "webpage_url").unwrap_or_else(|| url.to_string()),
            description: string_field(info, "description"),
            view_count: count_field(info, "view_count"),
            like_count: count_field(info, "like_count"),
            upload_date: string_field(info, "upload_date"),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn uploader(&self) -> Option<&str> {
        self.uploader.as_deref()
    }

    /// Length in seconds.
    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn webpage_url(&self) -> &str {
        &self.webpage_url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn view_count(&self) -> Option<u64> {
        self.view_count
    }

    pub fn like_count(&self) -> Option<u64> {
        self.like_count
    }

    /// `YYYYMMDD`, as yt-dlp reports it.
    pub fn upload_date(&self) -> Option<&str> {
        self.upload_date.as_deref()
    }

    /// Pretty JSON with two-space indentation; non-ASCII text is kept as is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn string_field(info: &InfoDict, key: &str) -> Option<String> {
    info.get(key).and_then(Value::as_str).map(str::to_string)
}

// yt-dlp reports some counts (notably `duration`) as floats.
fn count_field(info: &InfoDict, key: &str) -> Option<u64> {
    let value = info.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.trunc() as u64)
    })
}

// === Download result ===

/// Picks the produced file out of a post-download info dict.
///
/// Entries of `requested_downloads` are scanned in order and the first one
/// with a non-empty `_filename` wins; otherwise the top-level `_filename` is
/// used.
pub fn resolve_download_path(result: &InfoDict) -> Result<PathBuf> {
    if let Some(downloads) = result.get("requested_downloads").and_then(Value::as_array) {
        let found = downloads
            .iter()
            .filter_map(Value::as_object)
            .find_map(non_empty_filename);
        if let Some(filename) = found {
            return Ok(PathBuf::from(filename));
        }
    }

    non_empty_filename(result)
        .map(PathBuf::from)
        .ok_or(Error::MissingFilename)
}

fn non_empty_filename(entry: &InfoDict) -> Option<&str> {
    entry
        .get("_filename")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}
