//! The seam between tubefetch and the program that does the real work.
//!
//! A [`Backend`] opens one [`BackendSession`] per call; the session exposes a
//! single entry point that either extracts metadata or downloads. [`YtDlp`] is
//! the production implementation and drives the `yt-dlp` executable.

use crate::error::{Error, Result};
use crate::models::InfoDict;
use crate::options::BackendOptions;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

static YTDLP_ERROR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ERROR:\s*(?P<message>.+?)\s*$").unwrap());

/// Embedding option names whose command-line flag is not simply the name with
/// dashes.
const FLAG_ALIASES: &[(&str, &str)] = &[
    ("outtmpl", "--output"),
    ("noplaylist", "--no-playlist"),
    ("nocheckcertificate", "--no-check-certificates"),
    ("ratelimit", "--limit-rate"),
    ("cookiefile", "--cookies"),
    ("writethumbnail", "--write-thumbnail"),
    ("writeinfojson", "--write-info-json"),
    ("writesubtitles", "--write-subs"),
    ("restrictfilenames", "--restrict-filenames"),
];

/// Options whose value is always passed through, even when it reads `true` or
/// `false`.
const VALUE_OPTIONS: &[&str] = &[
    "outtmpl",
    "format",
    "proxy",
    "ratelimit",
    "cookiefile",
    "socket_timeout",
    "retries",
    "match_filter",
    "playlist_items",
    "max_filesize",
];

pub trait Backend: Send + Sync {
    type Session: BackendSession;

    /// Opens a session configured with `options`. Dropping the session tears
    /// it down.
    fn open(&self, options: BackendOptions) -> Result<Self::Session>;
}

#[async_trait]
pub trait BackendSession: Send {
    /// Returns the info dict for `url`. With `download` set the media is
    /// downloaded first and the dict describes the produced file(s).
    async fn extract_info(&mut self, url: &str, download: bool) -> Result<InfoDict>;
}

/// Runs the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl YtDlp {
    /// Locates yt-dlp, preferring `explicit` when given and falling back to
    /// `PATH`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let found = match explicit {
            Some(path) => which::which(path),
            None => which::which("yt-dlp"),
        };
        match found {
            Ok(program) => {
                debug!("Using yt-dlp at {}", program.display());
                Ok(Self { program })
            }
            Err(e) => {
                debug!("yt-dlp lookup failed: {}", e);
                Err(Error::BackendUnavailable)
            }
        }
    }
}

impl Backend for YtDlp {
    type Session = YtDlpSession;

    fn open(&self, options: BackendOptions) -> Result<YtDlpSession> {
        Ok(YtDlpSession {
            program: self.program.clone(),
            args: options_to_args(&options),
        })
    }
}

/// One configured yt-dlp invocation context.
#[derive(Debug)]
pub struct YtDlpSession {
    program: PathBuf,
    args: Vec<String>,
}

#[async_trait]
impl BackendSession for YtDlpSession {
    async fn extract_info(&mut self, url: &str, download: bool) -> Result<InfoDict> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg("--dump-single-json");
        if download {
            cmd.arg("--no-simulate");
        }
        cmd.arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("Running {} {:?} -- {}", self.program.display(), self.args, url);
        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = backend_error_message(&stderr, output.status.code());
            debug!("yt-dlp failed: {}", message);
            return Err(Error::Backend(message));
        }

        match serde_json::from_slice::<Value>(&output.stdout)? {
            Value::Object(info) => Ok(info),
            _ => Err(Error::Backend("yt-dlp did not print an info dict".to_string())),
        }
    }
}

impl Drop for YtDlpSession {
    fn drop(&mut self) {
        debug!("Closing yt-dlp session");
    }
}

/// Translates embedding options into yt-dlp command-line arguments.
///
/// `true` emits the bare flag, `false` and `null` emit nothing, anything else
/// emits the flag followed by its value. The strings `"true"` and `"false"`
/// count as booleans so that overrides given as text behave the same, except
/// for the known value-taking options in `VALUE_OPTIONS`. An unknown key given
/// the text `true` still becomes a bare flag.
pub fn options_to_args(options: &BackendOptions) -> Vec<String> {
    let mut args = Vec::new();
    for (key, value) in options.iter() {
        let flag = flag_for(key);
        let takes_value = VALUE_OPTIONS.contains(&key.as_str());
        match value {
            Value::Null | Value::Bool(false) => {}
            Value::Bool(true) => args.push(flag),
            Value::String(s) if s == "true" && !takes_value => args.push(flag),
            Value::String(s) if s == "false" && !takes_value => {}
            Value::String(s) => {
                args.push(flag);
                args.push(s.clone());
            }
            other => {
                args.push(flag);
                args.push(other.to_string());
            }
        }
    }
    args
}

fn flag_for(key: &str) -> String {
    FLAG_ALIASES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, flag)| flag.to_string())
        .unwrap_or_else(|| format!("--{}", key.replace('_', "-")))
}

fn backend_error_message(stderr: &str, code: Option<i32>) -> String {
    if let Some(caps) = YTDLP_ERROR_REGEX.captures(stderr) {
        return caps["message"].to_string();
    }
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        match code {
            Some(code) => format!("yt-dlp exited with status {}", code),
            None => "yt-dlp was terminated by a signal".to_string(),
        }
    } else {
        trimmed.to_string()
    }
}
