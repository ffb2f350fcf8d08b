use crate::options::ExtraOptions;
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

// --- Command-Line Argument Parsing ---
#[derive(Parser, Debug)]
#[command(
    name = "tubefetch",
    author,
    version,
    about = "Download or inspect online videos using yt-dlp",
    long_about = None
)]
pub struct Cli {
    /// The video URL to process
    pub url: String,

    /// Directory to store downloaded files (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Download only the audio stream
    #[arg(long)]
    pub audio_only: bool,

    /// yt-dlp format selector expression to use
    #[arg(long, value_name = "SEL")]
    pub format: Option<String>,

    /// Only show metadata without downloading
    #[arg(long)]
    pub info: bool,

    /// Proxy URL to use when contacting the site
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Additional yt-dlp options to merge into the configuration
    #[arg(long = "extra-option", value_name = "KEY=VALUE", value_parser = parse_extra_option)]
    pub extra_option: Vec<(String, String)>,

    /// Emit metadata as JSON when using --info
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging output
    #[arg(long)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the yt-dlp executable
    #[arg(long = "yt-dlp", value_name = "PATH")]
    pub ytdlp: Option<PathBuf>,
}

impl Cli {
    /// The `--extra-option` pairs as an overlay; later keys replace earlier ones.
    pub fn extra_options(&self) -> ExtraOptions {
        self.extra_option
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect()
    }
}

/// Splits `KEY=VALUE` at the first `=`.
fn parse_extra_option(pair: &str) -> Result<(String, String), String> {
    match pair.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!(
            "Invalid --extra-option '{}'. Expected KEY=VALUE format.",
            pair
        )),
    }
}
