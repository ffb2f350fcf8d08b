use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const DEFAULT_FORMAT: &str = "bestvideo+bestaudio/best";
const DEFAULT_AUDIO_FORMAT: &str = "bestaudio/best";
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Caller-supplied overrides, merged over every computed default.
pub type ExtraOptions = Map<String, Value>;

/// yt-dlp options keyed by their embedding names (`outtmpl`, `format`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendOptions(Map<String, Value>);

impl BackendOptions {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, if it is set to a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds the option set for a single yt-dlp invocation.
///
/// `format` wins over `audio_only`, and `extra_options` win over everything,
/// including `format` and `proxy`. Override keys are not validated: yt-dlp is
/// the one that rejects names it does not know.
///
/// Certificate checks are always disabled so that hosts behind intercepting
/// proxies stay reachable. Pass `nocheckcertificate=false` as an extra option
/// to turn them back on.
pub fn build_options(
    output_dir: Option<&Path>,
    audio_only: bool,
    format: Option<&str>,
    proxy: Option<&str>,
    extra_options: Option<&ExtraOptions>,
) -> BackendOptions {
    let base_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let format = format.unwrap_or(if audio_only {
        DEFAULT_AUDIO_FORMAT
    } else {
        DEFAULT_FORMAT
    });

    let mut options = Map::new();
    options.insert(
        "outtmpl".into(),
        Value::String(base_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned()),
    );
    options.insert("format".into(), Value::String(format.to_string()));
    options.insert("noplaylist".into(), Value::Bool(true));
    options.insert("quiet".into(), Value::Bool(true));
    options.insert("nocheckcertificate".into(), Value::Bool(true));

    if let Some(proxy) = proxy.filter(|p| !p.is_empty()) {
        options.insert("proxy".into(), Value::String(proxy.to_string()));
    }

    if let Some(extra) = extra_options {
        for (key, value) in extra {
            options.insert(key.clone(), value.clone());
        }
    }

    BackendOptions(options)
}
