use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// The structure of the optional configuration file (config.toml).
///
/// Every key is optional; command-line flags take precedence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where downloads land when `--output` is not given.
    pub download_directory: Option<PathBuf>,
    pub proxy: Option<String>,
    /// Explicit yt-dlp executable, used instead of searching `PATH`.
    pub ytdlp_path: Option<PathBuf>,
}

/// Returns the cross-platform path of the default configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "tubefetch", "tubefetch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads the configuration.
///
/// An explicit `path` must exist. The default location is optional and a
/// missing file there yields the default configuration.
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let (config_path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(Config::default()),
        },
    };

    if !required && !fs::try_exists(&config_path).await.unwrap_or(false) {
        tracing::debug!("No config file at {}, using defaults", config_path.display());
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .await
        .map_err(|e| config_error(&config_path, e))?;
    let config = parse_config(&config_content).map_err(|e| config_error(&config_path, e))?;
    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

fn config_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_all_keys() {
        let config = parse_config(
            r#"
download_directory = "/srv/videos"
proxy = "socks5://127.0.0.1:9050"
ytdlp_path = "/opt/bin/yt-dlp"
"#,
        )
        .unwrap();

        assert_eq!(config.download_directory, Some(PathBuf::from("/srv/videos")));
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:9050"));
        assert_eq!(config.ytdlp_path, Some(PathBuf::from("/opt/bin/yt-dlp")));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("download_dir = \"/tmp\"").is_err());
    }

    #[tokio::test]
    async fn explicit_path_is_read() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "proxy = \"http://p:1\"\n").unwrap();

        let config = load_config(Some(&path)).await.unwrap();
        assert_eq!(config.proxy.as_deref(), Some("http://p:1"));
    }

    #[tokio::test]
    async fn missing_explicit_path_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let err = load_config(Some(&temp.path().join("absent.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "proxy = [").unwrap();

        let err = load_config(Some(&path)).await.unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
