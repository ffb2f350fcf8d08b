use crate::{
    backend::Backend,
    cli::Cli,
    config::Config,
    downloader::{extract_video_info, VideoDownloader},
    models::VideoInfo,
};
use std::io::Write;

// ===================================================================
//                          DISPATCH
// ===================================================================

/// Runs the mode selected on the command line and returns the exit code.
///
/// Download failures are logged and turned into exit code 1. Errors in
/// `--info` mode are returned to the caller untouched.
pub async fn dispatch<B: Backend, W: Write>(
    cli: &Cli,
    config: &Config,
    backend: B,
    out: &mut W,
) -> anyhow::Result<u8> {
    let proxy = cli.proxy.as_deref().or(config.proxy.as_deref());

    if cli.info {
        return show_info(cli, &backend, proxy, out).await;
    }

    let output_dir = cli
        .output
        .clone()
        .or_else(|| config.download_directory.clone());
    let downloader = VideoDownloader::new(backend, output_dir, proxy.map(str::to_string));
    let extra_options = cli.extra_options();

    match downloader
        .download(
            &cli.url,
            cli.audio_only,
            cli.format.as_deref(),
            Some(&extra_options),
        )
        .await
    {
        Ok(path) => {
            writeln!(out, "{}", path.display())?;
            Ok(0)
        }
        Err(e) => {
            tracing::error!("Failed to download video: {}", e);
            Ok(1)
        }
    }
}

// ===================================================================
//                          INFO MODE
// ===================================================================

async fn show_info<B: Backend, W: Write>(
    cli: &Cli,
    backend: &B,
    proxy: Option<&str>,
    out: &mut W,
) -> anyhow::Result<u8> {
    let info = extract_video_info(backend, &cli.url, proxy).await?;
    if cli.json {
        writeln!(out, "{}", info.to_json()?)?;
    } else {
        write!(out, "{}", render_info(&info))?;
    }
    Ok(0)
}

/// The human-readable metadata block. Title and URL are always present.
pub fn render_info(info: &VideoInfo) -> String {
    let mut lines = vec![format!("Title: {}", info.title())];
    if let Some(uploader) = info.uploader().filter(|u| !u.is_empty()) {
        lines.push(format!("Uploader: {}", uploader));
    }
    if let Some(duration) = info.duration() {
        lines.push(format!("Duration: {} seconds", duration));
    }
    if let Some(views) = info.view_count() {
        lines.push(format!("Views: {}", views));
    }
    lines.push(format!("URL: {}", info.webpage_url()));

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
