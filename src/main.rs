use clap::Parser;
use std::process::ExitCode;

use tubefetch::cli::Cli;
use tubefetch::config::load_config;
use tubefetch::{handlers, logging, YtDlp};

// --- Main Application Logic ---
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Usage errors (including a malformed --extra-option) exit with 2 here.
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(cli.config.as_deref()).await?;
    let backend = YtDlp::discover(cli.ytdlp.as_deref().or(config.ytdlp_path.as_deref()))?;

    let mut stdout = std::io::stdout();
    let code = handlers::dispatch(&cli, &config, backend, &mut stdout).await?;
    Ok(ExitCode::from(code))
}
