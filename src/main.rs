use std::path::PathBuf;

use eyre::Result;
use log::{LevelFilter, info};

mod cli;

use cli::Cli;
use ytsum::config::{API_KEY_ENV, Config, Settings};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsum")
        .join("logs")
}

fn build_after_help() -> String {
    let key_line = match std::env::var(API_KEY_ENV) {
        Ok(k) if !k.trim().is_empty() => format!("  \x1b[32m✅\x1b[0m {API_KEY_ENV}"),
        _ => format!("  \x1b[31m❌\x1b[0m {API_KEY_ENV}  (not set, needed for Gemini summaries)"),
    };

    let log_path = log_dir().join("ytsum.log");

    format!(
        "\nREQUIRED ENVIRONMENT:\n{key_line}\n\nConfig file: {}\nLogs are written to: {}",
        ytsum::config::config_path().display(),
        log_path.display()
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    setup_logging(cli.verbose)?;

    // An explicit --config must load; the default location is optional
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let settings = Settings::new(config, cli.bind.clone(), cli.model.clone(), std::env::var(API_KEY_ENV).ok())?;

    if cli.verbose {
        eprintln!(
            "Bind: {}\nModel: {}\nYouTube: {}\nGemini: {}",
            settings.bind, settings.model, settings.youtube_base_url, settings.gemini_base_url
        );
    }

    let state = ytsum::web::AppState::new(reqwest::Client::new(), &settings);

    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    let addr = listener.local_addr()?;
    info!("Serving on http://{addr}");
    eprintln!("Youtube Video Transcript Summarizer running at http://{addr}");

    axum::serve(listener, ytsum::web::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
