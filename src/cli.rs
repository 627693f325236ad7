use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytsum",
    about = "YouTube transcript viewer and summarizer (local web form)",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Address to serve the web form on [default: 127.0.0.1:8501]
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Gemini model for summarization [default: gemini-2.0-flash-001]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Config file to use instead of ~/.config/ytsum/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log debug output and print effective settings
    #[arg(short, long)]
    pub verbose: bool,
}
