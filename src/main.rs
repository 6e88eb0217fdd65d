use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use hf_chat::app::App;
use hf_chat::config::Config;
use hf_chat::fetcher::{self, FetchOutcome, HfClient};
use hf_chat::{handler, tui, ui};

#[derive(Parser)]
#[command(name = "hf-chat")]
#[command(about = "Terminal chat client for the Hugging Face Inference API")]
struct Cli {
    /// Model to query (overrides the config file)
    #[arg(short, long)]
    model: Option<String>,

    /// Full inference endpoint URL (overrides the model-derived default)
    #[arg(long)]
    api_url: Option<String>,

    /// Log file (default: hf-chat.log next to the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the reply
    Ask {
        /// Your message
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let api_key = config.resolve_api_key()?;
    let model = config.resolve_model(cli.model.clone());
    let api_url = config.resolve_api_url(cli.api_url.clone(), &model);

    let client = HfClient::new(
        &api_url,
        &api_key,
        config
            .max_new_tokens
            .unwrap_or(fetcher::DEFAULT_MAX_NEW_TOKENS),
        config.temperature.unwrap_or(fetcher::DEFAULT_TEMPERATURE),
    );

    match cli.command {
        Some(Commands::Ask { message }) => {
            // One-shot mode owns stdout, so diagnostics go to stderr
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();

            ask_once(&client, &message).await;
            Ok(())
        }
        None => {
            // The TUI owns the terminal, so diagnostics go to a file
            init_file_logging(cli.log_file)?;
            run_tui(client, model).await
        }
    }
}

async fn ask_once(client: &HfClient, message: &str) {
    println!("{} {}", "You:".cyan().bold(), message);

    match client.fetch(message).await {
        FetchOutcome::Reply(text) => {
            println!("{} {}", "AI:".yellow().bold(), text.trim());
        }
        FetchOutcome::Fallback { text, .. } => {
            println!("{} {}", "AI (offline):".red().bold(), text.red());
        }
    }
}

async fn run_tui(client: HfClient, model: String) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(client, model);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(&mut app, event)?;
        }

        // The tick timer wakes this loop even with no keyboard input
        app.poll_response().await;
    }

    tui::restore()?;
    Ok(())
}

fn init_file_logging(log_file: Option<PathBuf>) -> Result<()> {
    let path = match log_file {
        Some(path) => path,
        None => Config::default_log_path()?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
