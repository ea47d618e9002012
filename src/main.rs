use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use rs_mail_summarizer::client::SummaryClient;
use rs_mail_summarizer::config::{self, load_config};
use rs_mail_summarizer::server::run_server;
use rs_mail_summarizer::summarize::{AnthropicSummarizer, DEFAULT_MODEL};
use rs_mail_summarizer::terminal::run_tui;

#[derive(Parser)]
#[command(name = "rs_mail_summarizer")]
#[command(about = "Thread list with AI summaries (endpoint + TUI)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the summarization endpoint
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        addr: Option<String>,
    },

    /// Run the thread list TUI against a thread export
    Tui {
        /// JSON file holding the thread list
        #[arg(long)]
        threads: PathBuf,

        /// Folder name shown in the header
        #[arg(long, default_value = "Inbox")]
        folder: String,

        /// Summarization endpoint base URL (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;

    match cli.cmd {
        Command::Serve { addr } => {
            let addr = addr
                .or(cfg.listen_addr)
                .unwrap_or_else(|| config::DEFAULT_LISTEN_ADDR.to_string());
            let model = cfg.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

            let summarizer = AnthropicSummarizer::from_env(model)?;
            run_server(&addr, &summarizer)
        }

        Command::Tui {
            threads,
            folder,
            endpoint,
        } => {
            let base = endpoint
                .or(cfg.endpoint_url)
                .unwrap_or_else(|| config::DEFAULT_ENDPOINT_URL.to_string());

            let client = SummaryClient::new(base)?;
            run_tui(Arc::new(client), &threads, folder)
        }
    }
}
