mod api;
mod cli;
mod config;
mod conversation;
mod error;
mod ui;
mod view;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use api::{ChatClient, ChatSender};
use cli::{Cli, Command};
use config::ChatConfig;
use conversation::Conversation;
use view::ConversationView;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ChatConfig::load()?.with_api_url(cli.api_url.as_deref());
    tracing::debug!(api_url = %config.api_url, "resolved configuration");
    let client = ChatClient::with_connect_timeout(&config.api_url, config.connect_timeout());

    match cli.command {
        Command::Chat => {
            let interactive = console::Term::stdout().is_term();
            let mut view = ConversationView::new(
                Conversation::new(config.fallback_message),
                std::io::stdout(),
            )
            .with_spinner(interactive);

            if !client.health_check().await {
                view.warn_service_down(client.base_url())?;
            }
            view.greet()?;
            view::run(&client, &mut view, view::stdin_lines()).await?;
        }
        Command::Ask { query } => {
            let mut view = ConversationView::new(
                Conversation::new(config.fallback_message),
                std::io::stdout(),
            );
            if !view::ask(&client, &mut view, &query).await? {
                eprintln!("Nothing to ask: the query is empty.");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Health => {
            let healthy = client.health_check().await;
            println!("{} {}", client.base_url(), if healthy { "up" } else { "down" });
            if !healthy {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

// Logs go to stderr so the transcript on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "ragchat=debug" } else { "ragchat=error" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
