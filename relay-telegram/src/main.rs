//! tg-relay binary: forwards messages between Telegram chats per routing rules and
//! threads edit resends onto the forwarded copies.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay_core::init_tracing;
use relay_engine::{run_loop, Forwarder, RoutingTable};
use relay_telegram::{load_routing_rules, run_listener, RelayConfig, TelegramRelayClient};
use std::path::Path;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::{mpsc, watch};
use tracing::info;

const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Parser)]
#[command(name = "tg-relay")]
#[command(about = "Telegram forwarding relay: copy messages between chats, thread edits", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run(token).await,
    }
}

async fn run(token: Option<String>) -> Result<()> {
    let config = RelayConfig::load(token)?;
    config.validate()?;

    if let Some(parent) = Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(parent).context("Create log directory")?;
    }
    init_tracing(&config.log_file)?;

    let rules = load_routing_rules(Path::new(&config.rules_file))?;
    info!(rules = rules.len(), file = %config.rules_file, "Routing rules loaded");

    let mut bot = teloxide::Bot::new(&config.bot_token);
    if let Some(url) = &config.telegram_api_url {
        let url = reqwest::Url::parse(url).context("Parse TELEGRAM_API_URL")?;
        bot = bot.set_api_url(url);
    }

    // Authorization must succeed before any event is consumed.
    let me = bot
        .get_me()
        .await
        .context("Telegram authorization failed (get_me)")?;
    info!(username = ?me.user.username, "Authorized with Telegram");

    let client = Arc::new(TelegramRelayClient::new(bot.clone()));
    let mut forwarder = Forwarder::new(
        client.clone(),
        RoutingTable::new(rules),
        config.call_timeout(),
    );

    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let listener = tokio::spawn(run_listener(bot, client.clone(), event_tx));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    run_loop(&mut forwarder, event_rx, shutdown_rx).await;

    // Ordered teardown: intake has stopped, then the listener, then the connection.
    listener.abort();
    let _ = listener.await;
    info!("Update listener released");
    drop(client);
    info!("Connection released, shutting down");
    Ok(())
}
