mod admin;
mod callback;
mod commands;
mod content;
mod health;
mod router;
mod session;
#[cfg(unix)]
mod shutdown;
mod state;
#[cfg(test)]
mod testing;

pub use callback::Action;
pub use commands::Command;
pub use state::State;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use session::SessionStore;
use storage::InquiryStore;
use teloxide::{
    dptree::deps, payloads::DeleteWebhookSetters, prelude::*, utils::command::BotCommands,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "freelance bot", version, about = "Telegram inquiry bot", long_about = None)]
struct Cli {
    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN")]
    token: String,
    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI")]
    mongo_uri: String,
    /// Telegram id of the only user allowed to run admin commands
    #[arg(long, env = "ADMIN_USER_ID")]
    admin_id: i64,
    /// Port for the HTTP liveness endpoint
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
    /// Seconds an idle conversation keeps its wizard state
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = 600)]
    session_ttl: u64,
    /// Messages sent in parallel by /sendall
    #[arg(long, env = "BROADCAST_CONCURRENCY", default_value_t = 8)]
    broadcast_concurrency: usize,
    /// Seconds to wait for a single outgoing message during /sendall
    #[arg(long, env = "SEND_TIMEOUT_SECS", default_value_t = 10)]
    send_timeout: u64,
}

pub type MyDialogue = Dialogue<State, SessionStore<State>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // config
    let cli = Cli::parse();
    let admin = admin::Admin {
        id: cli.admin_id,
        concurrency: cli.broadcast_concurrency,
        send_timeout: Duration::from_secs(cli.send_timeout),
    };

    // storage
    let storage = match storage::Storage::new(&cli.mongo_uri).await {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!("MongoDB connection error: {e:?}");
            return Err(e);
        }
    };
    let store: Arc<dyn InquiryStore> = storage.inquiries();

    // health
    let port = cli.port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            tracing::error!("HTTP server stopped: {e:?}");
        }
    });

    // sessions
    let sessions = SessionStore::<State>::new(Duration::from_secs(cli.session_ttl));
    tokio::spawn(sweep_sessions(sessions.clone()));

    // tg
    let bot = teloxide::Bot::new(cli.token);
    bot.delete_webhook().drop_pending_updates(true).await?;
    bot.set_my_commands(Command::bot_commands()).await?;
    tracing::info!("🚀 Starting 🤖  bot");

    let mut dispatcher = Dispatcher::builder(bot, router::master())
        .dependencies(deps![sessions, store, admin])
        .default_handler(|upd| async move {
            tracing::warn!("Unhandled update: {upd:?}");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build();
    #[cfg(unix)]
    match shutdown::sigterm() {
        Ok(term) => {
            tokio::spawn(shutdown::stop_on(term, dispatcher.shutdown_token()));
        }
        Err(e) => tracing::warn!("SIGTERM handler not installed: {e:?}"),
    }
    dispatcher.dispatch().await;
    tracing::info!("Bot stopped");
    Ok(())
}

async fn sweep_sessions(sessions: Arc<SessionStore<State>>) {
    let mut interval = tokio::time::interval(sessions.ttl().max(Duration::from_secs(1)));
    loop {
        interval.tick().await;
        let purged = sessions.purge_expired().await;
        if purged > 0 {
            tracing::debug!("Purged {purged} idle sessions");
        }
    }
}
